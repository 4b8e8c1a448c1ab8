use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cross-thread stop signal for one scan.
///
/// Clones share the same flag. The scan loop checks it before each address, so
/// a probe already in flight finishes (or times out) before the stop is seen.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new();
        let remote = token.clone();
        assert!(!token.is_cancelled());

        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
