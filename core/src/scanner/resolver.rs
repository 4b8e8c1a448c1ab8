use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lanprobe_common::network::address::Address;

use super::HostnameLookup;

/// Hands out `<prefix>-1`, `<prefix>-2`, ... in the order names are requested.
///
/// The counter belongs to one scan session and only advances when a fallback
/// is actually issued, so numbering follows discovery order, not address order.
#[derive(Debug)]
pub struct FallbackNamer {
    prefix: String,
    issued: AtomicUsize,
}

impl FallbackNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issued: AtomicUsize::new(0),
        }
    }

    pub fn next_name(&self) -> String {
        let n: usize = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{n}", self.prefix)
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

/// Lookup with a deterministic fallback. Never fails, never returns an empty name.
pub struct NameResolver {
    lookup: Arc<dyn HostnameLookup>,
    fallback: FallbackNamer,
}

impl NameResolver {
    pub fn new(lookup: Arc<dyn HostnameLookup>, fallback_prefix: &str) -> Self {
        Self {
            lookup,
            fallback: FallbackNamer::new(fallback_prefix),
        }
    }

    pub async fn resolve(&self, addr: &Address) -> String {
        match self.lookup.lookup(addr).await {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.fallback.next_name(),
        }
    }

    pub fn fallbacks_issued(&self) -> usize {
        self.fallback.issued()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapLookup(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl HostnameLookup for MapLookup {
        async fn lookup(&self, addr: &Address) -> Option<String> {
            self.0.get(addr.as_str()).map(|name| name.to_string())
        }
    }

    fn resolver(entries: &[(&'static str, &'static str)]) -> NameResolver {
        let lookup = MapLookup(entries.iter().copied().collect());
        NameResolver::new(Arc::new(lookup), "device")
    }

    #[test]
    fn fallback_names_are_sequential() {
        let namer = FallbackNamer::new("device");
        let names: Vec<String> = (0..4).map(|_| namer.next_name()).collect();
        assert_eq!(names, ["device-1", "device-2", "device-3", "device-4"]);
        assert_eq!(namer.issued(), 4);
    }

    #[tokio::test]
    async fn resolved_name_wins() {
        let resolver = resolver(&[("192.168.1.10", "printer.local")]);
        assert_eq!(resolver.resolve(&Address::new("192.168.1.10")).await, "printer.local");
        assert_eq!(resolver.fallbacks_issued(), 0);
    }

    #[tokio::test]
    async fn fallback_follows_request_order_not_address_order() {
        let resolver = resolver(&[("10.0.0.2", "nas.lan")]);

        assert_eq!(resolver.resolve(&Address::new("10.0.0.9")).await, "device-1");
        assert_eq!(resolver.resolve(&Address::new("10.0.0.2")).await, "nas.lan");
        assert_eq!(resolver.resolve(&Address::new("10.0.0.1")).await, "device-2");
    }

    #[tokio::test]
    async fn blank_answers_fall_back() {
        let resolver = resolver(&[("10.0.0.3", "   ")]);
        assert_eq!(resolver.resolve(&Address::new("10.0.0.3")).await, "device-1");
    }

    #[tokio::test]
    async fn never_returns_empty() {
        let resolver = resolver(&[]);
        for raw in ["", "garbage", "1.2.3.4"] {
            assert!(!resolver.resolve(&Address::new(raw)).await.is_empty());
        }
    }
}
