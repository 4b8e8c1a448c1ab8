use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use lanprobe_common::warn;
use lanprobe_core::scanner::CancelToken;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Watches the keyboard for `q` (or Ctrl-C, which raw mode swallows) and
/// cancels the scan when pressed. Raw mode is released when dropped.
pub struct InputListener {
    done: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputListener {
    /// Returns `None` when stdin is not a terminal.
    pub fn start(cancel: CancelToken) -> Option<Self> {
        if !std::io::stdin().is_terminal() {
            return None;
        }

        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        let handle = thread::spawn(move || {
            if let Err(e) = enable_raw_mode() {
                warn!("Keyboard input unavailable: {e}");
                return;
            }

            while !flag.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read()
                            && is_stop_key(&key)
                        {
                            cancel.cancel();
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }
            }

            let _ = disable_raw_mode();
        });

        Some(Self {
            done,
            handle: Some(handle),
        })
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let _ = disable_raw_mode();
    }
}

fn is_stop_key(key: &KeyEvent) -> bool {
    let is_q = key.code == KeyCode::Char('q');
    let is_ctrl_c =
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    (is_q || is_ctrl_c) && key.kind == KeyEventKind::Press
}
