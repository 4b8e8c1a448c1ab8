//! Event-stream reporting.
//!
//! For consumers that would rather iterate than implement [`ScanReporter`]:
//! [`channel`] returns a reporter to pass to the controller and the receiving
//! end of an unbounded channel. Events are sent the moment they happen.

use anyhow::Context;
use lanprobe_common::network::host::HostRecord;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::ScanReporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Progress(usize),
    HostFound(HostRecord),
}

#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: UnboundedSender<ScanEvent>,
}

impl ScanReporter for ChannelReporter {
    fn on_progress(&self, index: usize) -> anyhow::Result<()> {
        self.tx
            .send(ScanEvent::Progress(index))
            .context("event receiver dropped")
    }

    fn on_host_found(&self, host: HostRecord) -> anyhow::Result<()> {
        self.tx
            .send(ScanEvent::HostFound(host))
            .context("event receiver dropped")
    }
}

pub fn channel() -> (ChannelReporter, UnboundedReceiver<ScanEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelReporter { tx }, rx)
}

/// Maps a 1-based progress index onto 0..=100.
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct: usize = index.min(total) * 100 / total;
    pct as u8
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
    use lanprobe_common::network::address::Address;

    #[test]
    fn percent() {
        assert_eq!(progress_percent(0, 254), 0);
        assert_eq!(progress_percent(127, 254), 50);
        assert_eq!(progress_percent(254, 254), 100);
        assert_eq!(progress_percent(300, 254), 100);
        assert_eq!(progress_percent(1, 0), 100);
    }

    #[test]
    fn events_arrive_in_order() {
        let (reporter, mut rx) = channel();
        let host = HostRecord::new(Address::new("10.0.0.1"), "gw".into(), "22/ssh");

        reporter.on_progress(1).unwrap();
        reporter.on_host_found(host.clone()).unwrap();
        reporter.on_progress(2).unwrap();

        assert_eq!(rx.try_recv().unwrap(), ScanEvent::Progress(1));
        assert_eq!(rx.try_recv().unwrap(), ScanEvent::HostFound(host));
        assert_eq!(rx.try_recv().unwrap(), ScanEvent::Progress(2));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_is_an_error() {
        let (reporter, rx) = channel();
        drop(rx);
        assert!(reporter.on_progress(1).is_err());
    }
}
