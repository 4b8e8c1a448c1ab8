#![cfg(test)]
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lanprobe_common::config::ScanConfig;
use lanprobe_common::network::address::Address;
use lanprobe_common::network::host::HostRecord;
use lanprobe_common::network::range::HostRange;
use lanprobe_core::network::dns::NoLookup;
use lanprobe_core::network::tcp::TcpConnectProbe;
use lanprobe_core::scanner::events::{self, ScanEvent};
use lanprobe_core::scanner::{CancelToken, HostnameLookup, ScanController, ScanOutcome, ScanState};
use tokio::net::TcpListener;

struct StaticNames(HashMap<&'static str, &'static str>);

#[async_trait]
impl HostnameLookup for StaticNames {
    async fn lookup(&self, addr: &Address) -> Option<String> {
        self.0.get(addr.as_str()).map(|name| name.to_string())
    }
}

async fn loopback_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ScanEvent>) -> Vec<ScanEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}

/// A listener on 127.0.0.1 is the only live host in 127.0.0.1-3.
#[tokio::test]
async fn discovery_single_loopback() {
    let (_listener, port) = loopback_listener().await;
    let cfg = ScanConfig::for_port(port);
    let controller = ScanController::from_config(cfg.clone(), false);
    let range = HostRange::new("127.0.0", 1, 3).unwrap();
    let (reporter, mut rx) = events::channel();

    let summary = controller
        .start(&range, &reporter, &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(summary.outcome, ScanOutcome::Completed);
    assert_eq!(summary.probed, 3);
    assert_eq!(summary.found, 1);
    assert_eq!(controller.state(), ScanState::Completed);

    let expected = HostRecord::new(Address::new("127.0.0.1"), "device-1".into(), cfg.service);
    assert_eq!(
        drain(&mut rx),
        vec![
            ScanEvent::Progress(1),
            ScanEvent::HostFound(expected),
            ScanEvent::Progress(2),
            ScanEvent::Progress(3),
        ]
    );
}

/// Resolved names are used as-is; fallbacks are numbered in discovery order.
#[tokio::test]
#[cfg(target_os = "linux")]
async fn discovery_names_and_fallbacks() {
    let (_first, port) = loopback_listener().await;
    let _second = TcpListener::bind(("127.0.0.3", port)).await.unwrap();
    let _third = TcpListener::bind(("127.0.0.4", port)).await.unwrap();

    let lookup = StaticNames(HashMap::from([("127.0.0.3", "printer.local")]));
    let probe = TcpConnectProbe::new(port, ScanConfig::default().connect_timeout);
    let controller = ScanController::new(
        Arc::new(probe),
        Arc::new(lookup),
        ScanConfig::for_port(port),
    );
    let range = HostRange::new("127.0.0", 1, 5).unwrap();
    let (reporter, mut rx) = events::channel();

    controller
        .start(&range, &reporter, &CancelToken::new())
        .await
        .unwrap();

    let found: Vec<(String, String)> = drain(&mut rx)
        .into_iter()
        .filter_map(|event| match event {
            ScanEvent::HostFound(host) => Some((host.address.to_string(), host.display_name)),
            ScanEvent::Progress(_) => None,
        })
        .collect();

    assert_eq!(
        found,
        vec![
            ("127.0.0.1".to_string(), "device-1".to_string()),
            ("127.0.0.3".to_string(), "printer.local".to_string()),
            ("127.0.0.4".to_string(), "device-2".to_string()),
        ]
    );
}

/// A token cancelled before the scan starts yields no events at all.
#[tokio::test]
async fn discovery_pre_cancelled() {
    let (_listener, port) = loopback_listener().await;
    let controller = ScanController::from_config(ScanConfig::for_port(port), false);
    let range = HostRange::new("127.0.0", 1, 254).unwrap();
    let (reporter, mut rx) = events::channel();
    let cancel = CancelToken::new();
    cancel.cancel();

    let summary = controller.start(&range, &reporter, &cancel).await.unwrap();

    assert_eq!(summary.outcome, ScanOutcome::Cancelled);
    assert_eq!(summary.probed, 0);
    assert!(drain(&mut rx).is_empty());
    assert_eq!(controller.state(), ScanState::Cancelled);
}

/// The controller can be shared with another task that stops it; the
/// consumer still sees an ordered, gap-free progress sequence.
#[tokio::test]
async fn discovery_stopped_from_another_task() {
    let (_listener, port) = loopback_listener().await;
    let controller = Arc::new(ScanController::new(
        Arc::new(TcpConnectProbe::new(port, ScanConfig::default().connect_timeout)),
        Arc::new(NoLookup),
        ScanConfig::for_port(port),
    ));
    let range = HostRange::new("127.0.0", 1, 254).unwrap();
    let (reporter, mut rx) = events::channel();
    let cancel = CancelToken::new();

    let scan = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.start(&range, &reporter, &cancel).await })
    };

    // Stop as soon as the first progress event shows up.
    let mut progress: Vec<usize> = Vec::new();
    while let Some(event) = rx.recv().await {
        if let ScanEvent::Progress(index) = event {
            progress.push(index);
            if index == 1 {
                controller.stop();
            }
        }
    }

    let summary = scan.await.unwrap().unwrap();
    assert_eq!(progress, (1..=summary.probed).collect::<Vec<_>>());
    match summary.outcome {
        ScanOutcome::Cancelled => assert!(summary.probed < 254),
        ScanOutcome::Completed => assert_eq!(summary.probed, 254),
    }
}
