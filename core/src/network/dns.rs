//! Reverse name lookups through the system resolver.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use lanprobe_common::config::ScanConfig;
use lanprobe_common::network::address::Address;
use lanprobe_common::warn;
use tokio::time::timeout;
use tracing::debug;

use crate::scanner::HostnameLookup;

// Fail instead of returning the numeric form when no name is known.
#[cfg(unix)]
const NAME_REQUIRED: i32 = libc::NI_NAMEREQD;
#[cfg(not(unix))]
const NAME_REQUIRED: i32 = 0;

/// PTR lookup via `getnameinfo`, bounded by `timeout`.
///
/// `getnameinfo` cannot be interrupted; on timeout the blocking call is left to
/// finish on tokio's blocking pool and its answer is discarded.
#[derive(Debug, Clone)]
pub struct ReverseDnsLookup {
    timeout: Duration,
}

impl ReverseDnsLookup {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(cfg: &ScanConfig) -> Self {
        Self::new(cfg.resolve_timeout)
    }
}

#[async_trait]
impl HostnameLookup for ReverseDnsLookup {
    async fn lookup(&self, addr: &Address) -> Option<String> {
        let ip: IpAddr = IpAddr::V4(addr.to_ipv4()?);
        let sock: SocketAddr = SocketAddr::new(ip, 0);

        let task = tokio::task::spawn_blocking(move || dns_lookup::getnameinfo(&sock, NAME_REQUIRED));

        match timeout(self.timeout, task).await {
            Ok(Ok(Ok((name, _service)))) => accept_name(name, &ip),
            Ok(Ok(Err(e))) => {
                debug!(%ip, error = ?e, "no name for address");
                None
            }
            Ok(Err(join_err)) => {
                warn!(%ip, error = %join_err, "reverse lookup task failed");
                None
            }
            Err(_elapsed) => {
                debug!(%ip, "reverse lookup timed out");
                None
            }
        }
    }
}

/// Drops empty answers and numeric echoes of the queried address.
fn accept_name(name: String, ip: &IpAddr) -> Option<String> {
    let name: &str = name.trim_end_matches('.');
    if name.is_empty() || name.parse::<IpAddr>().is_ok_and(|parsed| parsed == *ip) {
        return None;
    }
    Some(name.to_string())
}

/// Lookup that never finds a name; every live host ends up with a fallback name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

#[async_trait]
impl HostnameLookup for NoLookup {
    async fn lookup(&self, _addr: &Address) -> Option<String> {
        None
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
    use std::net::Ipv4Addr;
    use std::time::Instant;

    #[test]
    fn accept_name_filters_numeric_echo() {
        let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(accept_name("printer.local.".into(), &ip), Some("printer.local".into()));
        assert_eq!(accept_name("192.168.1.10".into(), &ip), None);
        assert_eq!(accept_name("".into(), &ip), None);
        assert_eq!(accept_name(".".into(), &ip), None);
    }

    #[tokio::test]
    async fn malformed_address_has_no_name() {
        let lookup = ReverseDnsLookup::new(Duration::from_millis(500));
        assert_eq!(lookup.lookup(&Address::new("not.an.ip.addr")).await, None);
    }

    #[tokio::test]
    async fn lookup_respects_budget() {
        let budget = Duration::from_millis(100);
        let lookup = ReverseDnsLookup::new(budget);

        let started = Instant::now();
        let _ = lookup.lookup(&Address::new("203.0.113.7")).await;
        assert!(started.elapsed() < budget + Duration::from_millis(250));
    }

    #[tokio::test]
    async fn no_lookup_never_answers() {
        assert_eq!(NoLookup.lookup(&Address::new("127.0.0.1")).await, None);
    }
}
