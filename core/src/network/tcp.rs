//! TCP connect probe.
//!
//! Liveness here is an approximation, not a ping: a host counts as live only if
//! it completes a handshake on one port within the budget. ICMP would need raw
//! sockets (root), so hosts that are up but filter or refuse the port are
//! reported as not live.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use lanprobe_common::config::ScanConfig;
use lanprobe_common::network::address::Address;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::LivenessProbe;

#[derive(Debug, Clone)]
pub struct TcpConnectProbe {
    port: u16,
    timeout: Duration,
}

impl TcpConnectProbe {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    pub fn from_config(cfg: &ScanConfig) -> Self {
        Self::new(cfg.port, cfg.connect_timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl LivenessProbe for TcpConnectProbe {
    async fn probe(&self, addr: &Address) -> bool {
        let Some(ip) = addr.to_ipv4() else {
            trace!(%addr, "rejected malformed address");
            return false;
        };

        let socket_addr: SocketAddr = SocketAddr::from((ip, self.port));

        // The stream is dropped (and the socket closed) at the end of each arm.
        match timeout(self.timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                trace!(%socket_addr, error = %e, "connect failed");
                false
            }
            Err(_elapsed) => {
                trace!(%socket_addr, "connect timed out");
                false
            }
        }
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
