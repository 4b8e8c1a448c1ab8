use std::time::Duration;

pub const DEFAULT_PORT: u16 = 22;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(150);
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_FALLBACK_PREFIX: &str = "device";

/// Presentation flags for the terminal front-end.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips reverse name resolution; every live host gets a fallback name.
    pub no_dns: bool,
    /// 0 prints everything, 1 drops headers and the per-host tree, 2 prints addresses only.
    pub quiet: u8,
    /// Disables the keyboard listener (`q` to stop).
    pub disable_input: bool,
}

/// Parameters of a single discovery scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// TCP port used as the liveness signal.
    pub port: u16,
    /// Upper bound on a single connection attempt.
    pub connect_timeout: Duration,
    /// Upper bound on a single reverse lookup.
    pub resolve_timeout: Duration,
    /// Service descriptor attached to every host record, e.g. `22/ssh`.
    pub service: String,
    /// Fallback names are `<fallback_prefix>-<n>`.
    pub fallback_prefix: String,
}

impl ScanConfig {
    /// Builds a config probing `port`, with the matching service label.
    pub fn for_port(port: u16) -> Self {
        Self {
            port,
            service: service_label(port),
            ..Self::default()
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            service: service_label(DEFAULT_PORT),
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
        }
    }
}

/// Formats `<port>/<name>` using the usual service name for well-known ports.
pub fn service_label(port: u16) -> String {
    let name: &str = match port {
        22 => "ssh",
        23 => "telnet",
        80 => "http",
        443 => "https",
        445 => "smb",
        3389 => "rdp",
        5900 => "vnc",
        _ => "tcp",
    };
    format!("{port}/{name}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
