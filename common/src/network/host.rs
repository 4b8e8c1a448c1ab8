use super::address::Address;

/// A host judged live by the probe, as delivered to the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub address: Address,
    pub display_name: String,
    pub service_info: String,
}

impl HostRecord {
    pub fn new(address: Address, display_name: String, service_info: impl Into<String>) -> Self {
        Self {
            address,
            display_name,
            service_info: service_info.into(),
        }
    }

    /// Naming heuristic for Raspberry Pi boards: the display name mentions
    /// `raspberry` or `pi`, ignoring case.
    ///
    /// Loose on purpose; `pi` also matches names like `pihole` or `api-gw`.
    pub fn looks_like_raspberry_pi(&self) -> bool {
        let name: String = self.display_name.to_ascii_lowercase();
        name.contains("raspberry") || name.contains("pi")
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

    fn record(name: &str) -> HostRecord {
        HostRecord::new(Address::new("192.168.1.2"), name.to_string(), "22/ssh")
    }

    #[test]
    fn raspberry_pi_hint() {
        assert!(record("raspberrypi.local").looks_like_raspberry_pi());
        assert!(record("RaspberryPi").looks_like_raspberry_pi());
        assert!(record("octopi").looks_like_raspberry_pi());
        assert!(!record("printer.local").looks_like_raspberry_pi());
        assert!(!record("device-1").looks_like_raspberry_pi());
    }
}
