use std::fmt;
use std::net::Ipv4Addr;

const MIN_LEN: usize = "0.0.0.0".len();
const MAX_LEN: usize = "255.255.255.255".len();

/// An IPv4 dotted-quad as handed to the probe and the resolver.
///
/// Construction does not validate; [`Address::is_well_formed`] is the cheap
/// syntactic gate the probe applies before touching a socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length between 7 and 15 characters and exactly three `.` separators.
    pub fn is_well_formed(&self) -> bool {
        let len: usize = self.0.len();
        (MIN_LEN..=MAX_LEN).contains(&len) && self.0.bytes().filter(|b| *b == b'.').count() == 3
    }

    /// Parses the address, returning `None` for anything that is not a valid IPv4 literal.
    pub fn to_ipv4(&self) -> Option<Ipv4Addr> {
        if !self.is_well_formed() {
            return None;
        }
        self.0.parse::<Ipv4Addr>().ok()
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Self(ip.to_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
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
