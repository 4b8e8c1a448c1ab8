//! # Host Range Model
//!
//! A subnet prefix (the first three octets) plus an inclusive range of last
//! octets. [`HostRange::iter`] walks it in ascending order and can be called
//! any number of times; every call starts over from `lo`.

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use super::address::Address;
use crate::error::RangeError;

pub const DEFAULT_PREFIX: &str = "192.168.1";
pub const DEFAULT_LO: u8 = 1;
pub const DEFAULT_HI: u8 = 254;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRange {
    prefix: String,
    lo: u8,
    hi: u8,
}

impl HostRange {
    pub fn new(prefix: impl Into<String>, lo: u8, hi: u8) -> Result<Self, RangeError> {
        let prefix: String = prefix.into();
        if prefix.is_empty() {
            return Err(RangeError::EmptyPrefix);
        }
        if lo > hi {
            return Err(RangeError::Inverted { lo, hi });
        }
        Ok(Self { prefix, lo, hi })
    }

    /// Full /24 host range (1..=254) below a three-octet prefix.
    pub fn subnet(prefix: impl Into<String>) -> Result<Self, RangeError> {
        Self::new(prefix, DEFAULT_LO, DEFAULT_HI)
    }

    /// Builds a range from two addresses that share their first three octets.
    pub(crate) fn between(start: Ipv4Addr, end: Ipv4Addr) -> Result<Self, String> {
        let [a, b, c, lo] = start.octets();
        let [x, y, z, hi] = end.octets();
        if (a, b, c) != (x, y, z) {
            return Err(format!("{start} and {end} are not in the same /24"));
        }
        Self::new(format!("{a}.{b}.{c}"), lo, hi).map_err(|e| e.to_string())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    /// Number of addresses produced by [`HostRange::iter`].
    pub fn len(&self) -> usize {
        usize::from(self.hi - self.lo) + 1
    }

    /// Always false: `lo <= hi` holds for every constructed range.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = Address> + Clone + '_ {
        (self.lo..=self.hi).map(move |octet| Address::new(format!("{}.{octet}", self.prefix)))
    }
}

impl Default for HostRange {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            lo: DEFAULT_LO,
            hi: DEFAULT_HI,
        }
    }
}

/// Network and broadcast addresses of `ip/prefix`.
pub fn cidr_bounds(ip: Ipv4Addr, prefix: u8) -> anyhow::Result<(Ipv4Addr, Ipv4Addr)> {
    let network = Ipv4Network::new(ip, prefix)?;
    Ok((network.network(), network.broadcast()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
