//! # Scan Target Model
//!
//! Parses the textual target handed to the scanner into a [`HostRange`].
//!
//! Accepted forms:
//! * A three-octet subnet prefix (e.g., `192.168.1`), scanning hosts 1 to 254.
//! * A CIDR block no larger than a /24 (e.g., `192.168.1.0/24`).
//! * An IPv4 range inside one /24 (e.g., `192.168.1.10-50`).
//! * A single IPv4 address.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::network::range::{self, HostRange};

/// Smallest CIDR prefix the last-octet enumerator can cover.
const MIN_CIDR_PREFIX: u8 = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    range: HostRange,
}

impl Target {
    pub fn range(&self) -> &HostRange {
        &self.range
    }

    pub fn into_range(self) -> HostRange {
        self.range
    }
}

impl From<HostRange> for Target {
    fn from(range: HostRange) -> Self {
        Self { range }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.range;
        if r.lo() == r.hi() {
            write!(f, "{}.{}", r.prefix(), r.lo())
        } else {
            write!(f, "{}.{}-{}", r.prefix(), r.lo(), r.hi())
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s.trim();

        if let Some(range) = parse_cidr(s)? {
            return Ok(range.into());
        }

        if let Some(range) = parse_ip_range(s)? {
            return Ok(range.into());
        }

        if let Some(range) = parse_host(s) {
            return Ok(range.into());
        }

        if let Some(range) = parse_prefix(s) {
            return Ok(range.into());
        }

        Err(format!("invalid target: {s}"))
    }
}

/// Parses a three-octet prefix like "192.168.1".
fn parse_prefix(s: &str) -> Option<HostRange> {
    let octets: Vec<u8> = s
        .split('.')
        .map(|octet| octet.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .ok()?;

    match octets.as_slice() {
        [a, b, c] => HostRange::subnet(format!("{a}.{b}.{c}")).ok(),
        _ => None,
    }
}

/// Parses a single IPv4 address.
fn parse_host(s: &str) -> Option<HostRange> {
    let ip: Ipv4Addr = s.parse().ok()?;
    HostRange::between(ip, ip).ok()
}

/// Parses a range string like "1.1.1.1-1.1.1.20" or "1.1.1.1-20".
fn parse_ip_range(s: &str) -> Result<Option<HostRange>, String> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid start IP in range '{start_str}': {e}"))?;

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr, s)?;

    HostRange::between(start_addr, end_addr).map(Some)
}

/// Helper to parse the end address of a range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.254".
fn parse_range_end_addr(
    end_str: &str,
    start_addr: &Ipv4Addr,
    original_s: &str,
) -> Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    let mut end_octets = start_addr.octets();
    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("Invalid end range '{end_str}': {e}"))?;

    if partial_octets.is_empty() {
        return Err(format!("End range cannot be empty: {original_s}"));
    }
    if partial_octets.len() > 4 {
        return Err(format!("End range has too many octets: {end_str}"));
    }

    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
///
/// Network and broadcast addresses are stripped when the block has room for
/// usable hosts in between (/30 and larger).
fn parse_cidr(s: &str) -> Result<Option<HostRange>, String> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid IP in CIDR '{ip_str}': {e}"))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| format!("Invalid prefix in CIDR '{prefix_str}': {e}"))?;

    if prefix < MIN_CIDR_PREFIX {
        return Err(format!(
            "CIDR /{prefix} spans more than one /24; only /24 to /32 are supported"
        ));
    }

    let (network, broadcast) =
        range::cidr_bounds(ipv4_addr, prefix).map_err(|e| e.to_string())?;

    let (start, end) = if prefix <= 30 {
        (
            Ipv4Addr::from(u32::from(network) + 1),
            Ipv4Addr::from(u32::from(broadcast) - 1),
        )
    } else {
        (network, broadcast)
    };

    HostRange::between(start, end).map(Some)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
