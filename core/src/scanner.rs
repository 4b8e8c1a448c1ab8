//! The central **abstraction** for host discovery.
//!
//! [`ScanController`] walks a [`HostRange`](lanprobe_common::network::range::HostRange)
//! one address at a time: probe, name the live ones, report. The pieces it
//! drives are behind the traits below so that tests (and other front-ends) can
//! swap them out.
//!
//! **Architectural Note:**
//! The controller only depends on these traits. Concrete probes and lookups
//! live in [`crate::network`].

use async_trait::async_trait;
use lanprobe_common::network::{address::Address, host::HostRecord};

mod cancel;
mod controller;
pub mod events;
mod resolver;

pub use cancel::CancelToken;
pub use controller::{ScanController, ScanOutcome, ScanState, ScanSummary};
pub use resolver::{FallbackNamer, NameResolver};

/// Decides whether a single address belongs to a live host.
///
/// Implementations must stay within their own time budget and must not fail:
/// unreachable, refused, timed out and malformed all mean `false`.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn probe(&self, addr: &Address) -> bool;
}

/// Looks up a human readable name for an address, if one exists.
#[async_trait]
pub trait HostnameLookup: Send + Sync {
    async fn lookup(&self, addr: &Address) -> Option<String>;
}

/// Receives scan events as they happen.
///
/// Both calls are made synchronously from the scan loop. An `Err` is logged
/// and counted in the [`ScanSummary`]; it never stops the scan.
pub trait ScanReporter: Send + Sync {
    /// Called once per address, with a 1-based index, before it is probed.
    fn on_progress(&self, index: usize) -> anyhow::Result<()>;

    /// Called as soon as a live host has been named.
    fn on_host_found(&self, host: HostRecord) -> anyhow::Result<()>;
}
