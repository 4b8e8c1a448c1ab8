//! Shared value types for the `lanprobe` workspace.
//!
//! * [`network`]: addresses, host ranges, target descriptors and host records.
//! * [`config`]: scan parameters and presentation flags.
//! * [`error`]: error types raised by range construction and the scan controller.
//! * [`log`]: thin `tracing` wrappers used across the crates.

pub mod config;
pub mod error;
pub mod log;
pub mod network;

#[doc(hidden)]
pub use tracing;
