//! # lanprobe discovery engine
//!
//! * [`scanner`]: the scan controller and the abstractions it drives
//!   (liveness probe, hostname lookup, reporter).
//! * [`network`]: concrete probe and lookup implementations backed by the
//!   operating system's TCP stack and resolver.

pub mod network;
pub mod scanner;
