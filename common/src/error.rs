use thiserror::Error;

/// Violations of the host range preconditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("subnet prefix must not be empty")]
    EmptyPrefix,
    #[error("host range is inverted: {lo} > {hi}")]
    Inverted { lo: u8, hi: u8 },
}

/// Errors returned by the scan controller before any address is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A scan is already running on this controller.
    #[error("a scan is already running")]
    AlreadyRunning,
}
