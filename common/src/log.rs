//! Logging macros shared by every crate in the workspace.
//!
//! They forward to [`tracing`] so the subscriber installed by the binary decides
//! how (and whether) anything is rendered. `success!` is an INFO event on its own
//! target, which the terminal formatter draws with a distinct marker.

/// Target used by [`success!`] events.
pub const SUCCESS_TARGET: &str = "lanprobe::success";

/// Target of the INFO event the scan controller emits for every live host.
/// Front ends that already render hosts themselves can filter it out.
pub const HOST_TARGET: &str = "lanprobe::host";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "lanprobe::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
