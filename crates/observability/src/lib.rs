//! Process-wide tracing setup shared by the console binaries.

pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, LOG_FORMAT_VAR, LogFormat};

/// Install logging filtered by `RUST_LOG`, formatted per `NETGN_LOG_FORMAT`
/// (`json` unless set to `pretty`).
///
/// Calling this more than once is harmless.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
