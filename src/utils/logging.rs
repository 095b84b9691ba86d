//! Logging macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! Usage:
//! ```ignore
//! // In your module, define the flag first:
//! const ENABLE_LOGS: bool = true;
//!
//! // Then use the macros (they're exported at the crate root):
//! use crate::{log_debug, log_info};
//!
//! log_info!("This will log if ENABLE_LOGS is true");
//! ```
//!
//! Noisy per-tick code (the stream generator) uses these so it can be silenced in one
//! place without touching `RUST_LOG`.

use env_logger::{Builder, Env};

/// Logger builder honouring the filter variable in `env` (normally `RUST_LOG`).
/// When it is unset the level defaults to info, or debug when `debug` is true.
pub fn builder(env: Env<'_>, debug: bool) -> Builder {
    let default_filter = if debug { "debug" } else { "info" };
    Builder::from_env(env.default_filter_or(default_filter))
}

/// Info-level log, emitted only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Debug-level log, emitted only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Warn-level log, emitted only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn explicit_filter_is_not_lowered() {
        std::env::set_var("FRESHWATCH_TEST_LOG_EXPLICIT", "debug");
        let logger = builder(Env::new().filter("FRESHWATCH_TEST_LOG_EXPLICIT"), false).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
    }

    #[test]
    fn unset_filter_defaults_to_info() {
        let logger = builder(Env::new().filter("FRESHWATCH_TEST_LOG_UNSET"), false).build();
        assert_eq!(logger.filter(), LevelFilter::Info);
    }

    #[test]
    fn debug_flag_raises_default() {
        let logger = builder(Env::new().filter("FRESHWATCH_TEST_LOG_UNSET_DEBUG"), true).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
    }
}
