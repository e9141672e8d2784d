//! Structured logging for the projfs workspace.
//!
//! Each crate logs through the macros below instead of touching `emit`
//! directly, so the whole workspace shares one switch:
//!
//! - `PROJFS_LOG=off` (default) - silent
//! - `PROJFS_LOG=error|warn|info|debug` - minimum level written to stderr

use std::sync::Once;

// Re-export emit so the macros expand inside dependent crates.
pub use emit;

static INIT: Once = Once::new();

/// Minimum level parsed from the environment. `None` means logging is off.
fn level_from_env(value: &str) -> Option<emit::Level> {
    match value {
        "error" => Some(emit::Level::Error),
        "warn" => Some(emit::Level::Warn),
        "info" => Some(emit::Level::Info),
        "debug" => Some(emit::Level::Debug),
        _ => None,
    }
}

/// Initialize diagnostics from the `PROJFS_LOG` environment variable.
///
/// Safe to call more than once; only the first call configures emit.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var("PROJFS_LOG").unwrap_or_else(|_| "off".to_string());
        let Some(level) = level_from_env(&value) else {
            return;
        };
        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();
        // The runtime must outlive every logging call site.
        std::mem::forget(rt);
    });
}

pub use init_diagnostics as init;

/// Operations a user might want to see in normal usage
/// ("created folder", "ran watcher sweep").
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Detail useful while debugging (cache hits, skipped entries, diffs).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Recoverable issues worth noting (entry vanished between list and stat).
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Failures that prevent an operation from completing.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_map_to_levels() {
        assert_eq!(level_from_env("debug"), Some(emit::Level::Debug));
        assert_eq!(level_from_env("info"), Some(emit::Level::Info));
        assert_eq!(level_from_env("warn"), Some(emit::Level::Warn));
        assert_eq!(level_from_env("error"), Some(emit::Level::Error));
        assert_eq!(level_from_env("off"), None);
        assert_eq!(level_from_env("nonsense"), None);
    }

    #[test]
    fn init_is_idempotent() {
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn macros_compile() {
        log_info!("info message");
        log_debug!("debug message with {value}", value: 42);
        log_warn!("warn message");
        log_error!("error message");
    }
}
