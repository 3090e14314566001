//! Logging facade.
//!
//! The gate never talks to a logging crate directly. Every message goes
//! through one of the macros below, which forward to [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) depending on the enabled feature.
//! Enable at most one of the two. With neither, the arguments are still
//! type-checked but nothing is emitted.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Levels used by the gate:
//!
//! | Macro | Used for |
//! |-------|----------|
//! | `trace_log!` | router phase transitions, cache hits |
//! | `debug_log!` | resolutions and decisions |
//! | `info_log!`  | route registration, completed navigations |
//! | `warn_log!`  | rejected navigations |
//! | `error_log!` | redirect limit reached |
//!
//! ```ignore
//! use route_gate::{debug_log, warn_log};
//!
//! debug_log!("Resolved '{}' to {:?}", path, resolution);
//! warn_log!("Navigation to '{}' rejected: {}", path, reason);
//! ```

/// Forward a message to whichever backend is enabled.
#[doc(hidden)]
#[macro_export]
macro_rules! __gate_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "tracing")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    };
}

/// Emit a **trace**-level message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__gate_log!(trace, $($arg)*);
    };
}

/// Emit a **debug**-level message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__gate_log!(debug, $($arg)*);
    };
}

/// Emit an **info**-level message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__gate_log!(info, $($arg)*);
    };
}

/// Emit a **warn**-level message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__gate_log!(warn, $($arg)*);
    };
}

/// Emit an **error**-level message.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__gate_log!(error, $($arg)*);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    #[deny(unused_variables)]
    fn test_arguments_count_as_used() {
        let path = "/panel";
        let nav_id = 3;
        debug_log!("Navigation #{} to '{}'", nav_id, path);
        warn_log!("Rejected {}", path);
    }
}
