//! Log macros for route matching and assembly
//!
//! Every log line the router emits goes through the macros below, which
//! forward to `log` or `tracing` depending on the enabled feature. With
//! neither feature enabled they expand to nothing.
//!
//! | Level | Emitted for |
//! |-------|-------------|
//! | trace | collection re-sorts, lazy route construction, each child tried during a match, route type registration |
//! | debug | outcome of a top-level match, requests outside the base path |
//! | info  | routes loaded into a [`Router`](crate::Router) |
//! | warn  | unknown route types, ignored configuration keys, assembly of unknown route names |
//! | error | a custom match result that claims success |
//!
//! `log` and `tracing` are mutually exclusive.
//!
//! ```ignore
//! use route_tree::{debug_log, trace_log};
//!
//! trace_log!("Child '{}' at offset {}: {}", name, offset, kind);
//! debug_log!("{} {} → {}", method, path, kind);
//! ```

/// Per-step detail of matching and lazy construction
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// One line per request handled by the router
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Configuration or lookup problems reported alongside an error or a skipped key
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// A route broke the match result contract
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand_with_any_backend() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (name, offset) = ("child", 4);

        crate::trace_log!("Child '{}' at offset {}", name, offset);
        crate::debug_log!("GET /foo → {}", "success");
        crate::info_log!("Router configured with {} root routes", 1);
        crate::warn_log!("Ignoring unknown generic route option '{}'", "colour");
        crate::error_log!("Route '{}' reported success", name);
    }
}
