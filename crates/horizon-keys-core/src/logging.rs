//! Logging facilities for Horizon Keys.
//!
//! Horizon Keys uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_keys=debug")
//!         .init();
//! }
//! ```
//!
//! Every subsystem logs under one of the [`targets`], so a directive such as
//! `horizon_keys::state=trace` isolates the binding state machine.

/// Target names for log filtering.
pub mod targets {
    /// Root target for the dispatch engine.
    pub const KEYS: &str = "horizon_keys";
    /// Event filtering and command execution.
    pub const DISPATCH: &str = "horizon_keys::dispatch";
    /// Binding state transitions and resets.
    pub const STATE: &str = "horizon_keys::state";
    /// Out-of-order key configuration and re-routing.
    pub const OUT_OF_ORDER: &str = "horizon_keys::out_of_order";
    /// Multi-stroke assist scheduling.
    pub const ASSIST: &str = "horizon_keys::assist";
    /// Command and binding registry.
    pub const REGISTRY: &str = "horizon_keys::registry";
    /// Timer queue.
    pub const TIMER: &str = "horizon_keys_core::timer";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time a whole key event through filtering and dispatch.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_keys::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Wrappers around the `tracing` macros with the crate's root target.
#[macro_export]
macro_rules! keys_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_keys", $($arg)*)
    };
}

#[macro_export]
macro_rules! keys_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_keys", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_root() {
        for target in [
            targets::DISPATCH,
            targets::STATE,
            targets::OUT_OF_ORDER,
            targets::ASSIST,
            targets::REGISTRY,
        ] {
            assert!(target.starts_with(targets::KEYS));
        }
    }

    #[test]
    fn test_perf_span() {
        let subscriber = tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("key_event");
            crate::keys_trace!("inside span");
        });
    }
}
