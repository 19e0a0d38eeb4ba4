//! Diagnostics for the router.
//!
//! The search reports a summary of each run and warns when it gives up and
//! falls back to a plain elbow. The lane pass notes every offset it declines,
//! and scenes log one line per routed connection. Call sites use structured
//! fields (`id = %id`, `start = ?point`) so a subscriber can filter on them.
//!
//! With the `tracing` feature these forward to `tracing`; without it the
//! arguments are dropped unevaluated.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! route_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! route_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {route_debug as debug, route_warn as warn};

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_take_structured_fields() {
        super::debug!(id = %"c1", cells = 4usize, "lane offset declined");
        super::warn!(start = ?(0.0, 20.0), "no path found, using fallback");
    }
}
