//! Verbosity levels for traffic inspection.

/// How much of each intercepted exchange gets reported.
///
/// Levels escalate: `Headers` adds header capture to `Basic`, and `Body`
/// adds full body capture to `Headers`. The level is fixed per
/// [`TrafficInspector`](crate::TrafficInspector) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Report nothing; the inspector is a pure pass-through.
    None,
    /// Request/response lines, protocol, timing and body sizes.
    Basic,
    /// `Basic` plus request and response headers.
    Headers,
    /// `Headers` plus request and response bodies.
    Body,
}

impl Default for Level {
    fn default() -> Self {
        Level::Basic
    }
}
