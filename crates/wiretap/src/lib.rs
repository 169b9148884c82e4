//! Traffic inspection middleware for HTTP client pipelines.
//!
//! The [`TrafficInspector`] sits in a chain of request handlers, watches
//! each exchange go by, and reports structured events (method, URL,
//! headers, bodies, timing, status) to a pluggable [`Analytics`] sink. The
//! exchange itself is never altered: requests pass through untouched and
//! response bodies stay fully readable by the caller even when the
//! inspector captured them.
//!
//! What gets captured is governed by the [`Level`]:
//!
//! - [`Level::None`]: pure pass-through, no events, no sink
//! - [`Level::Basic`]: request/response lines, protocol, timing, sizes
//! - [`Level::Headers`]: `Basic` plus headers
//! - [`Level::Body`]: `Headers` plus bodies, when they sniff as text
//!
//! Bodies are only reported in full when their media type is textual and a
//! bounded peek at the leading bytes decodes cleanly (see [`sniff`]);
//! compressed or binary bodies are summarized instead of dumped.
//!
//! # Example
//!
//! ```rust,ignore
//! use wiretap::{Level, LogFormat, TracingAnalyticsFactory, TrafficInspector};
//! use wiretap_core::MiddlewareStack;
//!
//! let inspector = TrafficInspector::new()
//!     .with_level(Level::Headers)
//!     .with_factory(std::sync::Arc::new(
//!         TracingAnalyticsFactory::new().format(LogFormat::Json),
//!     ));
//!
//! let mut stack = MiddlewareStack::new();
//! stack.push(Box::new(inspector));
//! let response = stack.execute(request, transport).await?;
//! ```

pub mod analytics;
pub mod inspector;
pub mod level;
pub mod log;
pub mod sniff;

/// Event sink contract
pub use analytics::{Analytics, AnalyticsFactory, HeaderSnapshot};

/// The middleware
pub use inspector::TrafficInspector;

/// Verbosity
pub use level::Level;

/// Default tracing-backed sink
pub use log::{LogFormat, TracingAnalytics, TracingAnalyticsFactory};

/// Pipeline contract, re-exported for downstream users
pub use wiretap_core::{
    ConnectionInfo, Middleware, MiddlewareStack, Next, Payload, Request, Response, ResponseBody,
    TransportError,
};
