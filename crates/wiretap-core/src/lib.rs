//! Pipeline contract for the wiretap HTTP client middleware.
//!
//! This crate defines the pieces a chain-of-responsibility HTTP client
//! pipeline exposes to its middleware:
//!
//! - `request` / `response`: the exchange model, with buffered request
//!   [`Payload`]s and response bodies that can be captured without being
//!   consumed ([`ResponseBody::buffer`])
//! - `middleware`: the [`Middleware`] trait, the [`Next`] proceed
//!   capability, and [`MiddlewareStack`] composition
//! - `error`: [`TransportError`], re-raised unchanged through the chain
//!
//! No transport lives here: the crate models the seam between an HTTP
//! client and the middleware observing it.

pub mod error;
pub mod middleware;
pub mod request;
pub mod response;

/// Transport failures
pub use error::TransportError;

/// Chain composition
pub use middleware::{
    BoxedTransport, ConnectionInfo, Middleware, MiddlewareStack, Next, ResponseFuture,
};

/// Exchange model
pub use request::{Payload, Request};
pub use response::{Response, ResponseBody};
