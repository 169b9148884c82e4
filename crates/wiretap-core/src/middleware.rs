//! Middleware chain for the wiretap pipeline.
//!
//! A request passes through an ordered stack of middleware before reaching
//! the transport. Each middleware receives the request and a [`Next`]
//! capability that forwards to the rest of the chain; the response (or the
//! transport failure) unwinds back through the same stack.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut stack = MiddlewareStack::new();
//! stack.push(Box::new(TrafficInspector::new()));
//! let response = stack.execute(request, transport).await?;
//! ```

use crate::error::TransportError;
use crate::request::Request;
use crate::response::Response;
use http::Version;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future type returned by middleware and transports.
pub type ResponseFuture =
    Pin<Box<dyn Future<Output = Result<Response, TransportError>> + Send + 'static>>;

/// A boxed transport function: the innermost handler that performs the
/// actual exchange.
pub type BoxedTransport = Arc<dyn Fn(Request) -> ResponseFuture + Send + Sync>;

/// What is known about the connection the exchange will use.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionInfo {
    protocol: Version,
}

impl ConnectionInfo {
    /// Connection info with a negotiated protocol.
    pub fn new(protocol: Version) -> Self {
        Self { protocol }
    }

    /// The negotiated protocol.
    pub fn protocol(&self) -> Version {
        self.protocol
    }
}

/// The proceed capability handed to middleware.
///
/// Forwards the request to the rest of the chain and exposes the active
/// connection's details when the pipeline position has them.
pub struct Next {
    inner: BoxedTransport,
    connection: Option<ConnectionInfo>,
}

impl Next {
    /// Wrap a downstream handler.
    pub fn new(inner: BoxedTransport) -> Self {
        Self {
            inner,
            connection: None,
        }
    }

    /// Attach connection details.
    pub fn with_connection(mut self, connection: ConnectionInfo) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Connection details, when already negotiated.
    pub fn connection(&self) -> Option<ConnectionInfo> {
        self.connection
    }

    /// Forward the request to the next handler in the chain.
    pub async fn proceed(self, request: Request) -> Result<Response, TransportError> {
        (self.inner)(request).await
    }
}

/// Trait for middleware observing or transforming exchanges in the chain.
pub trait Middleware: Send + Sync + 'static {
    /// Handle `request`, calling `next.proceed(request)` to continue the
    /// chain.
    fn call(&self, request: Request, next: Next) -> ResponseFuture;

    /// Clone this middleware into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Middleware>;
}

impl Clone for Box<dyn Middleware> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An ordered stack of middleware.
#[derive(Clone, Default)]
pub struct MiddlewareStack {
    layers: Vec<Box<dyn Middleware>>,
    connection: Option<ConnectionInfo>,
}

impl MiddlewareStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            connection: None,
        }
    }

    /// Add a middleware to the stack.
    ///
    /// Middleware execute in the order they are added (outermost first).
    pub fn push(&mut self, layer: Box<dyn Middleware>) {
        self.layers.push(layer);
    }

    /// Record connection details to hand to every middleware in the stack.
    pub fn with_connection(mut self, connection: ConnectionInfo) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Get the number of middleware in the stack.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Execute the stack with a final transport.
    ///
    /// The chain is built from the inside out so the first middleware added
    /// is the first to see the request and the last to see the response.
    pub fn execute(&self, request: Request, transport: BoxedTransport) -> ResponseFuture {
        if self.layers.is_empty() {
            return transport(request);
        }

        let connection = self.connection;
        let mut next = transport;

        for layer in self.layers.iter().rev() {
            let layer = layer.clone_box();
            let current_next = next;
            next = Arc::new(move |request: Request| {
                let mut chain = Next::new(current_next.clone());
                if let Some(connection) = connection {
                    chain = chain.with_connection(connection);
                }
                layer.call(request, chain)
            });
        }

        next(request)
    }
}
