//! The traffic inspector middleware.

use crate::analytics::{Analytics, AnalyticsFactory, HeaderSnapshot};
use crate::level::Level;
use crate::log::TracingAnalyticsFactory;
use crate::sniff;
use http::{header, HeaderMap, Version};
use std::sync::Arc;
use std::time::Instant;
use wiretap_core::{Middleware, Next, Request, Response, ResponseFuture, TransportError};

/// Middleware that reports each intercepted exchange to an analytics sink
/// without altering it.
///
/// The verbosity [`Level`] decides what gets captured; the sink comes from
/// an [`AnalyticsFactory`], one fresh instance per intercepted call. The
/// inspector holds no per-request state, so one instance can serve any
/// number of concurrent exchanges.
///
/// At [`Level::Body`] the entire response body is drained into memory for
/// inspection and handed back intact; memory use is bounded by response
/// size, which is the tradeoff body-level verbosity opts into.
///
/// # Example
///
/// ```rust,ignore
/// use wiretap::{Level, TrafficInspector};
///
/// let mut stack = MiddlewareStack::new();
/// stack.push(Box::new(TrafficInspector::new().with_level(Level::Body)));
/// let response = stack.execute(request, transport).await?;
/// ```
#[derive(Clone)]
pub struct TrafficInspector {
    level: Level,
    factory: Arc<dyn AnalyticsFactory>,
}

impl TrafficInspector {
    /// Create an inspector at [`Level::Basic`] reporting to the default
    /// `tracing` sink.
    pub fn new() -> Self {
        Self {
            level: Level::Basic,
            factory: Arc::new(TracingAnalyticsFactory::new()),
        }
    }

    /// Set the verbosity level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the sink factory.
    pub fn with_factory(mut self, factory: Arc<dyn AnalyticsFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// The configured verbosity level.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TrafficInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for TrafficInspector {
    fn call(&self, request: Request, next: Next) -> ResponseFuture {
        if self.level == Level::None {
            return Box::pin(async move { next.proceed(request).await });
        }

        let level = self.level;
        let factory = self.factory.clone();
        Box::pin(async move { inspect(level, factory.as_ref(), request, next).await })
    }

    fn clone_box(&self) -> Box<dyn Middleware> {
        Box::new(self.clone())
    }
}

/// Run one observed session: start event through end event, re-raising any
/// transport failure unchanged.
async fn inspect(
    level: Level,
    factory: &dyn AnalyticsFactory,
    request: Request,
    next: Next,
) -> Result<Response, TransportError> {
    let mut analytics = factory.analytics();

    let log_body = level == Level::Body;
    let log_headers = log_body || level == Level::Headers;

    let method = request.method().as_str().to_string();
    let url = request.uri().to_string();

    let summary = match request.payload() {
        Some(payload) if !log_headers => Some(format!("{}-byte body", payload.content_length())),
        _ => None,
    };
    analytics.start(&method, &url, summary.as_deref());

    let protocol = next
        .connection()
        .map(|c| c.protocol())
        .unwrap_or(Version::HTTP_11);
    analytics.connection(&format!("{protocol:?}"));

    if log_headers {
        analytics.request_headers(&redacted_request_headers(&request));
        report_request_body(analytics.as_mut(), &request, &method, log_body);
    }

    let started = Instant::now();
    let mut response = match next.proceed(request).await {
        Ok(response) => response,
        Err(err) => {
            analytics.error(&url, &err);
            analytics.end();
            return Err(err);
        }
    };
    analytics.response();
    let took_ms = started.elapsed().as_millis() as u64;

    let content_length = response.content_length();
    let length_note = match content_length {
        Some(n) => format!("{n}-byte body"),
        None => "unknown-length body".to_string(),
    };
    let final_url = response.request_uri().to_string();
    analytics.status(
        response.status().as_u16(),
        response.reason(),
        &final_url,
        took_ms,
        &length_note,
    );

    if log_headers {
        analytics.response_headers(&HeaderSnapshot::from_headers(response.headers()));

        let response_method = response.request_method().as_str().to_string();
        if !log_body || !response.has_body() {
            analytics.response_omitted(&response_method, None);
        } else if body_encoded(response.headers()) {
            analytics.response_omitted(&response_method, Some("encoded body omitted"));
        } else {
            let buffered = match response.body_mut().buffer().await {
                Ok(bytes) => bytes,
                Err(err) => {
                    // The live body died mid-read; close the session the
                    // same way a failed proceed would.
                    analytics.error(&final_url, &err);
                    analytics.end();
                    return Err(err);
                }
            };

            let media_type = response.content_type();
            if sniff::is_plaintext(media_type.as_ref(), &buffered) {
                if content_length != Some(0) {
                    analytics.response_plaintext_body(&sniff::decode_body(
                        media_type.as_ref(),
                        &buffered,
                    ));
                }
                analytics.response_omitted(
                    &response_method,
                    Some(format!("{}-byte body", buffered.len()).as_str()),
                );
            } else {
                analytics.response_omitted(
                    &response_method,
                    Some(format!("binary {}-byte body omitted", buffered.len()).as_str()),
                );
            }
        }
    }

    analytics.finish(content_length);
    analytics.end();

    Ok(response)
}

/// Terminal request-body reporting: exactly one of the plaintext, binary,
/// encoded or skipped outcomes.
fn report_request_body(
    analytics: &mut dyn Analytics,
    request: &Request,
    method: &str,
    log_body: bool,
) {
    let payload = match request.payload() {
        Some(payload) if log_body => payload,
        _ => {
            analytics.request_omitted(method, None);
            return;
        }
    };

    if body_encoded(request.headers()) {
        analytics.request_omitted(method, Some("encoded body omitted"));
        return;
    }

    let bytes = payload.bytes();
    if sniff::is_plaintext(payload.media_type(), bytes) {
        analytics.request_plaintext_body(&sniff::decode_body(payload.media_type(), bytes));
        analytics.request_omitted(
            method,
            Some(format!("plaintext {}-byte body", payload.content_length()).as_str()),
        );
    } else {
        analytics.request_omitted(
            method,
            Some(format!("binary {}-byte body", payload.content_length()).as_str()),
        );
    }
}

/// Build the redacted request-header snapshot.
///
/// Content-Type and Content-Length come from the payload itself: at some
/// pipeline positions they are not on the header list yet, and when they
/// are, the payload's values win. Every other header is listed verbatim in
/// order.
fn redacted_request_headers(request: &Request) -> HeaderSnapshot {
    let mut snapshot = HeaderSnapshot::new();
    if let Some(payload) = request.payload() {
        if let Some(media_type) = payload.media_type() {
            snapshot.push("Content-Type", media_type.to_string());
        }
        snapshot.push("Content-Length", payload.content_length().to_string());
    }
    for (name, value) in request.headers() {
        if *name == header::CONTENT_TYPE || *name == header::CONTENT_LENGTH {
            continue;
        }
        snapshot.push(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    snapshot
}

fn body_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.eq_ignore_ascii_case("identity"))
}
