//! Event sink contract for intercepted traffic.
//!
//! A sink observes exactly one *session*: the event sequence for one
//! intercepted call, opened by [`Analytics::start`] and closed by exactly
//! one [`Analytics::end`], whatever the outcome of the exchange. Sinks are
//! created per call through an [`AnalyticsFactory`], so implementations
//! never see two exchanges at once and need no internal synchronization.

use http::HeaderMap;
use wiretap_core::TransportError;

/// An ordered, immutable snapshot of header names and values.
///
/// Produced by the inspector's redaction/merge step; iteration order is the
/// order the entries were listed, and lookups compare names
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSnapshot {
    entries: Vec<(String, String)>,
}

impl HeaderSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a header collection verbatim, in iteration order.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut snapshot = Self::new();
        for (name, value) in headers {
            snapshot.push(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        snapshot
    }

    /// Append an entry.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value recorded under `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-session event sink for one intercepted exchange.
///
/// Methods fire in session order; see the crate docs for the exact
/// sequencing. Receivers are `&mut self`; one instance serves one session
/// on the task driving the exchange.
pub trait Analytics: Send {
    /// A session opened for `method` on `url`. `summary` describes the
    /// request body when headers will not be reported separately.
    fn start(&mut self, method: &str, url: &str, summary: Option<&str>);

    /// The protocol negotiated on the connection carrying the exchange.
    fn connection(&mut self, protocol: &str);

    /// Redacted request headers, with body-derived `Content-Type` and
    /// `Content-Length` merged in.
    fn request_headers(&mut self, headers: &HeaderSnapshot);

    /// The full request body, decoded as text.
    fn request_plaintext_body(&mut self, text: &str);

    /// Terminal request-body event; `note` says how (or why) the body was
    /// left out of the full report.
    fn request_omitted(&mut self, method: &str, note: Option<&str>);

    /// The forwarded call returned.
    fn response(&mut self);

    /// The forwarded call failed. The session closes right after this
    /// event and the failure is re-raised to the caller.
    fn error(&mut self, url: &str, error: &TransportError);

    /// Response status line, with the final URL (post-redirect) and the
    /// elapsed time of the forwarded call.
    fn status(&mut self, code: u16, reason: &str, url: &str, took_ms: u64, note: &str);

    /// Raw response headers.
    fn response_headers(&mut self, headers: &HeaderSnapshot);

    /// The full response body, decoded as text.
    fn response_plaintext_body(&mut self, text: &str);

    /// Terminal response-body event, mirroring
    /// [`request_omitted`](Analytics::request_omitted).
    fn response_omitted(&mut self, method: &str, note: Option<&str>);

    /// Exchange complete; the declared response content length, when known.
    fn finish(&mut self, content_length: Option<u64>);

    /// The session closed. Fires exactly once per `start`.
    fn end(&mut self);
}

/// Produces one fresh [`Analytics`] sink per intercepted call.
pub trait AnalyticsFactory: Send + Sync {
    /// Create a sink for a single session.
    fn analytics(&self) -> Box<dyn Analytics>;
}
