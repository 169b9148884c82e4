//! Request types for the wiretap pipeline.

use bytes::Bytes;
use http::header::IntoHeaderName;
use http::{HeaderMap, HeaderValue, Method, Uri, Version};
use mime::Mime;

/// A buffered request body with its declared media type.
///
/// Outgoing request bodies are write-driven, so the pipeline materializes
/// them up front; the buffered byte count doubles as the declared content
/// length.
#[derive(Debug, Clone)]
pub struct Payload {
    content: Bytes,
    media_type: Option<Mime>,
}

impl Payload {
    /// Create a payload from raw bytes and an optional media type.
    pub fn new(content: impl Into<Bytes>, media_type: Option<Mime>) -> Self {
        Self {
            content: content.into(),
            media_type,
        }
    }

    /// Create a UTF-8 text payload (`text/plain; charset=utf-8`).
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(
            Bytes::from(content.into()),
            Some(mime::TEXT_PLAIN_UTF_8),
        )
    }

    /// Create a JSON payload (`application/json`).
    pub fn json(content: impl Into<String>) -> Self {
        Self::new(Bytes::from(content.into()), Some(mime::APPLICATION_JSON))
    }

    /// The payload bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.content
    }

    /// The declared media type, if any.
    pub fn media_type(&self) -> Option<&Mime> {
        self.media_type.as_ref()
    }

    /// The declared content length in bytes.
    pub fn content_length(&self) -> u64 {
        self.content.len() as u64
    }
}

/// An outgoing HTTP request travelling through the pipeline.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    payload: Option<Payload>,
}

impl Request {
    /// Create a request with the given method and target URI.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            payload: None,
        }
    }

    /// Set the HTTP version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl IntoHeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Attach a body payload.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The target URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body payload, if the request carries one.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }
}
