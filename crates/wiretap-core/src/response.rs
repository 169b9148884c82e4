//! Response types for the wiretap pipeline.

use crate::error::TransportError;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri, Version};
use http_body_util::combinators::BoxBody;
use http_body_util::BodyExt;
use mime::Mime;

/// The body of a response flowing back through the pipeline.
///
/// `Stream` is the live body the final consumer will read. Middleware that
/// wants to look at it must go through [`ResponseBody::buffer`], which reads
/// the stream to completion but leaves every byte in place for the consumer.
pub enum ResponseBody {
    /// A fully materialized body.
    Full(Bytes),
    /// A streaming body not yet read off the wire.
    Stream(BoxBody<Bytes, TransportError>),
}

impl ResponseBody {
    /// An empty body.
    pub fn empty() -> Self {
        Self::Full(Bytes::new())
    }

    /// A fully buffered body.
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        Self::Full(bytes.into())
    }

    /// Force-read the entire body into memory without discarding it.
    ///
    /// After this returns the variant is `Full`, so the final consumer can
    /// still read the complete body. On an already-buffered body this is a
    /// reference-counted clone, not a copy.
    pub async fn buffer(&mut self) -> Result<Bytes, TransportError> {
        let bytes = match std::mem::replace(self, ResponseBody::Full(Bytes::new())) {
            ResponseBody::Full(bytes) => bytes,
            ResponseBody::Stream(body) => body.collect().await?.to_bytes(),
        };
        *self = ResponseBody::Full(bytes.clone());
        Ok(bytes)
    }

    /// Consume the body, reading any remaining stream to completion.
    pub async fn read_to_end(self) -> Result<Bytes, TransportError> {
        match self {
            ResponseBody::Full(bytes) => Ok(bytes),
            ResponseBody::Stream(body) => Ok(body.collect().await?.to_bytes()),
        }
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            ResponseBody::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

/// An HTTP response paired with the request that produced it.
///
/// The request line reflects the *final* request; it may differ from the
/// request originally handed to the pipeline when the transport followed
/// redirects.
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: ResponseBody,
    request_method: Method,
    request_uri: Uri,
}

impl Response {
    /// Create a response for the given final request line.
    pub fn new(status: StatusCode, request_method: Method, request_uri: Uri) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: ResponseBody::empty(),
            request_method,
            request_uri,
        }
    }

    /// Set the HTTP version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Attach the body.
    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    /// The status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase for the status line.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// The HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The response body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Mutable access to the response body.
    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }

    /// Consume the response, returning its body.
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// Method of the request that produced this response.
    pub fn request_method(&self) -> &Method {
        &self.request_method
    }

    /// URI of the request that produced this response.
    pub fn request_uri(&self) -> &Uri {
        &self.request_uri
    }

    /// Declared content length, from the `Content-Length` header.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(header::CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// Parsed `Content-Type` header, when present and well-formed.
    pub fn content_type(&self) -> Option<Mime> {
        self.headers
            .get(header::CONTENT_TYPE)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// Whether HTTP semantics let this response carry a body.
    ///
    /// Responses to HEAD never do. Informational, 204 and 304 responses
    /// only do when a Content-Length or chunked Transfer-Encoding
    /// contradicts the status line.
    pub fn has_body(&self) -> bool {
        if self.request_method == Method::HEAD {
            return false;
        }
        let code = self.status.as_u16();
        if (100..200).contains(&code) || code == 204 || code == 304 {
            return self.content_length().is_some() || self.is_chunked();
        }
        true
    }

    fn is_chunked(&self) -> bool {
        self.headers
            .get(header::TRANSFER_ENCODING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("chunked"))
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("version", &self.version)
            .field("request_method", &self.request_method)
            .field("request_uri", &self.request_uri)
            .field("body", &self.body)
            .finish()
    }
}
