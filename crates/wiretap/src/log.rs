//! Default sink: human-readable traffic lines via `tracing`.

use crate::analytics::{Analytics, AnalyticsFactory, HeaderSnapshot};
use wiretap_core::TransportError;

/// Output format for [`TracingAnalytics`].
#[derive(Clone, Debug)]
pub enum LogFormat {
    /// One human-readable line per event.
    Compact,
    /// One JSON object per event (structured logging).
    Json,
}

/// [`Analytics`] sink that writes each session event as a `tracing` line.
///
/// Request/response lines go out at `info`; individual header and body
/// lines at `debug`, since they can be large.
pub struct TracingAnalytics {
    format: LogFormat,
}

impl TracingAnalytics {
    /// Create a sink with the given format.
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    fn headers_json(headers: &HeaderSnapshot) -> serde_json::Value {
        serde_json::Value::Array(
            headers
                .iter()
                .map(|(name, value)| serde_json::json!({ "name": name, "value": value }))
                .collect(),
        )
    }
}

impl Analytics for TracingAnalytics {
    fn start(&mut self, method: &str, url: &str, summary: Option<&str>) {
        match self.format {
            LogFormat::Compact => match summary {
                Some(summary) => tracing::info!("--> {method} {url} ({summary})"),
                None => tracing::info!("--> {method} {url}"),
            },
            LogFormat::Json => tracing::info!(
                "{}",
                serde_json::json!({
                    "event": "start", "method": method, "url": url, "summary": summary,
                })
            ),
        }
    }

    fn connection(&mut self, protocol: &str) {
        match self.format {
            LogFormat::Compact => tracing::debug!("connection {protocol}"),
            LogFormat::Json => tracing::debug!(
                "{}",
                serde_json::json!({ "event": "connection", "protocol": protocol })
            ),
        }
    }

    fn request_headers(&mut self, headers: &HeaderSnapshot) {
        match self.format {
            LogFormat::Compact => {
                for (name, value) in headers.iter() {
                    tracing::debug!("--> {name}: {value}");
                }
            }
            LogFormat::Json => tracing::debug!(
                "{}",
                serde_json::json!({
                    "event": "requestHeaders", "headers": Self::headers_json(headers),
                })
            ),
        }
    }

    fn request_plaintext_body(&mut self, text: &str) {
        match self.format {
            LogFormat::Compact => tracing::debug!("--> body:\n{text}"),
            LogFormat::Json => tracing::debug!(
                "{}",
                serde_json::json!({ "event": "requestPlaintextBody", "body": text })
            ),
        }
    }

    fn request_omitted(&mut self, method: &str, note: Option<&str>) {
        match self.format {
            LogFormat::Compact => match note {
                Some(note) => tracing::info!("--> END {method} ({note})"),
                None => tracing::info!("--> END {method}"),
            },
            LogFormat::Json => tracing::info!(
                "{}",
                serde_json::json!({
                    "event": "requestOmitted", "method": method, "note": note,
                })
            ),
        }
    }

    fn response(&mut self) {
        match self.format {
            LogFormat::Compact => tracing::debug!("<-- response received"),
            LogFormat::Json => {
                tracing::debug!("{}", serde_json::json!({ "event": "response" }))
            }
        }
    }

    fn error(&mut self, url: &str, error: &TransportError) {
        match self.format {
            LogFormat::Compact => tracing::warn!("<-- FAILED {url}: {error}"),
            LogFormat::Json => tracing::warn!(
                "{}",
                serde_json::json!({
                    "event": "error", "url": url, "detail": error.to_string(),
                })
            ),
        }
    }

    fn status(&mut self, code: u16, reason: &str, url: &str, took_ms: u64, note: &str) {
        match self.format {
            LogFormat::Compact => {
                tracing::info!("<-- {code} {reason} {url} ({took_ms}ms, {note})")
            }
            LogFormat::Json => tracing::info!(
                "{}",
                serde_json::json!({
                    "event": "status", "code": code, "reason": reason,
                    "url": url, "tookMs": took_ms, "note": note,
                })
            ),
        }
    }

    fn response_headers(&mut self, headers: &HeaderSnapshot) {
        match self.format {
            LogFormat::Compact => {
                for (name, value) in headers.iter() {
                    tracing::debug!("<-- {name}: {value}");
                }
            }
            LogFormat::Json => tracing::debug!(
                "{}",
                serde_json::json!({
                    "event": "responseHeaders", "headers": Self::headers_json(headers),
                })
            ),
        }
    }

    fn response_plaintext_body(&mut self, text: &str) {
        match self.format {
            LogFormat::Compact => tracing::debug!("<-- body:\n{text}"),
            LogFormat::Json => tracing::debug!(
                "{}",
                serde_json::json!({ "event": "responsePlaintextBody", "body": text })
            ),
        }
    }

    fn response_omitted(&mut self, method: &str, note: Option<&str>) {
        match self.format {
            LogFormat::Compact => match note {
                Some(note) => tracing::info!("<-- END {method} ({note})"),
                None => tracing::info!("<-- END {method}"),
            },
            LogFormat::Json => tracing::info!(
                "{}",
                serde_json::json!({
                    "event": "responseOmitted", "method": method, "note": note,
                })
            ),
        }
    }

    fn finish(&mut self, content_length: Option<u64>) {
        match self.format {
            LogFormat::Compact => match content_length {
                Some(n) => tracing::debug!("exchange finished ({n} bytes declared)"),
                None => tracing::debug!("exchange finished (unknown length)"),
            },
            LogFormat::Json => tracing::debug!(
                "{}",
                serde_json::json!({ "event": "finish", "contentLength": content_length })
            ),
        }
    }

    fn end(&mut self) {
        match self.format {
            LogFormat::Compact => tracing::debug!("session closed"),
            LogFormat::Json => tracing::debug!("{}", serde_json::json!({ "event": "end" })),
        }
    }
}

/// Default factory: one [`TracingAnalytics`] per intercepted call.
#[derive(Clone, Debug)]
pub struct TracingAnalyticsFactory {
    format: LogFormat,
}

impl TracingAnalyticsFactory {
    /// Create a factory producing compact-format sinks.
    pub fn new() -> Self {
        Self {
            format: LogFormat::Compact,
        }
    }

    /// Set the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for TracingAnalyticsFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsFactory for TracingAnalyticsFactory {
    fn analytics(&self) -> Box<dyn Analytics> {
        Box::new(TracingAnalytics::new(self.format.clone()))
    }
}
