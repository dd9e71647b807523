use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::payload::QrRequest;

/// Fallback when the server fails without a usable error body.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Shown when the request never completed.
pub const NETWORK_ERROR: &str = "Failed to reach server.";

/// Success body of `POST /api/qrcode`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QrResponse {
    /// Data-URL encoded PNG.
    pub image: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-2xx status; `body` is the raw response text, possibly empty.
    #[error("server rejected the request")]
    Status { body: String },
    /// The request never completed.
    #[error("no response from server")]
    Unreachable,
}

impl TransportError {
    /// User-facing message, matching the service contract: a server-supplied
    /// `error` field verbatim, otherwise a generic fallback per failure
    /// class.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Status { body } => {
                #[derive(Deserialize)]
                struct ErrorBody {
                    #[serde(default)]
                    error: Option<String>,
                }
                serde_json::from_str::<ErrorBody>(body)
                    .ok()
                    .and_then(|b| b.error)
                    .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string())
            }
            TransportError::Unreachable => NETWORK_ERROR.to_string(),
        }
    }
}

/// Seam over the QR service so the submission flow can be exercised
/// without a live server.
pub trait Transport: Send + Sync {
    fn post_qrcode(&self, request: &QrRequest) -> Result<QrResponse, TransportError>;
}

/// Blocking HTTP transport. Lives on the submission worker thread, never
/// on the render thread.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: format!("{}/api/qrcode", base_url.trim_end_matches('/')),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?,
            endpoint: format!("{}/api/qrcode", base_url.trim_end_matches('/')),
        })
    }
}

impl Transport for HttpTransport {
    fn post_qrcode(&self, request: &QrRequest) -> Result<QrResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| {
                log::error!("qr request failed: {e}");
                TransportError::Unreachable
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::warn!("qr service returned {status}: {body}");
            return Err(TransportError::Status { body });
        }

        response.json::<QrResponse>().map_err(|e| {
            log::error!("qr response was not valid JSON: {e}");
            TransportError::Status { body: String::new() }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_field_is_surfaced_verbatim() {
        let err = TransportError::Status {
            body: r#"{ "error": "bad request" }"#.into(),
        };
        assert_eq!(err.user_message(), "bad request");
    }

    #[test]
    fn unparsable_body_falls_back_to_generic_message() {
        let err = TransportError::Status {
            body: "<html>502</html>".into(),
        };
        assert_eq!(err.user_message(), GENERIC_SERVER_ERROR);
    }

    #[test]
    fn parsable_body_without_error_field_falls_back() {
        let err = TransportError::Status { body: "{}".into() };
        assert_eq!(err.user_message(), GENERIC_SERVER_ERROR);
    }

    #[test]
    fn unreachable_maps_to_connectivity_message() {
        assert_eq!(TransportError::Unreachable.user_message(), NETWORK_ERROR);
    }
}
