use std::fmt;

use serde::Deserialize;

/// Errors from the REST client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, timeout, bad body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Vec<String>,
    },
}

/// Error body written by the server: `{error, code, details?}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    code: String,
    #[serde(default)]
    details: Vec<String>,
}

impl ClientError {
    /// Build an [`ClientError::Api`] from a failed response's status and
    /// body. Bodies that are not the JSON error envelope are kept as the
    /// message with code `UNKNOWN`.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => ClientError::Api {
                status,
                code: envelope.code,
                message: envelope.error,
                details: envelope.details,
            },
            Err(_) => ClientError::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: body.trim().to_string(),
                details: Vec::new(),
            },
        }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// A transient, user-facing message describing a failed operation.
///
/// Carries the server's message verbatim when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub status: Option<u16>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ClientError> for Notice {
    fn from(err: ClientError) -> Self {
        let status = err.status();
        let message = match err {
            ClientError::Api { message, .. } if !message.is_empty() => message,
            other => other.to_string(),
        };
        Self { message, status }
    }
}
