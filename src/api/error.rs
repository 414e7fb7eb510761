//! API error type

use std::fmt;

/// Failure of a request against the marketplace API
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection, timeout or body transfer failure
    Network(String),
    /// Non-2xx response; `message` is the server's `message` field when present
    Status { status: u16, message: Option<String> },
    /// Response body was not the expected JSON
    Decode(String),
}

impl ApiError {
    /// Server-provided message of a non-2xx response
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(m), ..
            } => Some(m.as_str()),
            _ => None,
        }
    }

    /// Whether the request failed before a response status was seen
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Message for a non-2xx response, or `fallback` for anything else
    /// that reached the server
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status {
                status,
                message: Some(message),
            } => write!(f, "API error ({}): {}", status, message),
            Self::Status {
                status,
                message: None,
            } => write!(f, "API error ({})", status),
            Self::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
