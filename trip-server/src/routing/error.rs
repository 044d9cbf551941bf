//! Routing client error types.

use std::fmt;

/// Errors from the routing provider.
#[derive(Debug)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Routing backend returned an error status code
    Api { status: u16, message: String },

    /// The backend answered but found no route through the waypoints
    NoRoute,

    /// Response was well-formed JSON but violated the routing protocol
    Protocol(String),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::Http(e) => write!(f, "HTTP error: {e}"),
            RoutingError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RoutingError::Api { status, message } => {
                write!(f, "routing API error {status}: {message}")
            }
            RoutingError::NoRoute => write!(f, "no route found through the given waypoints"),
            RoutingError::Protocol(msg) => write!(f, "routing protocol violation: {msg}"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::Http(err)
    }
}
