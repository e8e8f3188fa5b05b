//! Client error types.

use palette_core::PaletteError;
use thiserror::Error;

/// Errors from talking to the agent service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (refused, timed out, DNS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a failure of the connection check.
    pub fn into_connection(self) -> PaletteError {
        PaletteError::Connection(self.to_string())
    }

    /// Map a failure fetching `resource` over an established connection.
    pub fn into_fetch(self, resource: &'static str) -> PaletteError {
        PaletteError::Fetch {
            resource,
            message: self.to_string(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_display() {
        let err = ClientError::Status {
            status: 503,
            body: "starting".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: starting");
    }

    #[test]
    fn maps_to_connection() {
        let err = ClientError::Status {
            status: 502,
            body: String::new(),
        };
        assert_matches!(err.into_connection(), PaletteError::Connection(msg) if msg.contains("502"));
    }

    #[test]
    fn maps_to_fetch() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = ClientError::from(json_err).into_fetch("commands");
        assert!(err.is_fetch_failure());
        assert_matches!(err, PaletteError::Fetch { resource: "commands", .. });
    }
}
