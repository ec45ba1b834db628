use thiserror::Error;

/// Failures of the HTTP round trip itself.
///
/// Status failures are not classified further: a missing file and a server
/// fault both arrive as [`TransportError::Status`].
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} returned status {status}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode response for '{uri}': {source}")]
    Decode {
        uri: String,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Response for '{path}' has no '{field}' field")]
    MissingField { path: String, field: &'static str },

    #[error("Invalid content encoding for '{path}': {message}")]
    ContentEncoding { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the remote service answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Transport(e) if e.status() == Some(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = Error::Transport(TransportError::Status {
            status: 404,
            url: "https://gitlab.example.com".to_string(),
            body: String::new(),
        });
        assert!(err.is_not_found());

        let err = Error::Transport(TransportError::Status {
            status: 500,
            url: "https://gitlab.example.com".to_string(),
            body: String::new(),
        });
        assert!(!err.is_not_found());

        let err = Error::InvalidArgument("bad".to_string());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_status_display() {
        let err = TransportError::Status {
            status: 401,
            url: "https://gitlab.example.com/api/v4".to_string(),
            body: "{\"message\":\"401 Unauthorized\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request to https://gitlab.example.com/api/v4 returned status 401"
        );
    }
}
