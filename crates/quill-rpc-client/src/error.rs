//! Error types for client operations.
//!
//! Client-side failures are deliberately distinct from wire-level protocol
//! errors: they mark a broken client/server contract (transport failure,
//! undecodable body, id mismatch), not the outcome of a specific request,
//! and are never encoded as a response.

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Undecodable response body
    #[error("Unable to decode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered a single call with an error response
    #[error("Server error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    /// A violation of the client/server contract itself
    #[error("{0}")]
    Contract(String),
}

impl ClientError {
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    pub fn missing_id() -> Self {
        Self::Contract("Missing id in response".to_string())
    }

    pub fn extra_ids() -> Self {
        Self::Contract("Extra id(s) in response".to_string())
    }

    /// Get the error code if this is a server-returned error
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Transport-specific errors
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Unsupported transport: {0}")]
    Unsupported(String),

    #[error("Transport closed unexpectedly")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_messages() {
        assert_eq!(ClientError::missing_id().to_string(), "Missing id in response");
        assert_eq!(ClientError::extra_ids().to_string(), "Extra id(s) in response");
    }

    #[test]
    fn test_error_code_extraction() {
        let err = ClientError::Rpc {
            code: -32601,
            message: "Method not found".to_string(),
        };
        assert_eq!(err.error_code(), Some(-32601));
        assert_eq!(ClientError::missing_id().error_code(), None);
    }
}
