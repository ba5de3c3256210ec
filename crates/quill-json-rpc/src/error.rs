use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::RequestId;

/// Fixed JSON-RPC 2.0 error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorKind {
    pub fn code(&self) -> i64 {
        match self {
            ErrorKind::ParseError => -32700,
            ErrorKind::InvalidRequest => -32600,
            ErrorKind::MethodNotFound => -32601,
            ErrorKind::InvalidParams => -32602,
            ErrorKind::InternalError => -32603,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::ParseError => "Parse error",
            ErrorKind::InvalidRequest => "Invalid Request",
            ErrorKind::MethodNotFound => "Method not found",
            ErrorKind::InvalidParams => "Invalid params",
            ErrorKind::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.default_message())
    }
}

/// A protocol-level failure raised by the parser, validator or dispatcher.
///
/// Ephemeral: constructed at the failure site and consumed by response
/// assembly (server) or surfaced to the caller (client).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ProtocolError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ProtocolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i64 {
        self.kind.code()
    }

    pub fn parse_error() -> Self {
        Self::new(ErrorKind::ParseError, ErrorKind::ParseError.default_message())
    }

    pub fn invalid_request() -> Self {
        Self::new(
            ErrorKind::InvalidRequest,
            ErrorKind::InvalidRequest.default_message(),
        )
    }

    /// Method names beginning with `rpc.` are reserved by the spec.
    pub fn reserved_prefix() -> Self {
        Self::new(
            ErrorKind::InvalidRequest,
            "Illegal method name; method names beginning with 'rpc.' are reserved",
        )
    }

    pub fn version_mismatch() -> Self {
        Self::new(
            ErrorKind::InvalidRequest,
            "Client/server JSON-RPC version mismatch; expected '2.0'",
        )
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            ErrorKind::MethodNotFound,
            format!("Method '{}' not found", method),
        )
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    pub fn internal_error() -> Self {
        Self::new(
            ErrorKind::InternalError,
            ErrorKind::InternalError.default_message(),
        )
    }
}

/// Wire-level error object carried inside an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<ProtocolError> for ErrorObject {
    fn from(err: ProtocolError) -> Self {
        Self {
            code: err.kind.code(),
            message: err.message,
            data: None,
        }
    }
}

/// A complete JSON-RPC error response.
///
/// `id` deliberately has no `skip_serializing_if`: a request whose id is
/// unknowable (parse error, malformed batch element) answers with `"id": null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: String,
    pub error: ErrorObject,
    pub id: Option<RequestId>,
}

impl JsonRpcError {
    pub fn new(id: Option<RequestId>, error: ErrorObject) -> Self {
        Self {
            version: crate::JSONRPC_VERSION.to_string(),
            error,
            id,
        }
    }

    pub fn from_protocol(id: Option<RequestId>, err: ProtocolError) -> Self {
        Self::new(id, err.into())
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON-RPC error {}: {}",
            self.error.code, self.error.message
        )
    }
}

impl std::error::Error for JsonRpcError {}

/// Failure raised while invoking a handler.
///
/// Protocol errors propagate unchanged into the response; anything else is
/// caught at the server boundary and replaced by a generic internal error so
/// handler failure details never reach the wire.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Rpc(#[from] ProtocolError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// An opaque handler failure with a message. Only the generic internal
    /// error message reaches the wire.
    pub fn other(message: impl Into<String>) -> Self {
        HandlerError::Other(anyhow::anyhow!(message.into()))
    }
}
