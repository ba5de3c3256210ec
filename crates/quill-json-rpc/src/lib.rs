//! # JSON-RPC 2.0 Protocol Engine
//!
//! A pure, transport-agnostic JSON-RPC 2.0 implementation: message model,
//! structural validation, batch semantics and method dispatch, without any
//! transport-specific code.
//!
//! ## Features
//! - Full JSON-RPC 2.0 specification compliance
//! - Transport agnostic (works with HTTP, pipes, sockets, etc.)
//! - Explicit registry dispatch: `(namespace, method)` -> typed callable
//! - Batch processing with deterministic response ordering and notification
//!   suppression
//! - Fixed error taxonomy with spec-compliant codes

pub mod dispatch;
pub mod error;
pub mod notification;
pub mod prelude;
pub mod request;
pub mod response;
pub mod server;
pub mod types;
pub mod validate;

// Re-export main types
pub use dispatch::{MethodRegistry, MethodSpec, RpcService, ServiceMap, split_method};
pub use error::{ErrorKind, ErrorObject, HandlerError, JsonRpcError, ProtocolError};
pub use notification::JsonRpcNotification;
pub use request::{BatchItem, Incoming, JsonRpcRequest, RequestParams};
pub use response::{JsonRpcMessage, JsonRpcResponse};
pub use server::JsonRpcServer;
pub use types::{IdSlot, RequestId};
pub use validate::{RESERVED_PREFIX, validate};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}
