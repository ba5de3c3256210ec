//! # Protocol Engine Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use quill_json_rpc::prelude::*;
//! ```

pub use crate::dispatch::{MethodRegistry, MethodSpec, RpcService, ServiceMap};
pub use crate::error::{ErrorKind, ErrorObject, HandlerError, JsonRpcError, ProtocolError};
pub use crate::notification::JsonRpcNotification;
pub use crate::request::{BatchItem, Incoming, JsonRpcRequest, RequestParams};
pub use crate::response::{JsonRpcMessage, JsonRpcResponse};
pub use crate::server::JsonRpcServer;
pub use crate::types::{IdSlot, RequestId};
pub use crate::validate::validate;

// Standard error codes
pub use crate::error_codes::*;
