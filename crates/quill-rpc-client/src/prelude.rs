//! Convenient re-exports of the most commonly used client types.

pub use crate::client::JsonRpcClient;
pub use crate::error::{ClientError, ClientResult, TransportError};
pub use crate::transport::{BoxedTransport, Transport};

#[cfg(feature = "http")]
pub use crate::transport::HttpTransport;

pub use quill_json_rpc::{
    JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestId, RequestParams,
};
