//! Server orchestration: raw bytes in, validated dispatch, assembled
//! response bytes out.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::dispatch::{MethodRegistry, RpcService};
use crate::error::{HandlerError, JsonRpcError, ProtocolError};
use crate::request::{BatchItem, Incoming, JsonRpcRequest};
use crate::response::JsonRpcMessage;
use crate::types::IdSlot;
use crate::validate::validate;

/// Transport-agnostic JSON-RPC 2.0 server.
///
/// Owns the method registry and runs one request/response exchange at a
/// time; nothing is shared or retained across exchanges.
#[derive(Default)]
pub struct JsonRpcServer {
    registry: MethodRegistry,
}

impl JsonRpcServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: MethodRegistry) -> Self {
        Self { registry }
    }

    /// Register a handler group under a namespace.
    pub fn register<S>(&mut self, namespace: impl Into<String>, service: S)
    where
        S: RpcService + 'static,
    {
        self.registry.register(namespace, service);
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Process one raw request body.
    ///
    /// Returns `None` only when the exchange produces no response artifact
    /// at all: a single notification. A batch always answers with an array,
    /// even the empty one when every element was a notification.
    pub async fn handle(&self, body: &[u8]) -> Option<String> {
        let incoming = match Incoming::from_slice(body) {
            Ok(incoming) => incoming,
            Err(err) => {
                debug!(code = err.code(), "rejecting request body");
                return Some(encode(&JsonRpcMessage::error(JsonRpcError::from_protocol(
                    None, err,
                ))));
            }
        };

        match incoming {
            Incoming::Single(item) => {
                let reply = self.process_item(item).await?;
                Some(encode(&reply))
            }
            Incoming::Batch(items) => {
                // Sequential by design: response order must match request
                // order, with notification gaps removed.
                let mut replies = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(reply) = self.process_item(item).await {
                        replies.push(reply);
                    }
                }
                Some(encode(&replies))
            }
        }
    }

    async fn process_item(&self, item: BatchItem) -> Option<JsonRpcMessage> {
        match item {
            BatchItem::Valid(request) => self.process_request(request).await,
            // A malformed element never had a readable id.
            BatchItem::Malformed => Some(JsonRpcMessage::error(JsonRpcError::from_protocol(
                None,
                ProtocolError::invalid_request(),
            ))),
        }
    }

    async fn process_request(&self, request: JsonRpcRequest) -> Option<JsonRpcMessage> {
        let outcome = self.run(&request).await;

        let id = match request.id {
            IdSlot::Id(ref id) => id.clone(),
            // Fire and forget: the handler already ran for its side effects,
            // and failures during a notification are discarded by design.
            IdSlot::Absent | IdSlot::Null => {
                if let Err(err) = outcome {
                    debug!(method = %request.method, error = %err, "dropping failed notification");
                }
                return None;
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcMessage::success(id, result),
            Err(HandlerError::Rpc(err)) => {
                JsonRpcMessage::error(JsonRpcError::from_protocol(Some(id), err))
            }
            Err(HandlerError::Other(err)) => {
                // The original failure stays on this side of the wire.
                error!(method = %request.method, error = %err, "handler failed");
                JsonRpcMessage::error(JsonRpcError::from_protocol(
                    Some(id),
                    ProtocolError::internal_error(),
                ))
            }
        })
    }

    async fn run(&self, request: &JsonRpcRequest) -> Result<Value, HandlerError> {
        validate(request)?;
        self.registry
            .dispatch(&request.method, request.bound_args())
            .await
    }
}

fn encode<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "response serialization failed");
            r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error"},"id":null}"#
                .to_string()
        }
    }
}
