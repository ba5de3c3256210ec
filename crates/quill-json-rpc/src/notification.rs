use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::request::{JsonRpcRequest, RequestParams};

/// A JSON-RPC notification (request without an id).
///
/// Builder-side convenience: serializing a notification can never leak an id
/// onto the wire because the type has no id slot at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    #[serde(rename = "jsonrpc")]
    pub version: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self {
            version: crate::JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }

    /// Create a new notification with object parameters
    pub fn with_object_params(method: impl Into<String>, params: HashMap<String, Value>) -> Self {
        Self::new(method, Some(RequestParams::Object(params)))
    }

    /// Create a new notification with array parameters
    pub fn with_array_params(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self::new(method, Some(RequestParams::Array(params)))
    }
}

impl From<JsonRpcNotification> for JsonRpcRequest {
    fn from(note: JsonRpcNotification) -> Self {
        JsonRpcRequest::notification(note.method, note.params)
    }
}
