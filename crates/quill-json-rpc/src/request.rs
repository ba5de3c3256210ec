use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ProtocolError;
use crate::types::{IdSlot, RequestId};

/// Parameters for a JSON-RPC request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Positional parameters as an array
    Array(Vec<Value>),
    /// Named parameters as an object
    Object(HashMap<String, Value>),
}

impl RequestParams {
    /// Get a parameter by name (for object params)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            RequestParams::Object(map) => map.get(key),
            RequestParams::Array(_) => None,
        }
    }

    /// Get a parameter by index (for array params only)
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            RequestParams::Array(vec) => vec.get(index),
            RequestParams::Object(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RequestParams::Object(map) => map.is_empty(),
            RequestParams::Array(vec) => vec.is_empty(),
        }
    }

    /// Convert to a serde_json::Value for serialization
    pub fn to_value(&self) -> Value {
        match self {
            RequestParams::Object(map) => {
                Value::Object(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            }
            RequestParams::Array(arr) => Value::Array(arr.clone()),
        }
    }
}

impl From<HashMap<String, Value>> for RequestParams {
    fn from(map: HashMap<String, Value>) -> Self {
        RequestParams::Object(map)
    }
}

impl From<Vec<Value>> for RequestParams {
    fn from(vec: Vec<Value>) -> Self {
        RequestParams::Array(vec)
    }
}

/// A JSON-RPC request.
///
/// `version` and `method` decode leniently (missing fields become empty
/// strings) so that a structurally complete but non-compliant object is
/// rejected by the validator with `Invalid Request`, not by serde with a
/// parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc", default)]
    pub version: String,
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
    #[serde(default, skip_serializing_if = "IdSlot::is_absent")]
    pub id: IdSlot,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self {
            version: crate::JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: IdSlot::Id(id),
        }
    }

    /// Create a request with no id field: a notification.
    pub fn notification(method: impl Into<String>, params: Option<RequestParams>) -> Self {
        Self {
            version: crate::JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: IdSlot::Absent,
        }
    }

    /// Id presence, not id value, decides notification status: both an
    /// absent id and an explicit null id suppress the response.
    pub fn is_notification(&self) -> bool {
        self.id.is_notification()
    }

    /// Bind the params to positional arguments for dispatch.
    ///
    /// Array params contribute one argument per element. Object params are
    /// wrapped as a single positional argument holding the whole map, so a
    /// handler receives named arguments as one struct-like value. Absent
    /// params bind to an empty argument list.
    pub fn bound_args(&self) -> Vec<Value> {
        match &self.params {
            None => Vec::new(),
            Some(RequestParams::Array(items)) => items.clone(),
            Some(params @ RequestParams::Object(_)) => vec![params.to_value()],
        }
    }
}

/// One element of a parsed batch.
///
/// An element that does not decode into a request object degrades to
/// `Malformed` instead of failing the whole batch; the server answers it
/// with an `Invalid Request` entry at its original position.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchItem {
    Valid(JsonRpcRequest),
    Malformed,
}

impl BatchItem {
    fn from_value(value: Value) -> BatchItem {
        match value {
            // Nested arrays are not requests; they degrade to Malformed like
            // any other non-object element.
            Value::Object(_) => match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(request) => BatchItem::Valid(request),
                Err(_) => BatchItem::Malformed,
            },
            _ => BatchItem::Malformed,
        }
    }
}

/// A parsed request body: either one request or an ordered batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Single(BatchItem),
    Batch(Vec<BatchItem>),
}

impl Incoming {
    /// Parse raw bytes into requests.
    ///
    /// An empty body and an empty top-level array are both `Invalid Request`
    /// rather than `Parse error`: in the second case the bytes decoded fine,
    /// the request is what is invalid.
    pub fn from_slice(body: &[u8]) -> Result<Incoming, ProtocolError> {
        if body.is_empty() {
            return Err(ProtocolError::invalid_request());
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|_| ProtocolError::parse_error())?;

        match value {
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(ProtocolError::invalid_request());
                }
                Ok(Incoming::Batch(
                    items.into_iter().map(BatchItem::from_value).collect(),
                ))
            }
            other => Ok(Incoming::Single(BatchItem::from_value(other))),
        }
    }
}
