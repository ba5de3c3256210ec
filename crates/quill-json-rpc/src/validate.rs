//! Structural validation of a single (non-batch) request before dispatch.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ProtocolError;
use crate::request::JsonRpcRequest;

/// Method names beginning with this prefix are reserved for rpc-internal
/// methods and extensions.
pub const RESERVED_PREFIX: &str = "rpc.";

/// Identifier grammar: a leading letter or underscore, then letters, digits,
/// underscores or dots.
static METHOD_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("method name pattern"));

/// Check a request against the JSON-RPC 2.0 structural rules.
///
/// Rules run in order and the first failure wins; the request is never
/// mutated.
pub fn validate(request: &JsonRpcRequest) -> Result<(), ProtocolError> {
    // Missing jsonrpc or method (absent fields decode as empty strings).
    if request.version.is_empty() || request.method.is_empty() {
        return Err(ProtocolError::invalid_request());
    }

    if request.method.starts_with(RESERVED_PREFIX) {
        return Err(ProtocolError::reserved_prefix());
    }

    if !METHOD_NAME.is_match(&request.method) {
        return Err(ProtocolError::invalid_request());
    }

    if request.version != crate::JSONRPC_VERSION {
        return Err(ProtocolError::version_mismatch());
    }

    Ok(())
}
