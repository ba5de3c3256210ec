//! Transport layer: an opaque "send bytes, receive bytes" capability.
//!
//! The protocol engine does not care what carries the bytes. A transport
//! failure surfaces as a client-level error, never as a wire response. The
//! core defines no timeout or cancellation semantics; callers needing them
//! wrap the transport.

use async_trait::async_trait;

use crate::error::TransportError;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;

/// Byte-level request/response transport. One call is one exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a serialized request body and return the raw response body.
    ///
    /// Notifications go through `send` too; the caller ignores whatever body
    /// comes back.
    async fn send(&self, body: &[u8]) -> Result<Vec<u8>, TransportError>;
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn Transport>;
