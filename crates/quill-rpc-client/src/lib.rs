//! # JSON-RPC 2.0 Client
//!
//! Client facade over the `quill-json-rpc` protocol engine: request
//! building, id generation and correlation, batch reconciliation, and the
//! notification contract, all on top of a pluggable byte transport.
//!
//! ```rust,no_run
//! use quill_rpc_client::JsonRpcClient;
//! use quill_json_rpc::RequestParams;
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = JsonRpcClient::connect("http://localhost:8080/rpc")?;
//! let sum = client
//!     .call("sum", Some(RequestParams::Array(vec![json!(1), json!(2)])))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod prelude;
pub mod transport;

pub use client::JsonRpcClient;
pub use error::{ClientError, ClientResult, TransportError};
pub use transport::{BoxedTransport, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
