//! Client facade: request building, id correlation and batch reconciliation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use quill_json_rpc::{
    IdSlot, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestId, RequestParams,
};

use crate::error::{ClientError, ClientResult};
use crate::transport::{BoxedTransport, Transport};

/// A JSON-RPC 2.0 client over an arbitrary byte transport.
///
/// Each call owns its request/response pair; nothing is shared across
/// exchanges except the monotonically increasing id counter.
pub struct JsonRpcClient {
    transport: BoxedTransport,
    next_id: AtomicI64,
}

impl JsonRpcClient {
    pub fn new<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Box::new(transport),
            next_id: AtomicI64::new(1),
        }
    }

    /// Connect over HTTP.
    #[cfg(feature = "http")]
    pub fn connect(endpoint: &str) -> ClientResult<Self> {
        Ok(Self::new(crate::transport::HttpTransport::new(endpoint)?))
    }

    fn next_id(&self) -> RequestId {
        RequestId::Number(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Build a request carrying the next generated id. Useful for assembling
    /// batches by hand.
    pub fn request(&self, method: &str, params: Option<RequestParams>) -> JsonRpcRequest {
        JsonRpcRequest::new(self.next_id(), method, params)
    }

    /// Build a notification request (no id, no response expected).
    pub fn notification(&self, method: &str, params: Option<RequestParams>) -> JsonRpcRequest {
        JsonRpcRequest::notification(method, params)
    }

    /// Call a single method and return its result.
    pub async fn call(&self, method: &str, params: Option<RequestParams>) -> ClientResult<Value> {
        let request = self.request(method, params);
        self.send_request(&request).await
    }

    /// Send a prebuilt single request and correlate the response.
    pub async fn send_request(&self, request: &JsonRpcRequest) -> ClientResult<Value> {
        let expected = request.id.as_id().ok_or_else(|| {
            ClientError::contract("Requests must carry an id; use notify() for notifications")
        })?;

        debug!(method = %request.method, id = %expected, "sending request");
        let raw = self.exchange(request).await?;
        let message: JsonRpcMessage = serde_json::from_slice(&raw)?;

        match message {
            JsonRpcMessage::Response(response) if response.id == *expected => Ok(response.result),
            JsonRpcMessage::Response(response) => Err(ClientError::contract(format!(
                "Response id '{}' does not match request id '{}'",
                response.id, expected
            ))),
            JsonRpcMessage::Error(err) => Err(ClientError::Rpc {
                code: err.error.code,
                message: err.error.message,
            }),
        }
    }

    /// Fire a notification. No response body is expected; whatever the
    /// transport returns is discarded.
    pub async fn notify(&self, method: &str, params: Option<RequestParams>) -> ClientResult<()> {
        let note = JsonRpcNotification::new(method, params);
        self.exchange(&note).await?;
        Ok(())
    }

    /// Send a prebuilt request as a notification.
    ///
    /// A request that carries an id violates the notify contract and is
    /// rejected before anything touches the transport.
    pub async fn send_notify(&self, request: &JsonRpcRequest) -> ClientResult<()> {
        if !request.id.is_notification() {
            return Err(ClientError::contract(
                "Notify requests must not have an id set",
            ));
        }
        self.exchange(request).await?;
        Ok(())
    }

    /// Send an ordered batch and reconcile the response set against it.
    ///
    /// Notifications contribute no expected id. The output is ordered by
    /// original submission order of the non-notification requests, not by
    /// server-returned order. An all-notification batch returns an empty
    /// vec as a plain acknowledgement.
    pub async fn call_batch(
        &self,
        requests: &[JsonRpcRequest],
    ) -> ClientResult<Vec<JsonRpcMessage>> {
        if requests.is_empty() {
            return Err(ClientError::contract(
                "Batch must contain at least one request",
            ));
        }

        let expected: Vec<RequestId> = requests
            .iter()
            .filter_map(|request| match request.id {
                IdSlot::Id(ref id) => Some(id.clone()),
                IdSlot::Absent | IdSlot::Null => None,
            })
            .collect();

        debug!(requests = requests.len(), expected = expected.len(), "sending batch");
        let raw = self.exchange(&requests).await?;

        // No response body to read when the whole batch was notifications.
        if expected.is_empty() {
            return Ok(Vec::new());
        }

        let replies: Vec<JsonRpcMessage> = serde_json::from_slice(&raw)?;

        let mut by_id: HashMap<RequestId, JsonRpcMessage> = HashMap::with_capacity(replies.len());
        for reply in replies {
            match reply.id() {
                Some(id) => {
                    by_id.insert(id.clone(), reply);
                }
                None => {
                    return Err(ClientError::contract(
                        "Batch response entry without an id",
                    ));
                }
            }
        }

        let mut ordered = Vec::with_capacity(expected.len());
        for id in &expected {
            match by_id.remove(id) {
                Some(reply) => ordered.push(reply),
                None => return Err(ClientError::missing_id()),
            }
        }

        if !by_id.is_empty() {
            return Err(ClientError::extra_ids());
        }

        Ok(ordered)
    }

    async fn exchange<T: Serialize>(&self, payload: &T) -> ClientResult<Vec<u8>> {
        let body = serde_json::to_vec(payload)?;
        Ok(self.transport.send(&body).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use crate::error::TransportError;

    /// Canned-response transport that records every body it is given.
    struct MockTransport {
        responses: Mutex<Vec<Vec<u8>>>,
        calls: AtomicUsize,
        sent: Mutex<Vec<Value>>,
    }

    impl MockTransport {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(
                    responses.into_iter().rev().map(|s| s.as_bytes().to_vec()).collect(),
                ),
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn sent_bodies(&self) -> Vec<Value> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, body: &[u8]) -> Result<Vec<u8>, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent
                .lock()
                .unwrap()
                .push(serde_json::from_slice(body).unwrap());
            Ok(self.responses.lock().unwrap().pop().unwrap_or_default())
        }
    }

    #[async_trait]
    impl Transport for std::sync::Arc<MockTransport> {
        async fn send(&self, body: &[u8]) -> Result<Vec<u8>, TransportError> {
            self.as_ref().send(body).await
        }
    }

    fn client_with(responses: Vec<&str>) -> JsonRpcClient {
        JsonRpcClient::new(MockTransport::new(responses))
    }

    #[tokio::test]
    async fn test_single_call_returns_result() {
        let client = client_with(vec![r#"{"jsonrpc":"2.0","result":6,"id":1}"#]);

        let result = client
            .call("sum", Some(RequestParams::Array(vec![json!(1), json!(2), json!(3)])))
            .await
            .unwrap();
        assert_eq!(result, json!(6));
    }

    #[tokio::test]
    async fn test_single_call_surfaces_server_error() {
        let client = client_with(vec![
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":1}"#,
        ]);

        let err = client.call("ghost", None).await.unwrap_err();
        assert_eq!(err.error_code(), Some(-32601));
    }

    #[tokio::test]
    async fn test_single_call_rejects_mismatched_id() {
        let client = client_with(vec![r#"{"jsonrpc":"2.0","result":1,"id":99}"#]);

        let err = client.call("sum", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Contract(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_client_error() {
        let client = client_with(vec!["not json"]);

        let err = client.call("sum", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[tokio::test]
    async fn test_notify_with_id_fails_before_transport() {
        let transport = std::sync::Arc::new(MockTransport::new(vec![]));
        let client = JsonRpcClient::new(transport.clone());

        let request = JsonRpcRequest::new(RequestId::Number(5), "log", None);
        let err = client.send_notify(&request).await.unwrap_err();

        assert!(matches!(err, ClientError::Contract(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_notify_with_null_id_is_allowed() {
        let mut request = JsonRpcRequest::notification("log", None);
        request.id = IdSlot::Null;

        let client = client_with(vec![""]);
        client.send_notify(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_batch_reorders_to_submission_order() {
        // Server answers out of order; the client must not care.
        let client = client_with(vec![
            r#"[
                {"jsonrpc":"2.0","result":"third","id":3},
                {"jsonrpc":"2.0","result":"first","id":1},
                {"jsonrpc":"2.0","result":"second","id":2}
            ]"#,
        ]);

        let requests = vec![
            client.request("a", None),
            client.request("b", None),
            client.request("c", None),
        ];
        let replies = client.call_batch(&requests).await.unwrap();

        let results: Vec<Value> = replies
            .into_iter()
            .map(|r| r.into_result().unwrap())
            .collect();
        assert_eq!(results, vec![json!("first"), json!("second"), json!("third")]);
    }

    #[tokio::test]
    async fn test_batch_missing_id_fails() {
        let client = client_with(vec![r#"[{"jsonrpc":"2.0","result":1,"id":1}]"#]);

        let requests = vec![client.request("a", None), client.request("b", None)];
        let err = client.call_batch(&requests).await.unwrap_err();

        assert_eq!(err.to_string(), "Missing id in response");
    }

    #[tokio::test]
    async fn test_batch_extra_id_fails() {
        let client = client_with(vec![
            r#"[
                {"jsonrpc":"2.0","result":1,"id":1},
                {"jsonrpc":"2.0","result":2,"id":77}
            ]"#,
        ]);

        let requests = vec![client.request("a", None)];
        let err = client.call_batch(&requests).await.unwrap_err();

        assert_eq!(err.to_string(), "Extra id(s) in response");
    }

    #[tokio::test]
    async fn test_all_notification_batch_returns_ack() {
        let transport = std::sync::Arc::new(MockTransport::new(vec!["[]"]));
        let client = JsonRpcClient::new(transport.clone());

        let requests = vec![
            client.notification("a", None),
            client.notification("b", None),
        ];
        let replies = client.call_batch(&requests).await.unwrap();

        assert!(replies.is_empty());
        assert_eq!(transport.call_count(), 1);
        // No element of the sent batch may carry an id field.
        let sent = transport.sent_bodies();
        for entry in sent[0].as_array().unwrap() {
            assert!(entry.get("id").is_none());
        }
    }

    #[tokio::test]
    async fn test_batch_notifications_skip_reconciliation() {
        let client = client_with(vec![r#"[{"jsonrpc":"2.0","result":10,"id":1}]"#]);

        let requests = vec![
            client.request("a", None),
            client.notification("fire_and_forget", None),
        ];
        let replies = client.call_batch(&requests).await.unwrap();

        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].id(), Some(&RequestId::Number(1)));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let client = client_with(vec![]);
        let err = client.call_batch(&[]).await.unwrap_err();
        assert!(matches!(err, ClientError::Contract(_)));
    }

    #[tokio::test]
    async fn test_mixed_batch_with_error_entry() {
        let client = client_with(vec![
            r#"[
                {"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid params"},"id":2},
                {"jsonrpc":"2.0","result":"ok","id":1}
            ]"#,
        ]);

        let requests = vec![client.request("a", None), client.request("b", None)];
        let replies = client.call_batch(&requests).await.unwrap();

        assert!(!replies[0].is_error());
        assert!(replies[1].is_error());
    }
}
