//! Batch semantics: ordering, notification suppression, partial failure.

use futures::FutureExt;
use quill_json_rpc::prelude::*;
use serde_json::{Value, json};

fn math_server() -> JsonRpcServer {
    let mut server = JsonRpcServer::new();
    server.register(
        "math",
        ServiceMap::new()
            .method("sum", 1, |args| {
                async move {
                    let total: i64 = args.iter().filter_map(|v| v.as_i64()).sum();
                    Ok(json!(total))
                }
                .boxed()
            })
            .method("sub", 2, |args| {
                async move {
                    let a = args[0].as_i64().unwrap_or(0);
                    let b = args[1].as_i64().unwrap_or(0);
                    Ok(json!(a - b))
                }
                .boxed()
            }),
    );
    server
}

#[tokio::test]
async fn malformed_element_degrades_in_place() {
    let body = br#"[
        {"jsonrpc":"2.0","method":"math.sum","params":[1,2],"id":1},
        42,
        {"jsonrpc":"2.0","method":"math.sum","params":[3,4],"id":2}
    ]"#;

    let reply = math_server().handle(body).await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&reply).unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["result"], json!(3));
    assert_eq!(entries[1]["error"]["code"], json!(-32600));
    assert_eq!(entries[1]["id"], Value::Null);
    assert_eq!(entries[2]["result"], json!(7));
}

#[tokio::test]
async fn notifications_leave_gaps_removed() {
    let body = br#"[
        {"jsonrpc":"2.0","method":"math.sum","params":[1],"id":1},
        {"jsonrpc":"2.0","method":"math.sum","params":[2]},
        {"jsonrpc":"2.0","method":"math.sum","params":[3],"id":3}
    ]"#;

    let reply = math_server().handle(body).await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&reply).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], json!(1));
    assert_eq!(entries[1]["id"], json!(3));
}

#[tokio::test]
async fn failing_notification_stays_suppressed() {
    // The middle element would be a method-not-found error, but it carries
    // no id, so the failure must vanish from the assembled array.
    let body = br#"[
        {"jsonrpc":"2.0","method":"math.sum","params":[1],"id":1},
        {"jsonrpc":"2.0","method":"math.ghost"},
        {"jsonrpc":"2.0","method":"math.sum","params":[3],"id":3}
    ]"#;

    let reply = math_server().handle(body).await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&reply).unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.get("error").is_none()));
}

#[tokio::test]
async fn all_notifications_answer_with_empty_array() {
    let body = br#"[
        {"jsonrpc":"2.0","method":"math.sum","params":[1]},
        {"jsonrpc":"2.0","method":"math.sum","params":[2],"id":null}
    ]"#;

    assert_eq!(math_server().handle(body).await.unwrap(), "[]");
}

#[tokio::test]
async fn response_order_matches_request_order() {
    let body = br#"[
        {"jsonrpc":"2.0","method":"math.sub","params":[10,1],"id":"a"},
        {"jsonrpc":"2.0","method":"math.sub","params":[10,2],"id":"b"},
        {"jsonrpc":"2.0","method":"math.sub","params":[10,3],"id":"c"}
    ]"#;

    let reply = math_server().handle(body).await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&reply).unwrap();

    let ids: Vec<&Value> = entries.iter().map(|e| &e["id"]).collect();
    assert_eq!(ids, vec![&json!("a"), &json!("b"), &json!("c")]);
    assert_eq!(entries[0]["result"], json!(9));
    assert_eq!(entries[2]["result"], json!(7));
}

#[tokio::test]
async fn validation_errors_surface_per_element() {
    let body = br#"[
        {"jsonrpc":"2.0","method":"rpc.probe","id":1},
        {"jsonrpc":"1.0","method":"math.sum","params":[1],"id":2},
        {"jsonrpc":"2.0","method":"math.sum","params":[5],"id":3}
    ]"#;

    let reply = math_server().handle(body).await.unwrap();
    let entries: Vec<Value> = serde_json::from_str(&reply).unwrap();

    assert_eq!(entries[0]["error"]["code"], json!(-32600));
    assert_eq!(entries[1]["error"]["code"], json!(-32600));
    assert!(
        entries[1]["error"]["message"]
            .as_str()
            .unwrap()
            .contains("version mismatch")
    );
    assert_eq!(entries[2]["result"], json!(5));
}

#[tokio::test]
async fn too_few_params_is_invalid_params() {
    let body = br#"{"jsonrpc":"2.0","method":"math.sub","params":[10],"id":1}"#;

    let reply = math_server().handle(body).await.unwrap();
    let entry: Value = serde_json::from_str(&reply).unwrap();

    assert_eq!(entry["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn object_params_reach_handler_as_one_argument() {
    let mut server = JsonRpcServer::new();
    server.register(
        "",
        ServiceMap::new().method("add", 1, |args| {
            async move {
                let named = &args[0];
                let a = named["a"].as_i64().unwrap_or(0);
                let b = named["b"].as_i64().unwrap_or(0);
                Ok(json!(a + b))
            }
            .boxed()
        }),
    );

    let body = br#"{"jsonrpc":"2.0","method":"add","params":{"a":5,"b":3},"id":1}"#;
    let reply = server.handle(body).await.unwrap();
    let entry: Value = serde_json::from_str(&reply).unwrap();

    assert_eq!(entry["result"], json!(8));
}
