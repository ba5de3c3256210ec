//! Calculator JSON-RPC Example
//!
//! Registers a small handler group and feeds the server raw request bodies,
//! including a batch with a malformed element and a notification.

use futures::FutureExt;
use quill_json_rpc::prelude::*;
use serde_json::json;

fn calculator() -> ServiceMap {
    ServiceMap::new()
        .method("add", 2, |args| {
            async move {
                let a = args[0].as_f64().ok_or_else(|| {
                    HandlerError::Rpc(ProtocolError::invalid_params("'a' must be a number"))
                })?;
                let b = args[1].as_f64().ok_or_else(|| {
                    HandlerError::Rpc(ProtocolError::invalid_params("'b' must be a number"))
                })?;
                Ok(json!(a + b))
            }
            .boxed()
        })
        .method("sum", 1, |args| {
            async move {
                let total: f64 = args.iter().filter_map(|v| v.as_f64()).sum();
                Ok(json!(total))
            }
            .boxed()
        })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut server = JsonRpcServer::new();
    server.register("calc", calculator());

    let bodies: Vec<&str> = vec![
        r#"{"jsonrpc":"2.0","method":"calc.add","params":[5,3],"id":1}"#,
        r#"{"jsonrpc":"2.0","method":"calc.sum","params":[1,2,3,4],"id":2}"#,
        r#"{"jsonrpc":"2.0","method":"calc.sum","params":[1]}"#,
        r#"[{"jsonrpc":"2.0","method":"calc.add","params":[1,1],"id":3},"oops"]"#,
        r#"{"jsonrpc":"2.0","method":"calc.pow","params":[2,8],"id":4}"#,
    ];

    for body in bodies {
        println!("--> {body}");
        match server.handle(body.as_bytes()).await {
            Some(reply) => println!("<-- {reply}"),
            None => println!("<-- (notification, no response)"),
        }
    }
}
