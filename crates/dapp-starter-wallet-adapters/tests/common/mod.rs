#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Response, Server};

use dapp_starter_wallet_adapters::WalletAdapterConfig;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

pub fn stub_config(url: String) -> WalletAdapterConfig {
    WalletAdapterConfig {
        rpc_url: Some(url),
        request_timeout_ms: 5_000,
        ..WalletAdapterConfig::default()
    }
}

pub fn spawn_wallet_stub(
    calls: Arc<Mutex<Vec<RecordedCall>>>,
) -> (String, thread::JoinHandle<()>) {
    spawn_wallet_stub_with(calls, Vec::new())
}

// An override replaces the canned result for its method; an override value
// carrying an "error" key is sent as an error body instead.
pub fn spawn_wallet_stub_with(
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    overrides: Vec<(&'static str, Value)>,
) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start wallet stub");
    let url = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..16 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = parsed
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let params = parsed.get("params").cloned().unwrap_or(Value::Null);
            if let Ok(mut g) = calls.lock() {
                g.push(RecordedCall {
                    method: method.clone(),
                    params,
                });
            }

            let reply = reply_for(&overrides, &method);
            let _ = req.respond(Response::from_string(reply.to_string()));
        }
    });

    (url, join)
}

fn reply_for(overrides: &[(&'static str, Value)], method: &str) -> Value {
    if let Some((_, value)) = overrides.iter().find(|(m, _)| *m == method) {
        return if let Some(err) = value.get("error") {
            json!({"jsonrpc": "2.0", "id": 1, "error": err})
        } else {
            json!({"jsonrpc": "2.0", "id": 1, "result": value})
        };
    }

    let result = match method {
        "eth_requestAccounts" => json!([
            "0x1000000000000000000000000000000000000001",
            "0x2000000000000000000000000000000000000002"
        ]),
        "eth_chainId" => json!("0x2105"),
        "personal_sign" | "eth_sign" | "eth_signTypedData" | "eth_signTypedData_v4" => {
            json!(format!("0x{}", "11".repeat(65)))
        }
        "eth_sendTransaction" => {
            json!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")
        }
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32601, "message": "method not found"}
            })
        }
    };
    json!({"jsonrpc": "2.0", "id": 1, "result": result})
}
