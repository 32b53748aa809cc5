use alloy::primitives::{Address, Bytes, B256};
use serde_json::Value;

use dapp_starter_wallet_core::{PortError, ProviderPort, SignMethod};

use crate::WalletAdapterConfig;

// The wallet object the host environment injects: window.ethereum in the
// browser, the JSON-RPC endpoint named by DAPP_STARTER_RPC_URL natively.
// Binding fails when the injection point is absent and sends no wallet
// request otherwise.
#[derive(Debug, Clone)]
pub struct InjectedProvider {
    #[cfg(not(target_arch = "wasm32"))]
    rpc: RpcRuntime,
    allow_eth_sign: bool,
}

#[derive(Debug, Clone)]
#[cfg(not(target_arch = "wasm32"))]
struct RpcRuntime {
    url: String,
    client: reqwest::blocking::Client,
}

impl InjectedProvider {
    pub fn from_env() -> Result<Self, PortError> {
        Self::with_config(WalletAdapterConfig::from_env())
    }

    pub fn with_config(config: WalletAdapterConfig) -> Result<Self, PortError> {
        #[cfg(target_arch = "wasm32")]
        {
            // Presence probe only; no wallet request is dispatched here.
            browser_provider()?;
            return Ok(Self {
                allow_eth_sign: config.allow_eth_sign,
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let url = config.rpc_url.ok_or_else(|| {
                PortError::NotFound(
                    "wallet endpoint not configured; set DAPP_STARTER_RPC_URL".to_owned(),
                )
            })?;
            let client = reqwest::blocking::Client::builder()
                .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
                .build()
                .map_err(|e| PortError::Transport(format!("wallet client init failed: {e}")))?;
            Ok(Self {
                rpc: RpcRuntime { url, client },
                allow_eth_sign: config.allow_eth_sign,
            })
        }
    }

    fn check_sign_policy(&self, method: SignMethod) -> Result<(), PortError> {
        if method == SignMethod::EthSign && !self.allow_eth_sign {
            return Err(PortError::Policy(
                "eth_sign is disabled; set DAPP_STARTER_ALLOW_ETH_SIGN=1 to permit it".to_owned(),
            ));
        }
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn rpc_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response = self
            .rpc
            .client
            .post(&self.rpc.url)
            .json(&payload)
            .send()
            .map_err(|e| PortError::Transport(format!("wallet request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("wallet response decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "wallet endpoint status {}: {}",
                status, body
            )));
        }
        if let Some(err) = body.get("error") {
            return Err(PortError::Transport(format!(
                "wallet returned error: {err}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("wallet response missing result".to_owned()))
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn wasm_request_accounts_async(&self) -> Result<Vec<Address>, PortError> {
        let result = self
            .wasm_request("eth_requestAccounts", serde_json::json!([]))
            .await?;
        parse_accounts(&result)
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn wasm_chain_id_async(&self) -> Result<u64, PortError> {
        let result = self
            .wasm_request("eth_chainId", serde_json::json!([]))
            .await?;
        json_chain_id_to_u64(&result)
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn wasm_sign_payload_async(
        &self,
        method: SignMethod,
        payload: &[u8],
        expected_signer: Address,
    ) -> Result<Bytes, PortError> {
        self.check_sign_policy(method)?;
        let params = sign_params(method, payload, expected_signer);
        let result = self.wasm_request(method.rpc_name(), params).await?;
        let sig_raw = result.as_str().ok_or_else(|| {
            PortError::Transport("sign response must be hex string".to_owned())
        })?;
        sig_raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid signature hex: {e}")))
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn wasm_send_transaction_async(&self, tx_payload: &Value) -> Result<B256, PortError> {
        let result = self
            .wasm_request("eth_sendTransaction", serde_json::json!([tx_payload]))
            .await?;
        let hash = result.as_str().ok_or_else(|| {
            PortError::Transport("eth_sendTransaction must return hash".to_owned())
        })?;
        hash.parse()
            .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
    }

    #[cfg(target_arch = "wasm32")]
    async fn wasm_request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        use wasm_bindgen::JsCast;

        let provider = browser_provider()?;
        let request_fn = get_prop(&provider, "request")
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            .ok_or(PortError::NotImplemented(
                "window.ethereum.request is unavailable",
            ))?;

        let request = serde_json::json!({
            "method": method,
            "params": params,
        });
        let request_js = serde_wasm_bindgen::to_value(&request)
            .map_err(|e| PortError::Transport(format!("failed to encode wallet request: {e}")))?;
        let promise_js = request_fn.call1(&provider, &request_js).map_err(|e| {
            PortError::Transport(format!("wallet request dispatch failed: {e:?}"))
        })?;
        let promise = promise_js.dyn_into::<js_sys::Promise>().map_err(|_| {
            PortError::Transport("wallet request did not return Promise".to_owned())
        })?;
        let result_js = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| PortError::Transport(format!("wallet request rejected: {e:?}")))?;
        serde_wasm_bindgen::from_value(result_js)
            .map_err(|e| PortError::Transport(format!("failed to decode wallet response: {e}")))
    }
}

impl ProviderPort for InjectedProvider {
    fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        #[cfg(target_arch = "wasm32")]
        {
            // Snapshot read; the connect flow is wasm_request_accounts_async.
            let provider = browser_provider()?;
            let selected = get_prop(&provider, "selectedAddress")?;
            let raw = selected.as_string().ok_or_else(|| {
                PortError::Policy("no account exposed; connect the wallet first".to_owned())
            })?;
            let parsed: Address = raw
                .parse()
                .map_err(|e| PortError::Validation(format!("invalid selectedAddress: {e}")))?;
            return Ok(vec![parsed]);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.rpc_call("eth_requestAccounts", serde_json::json!([]))?;
            parse_accounts(&result)
        }
    }

    fn chain_id(&self) -> Result<u64, PortError> {
        #[cfg(target_arch = "wasm32")]
        {
            let provider = browser_provider()?;
            let chain = get_prop(&provider, "chainId")?;
            return js_chain_id_to_u64(chain);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.rpc_call("eth_chainId", serde_json::json!([]))?;
            json_chain_id_to_u64(&result)
        }
    }

    fn sign_payload(
        &self,
        method: SignMethod,
        payload: &[u8],
        expected_signer: Address,
    ) -> Result<Bytes, PortError> {
        self.check_sign_policy(method)?;

        #[cfg(target_arch = "wasm32")]
        {
            let _ = (payload, expected_signer);
            return Err(PortError::NotImplemented(
                "wasm sync sign_payload is unavailable; use wasm_sign_payload_async",
            ));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let params = sign_params(method, payload, expected_signer);
            let result = self.rpc_call(method.rpc_name(), params)?;
            let sig_raw = result.as_str().ok_or_else(|| {
                PortError::Transport("sign response must be hex string".to_owned())
            })?;
            sig_raw
                .parse()
                .map_err(|e| PortError::Validation(format!("invalid signature hex: {e}")))
        }
    }

    fn send_transaction(&self, tx_payload: &Value) -> Result<B256, PortError> {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = tx_payload;
            return Err(PortError::NotImplemented(
                "wasm sync send_transaction is unavailable; use wasm_send_transaction_async",
            ));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.rpc_call("eth_sendTransaction", serde_json::json!([tx_payload]))?;
            let hash = result.as_str().ok_or_else(|| {
                PortError::Transport("eth_sendTransaction must return hash".to_owned())
            })?;
            hash.parse()
                .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
        }
    }
}

fn sign_params(method: SignMethod, payload: &[u8], expected_signer: Address) -> Value {
    let payload_hex = format!("0x{}", alloy::hex::encode(payload));
    let payload_text = String::from_utf8_lossy(payload).to_string();
    match method {
        SignMethod::PersonalSign => {
            serde_json::json!([payload_hex, expected_signer.to_string()])
        }
        SignMethod::EthSign => serde_json::json!([expected_signer.to_string(), payload_hex]),
        SignMethod::EthSignTypedData | SignMethod::EthSignTypedDataV4 => {
            serde_json::json!([expected_signer.to_string(), payload_text])
        }
    }
}

fn parse_accounts(result: &Value) -> Result<Vec<Address>, PortError> {
    let arr = result.as_array().ok_or_else(|| {
        PortError::Transport("eth_requestAccounts result must be array".to_owned())
    })?;
    let mut accounts = Vec::with_capacity(arr.len());
    for item in arr {
        let raw = item.as_str().ok_or_else(|| {
            PortError::Transport("eth_requestAccounts item must be string".to_owned())
        })?;
        let parsed: Address = raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
        accounts.push(parsed);
    }
    Ok(accounts)
}

fn json_chain_id_to_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let s = value
        .as_str()
        .ok_or_else(|| PortError::Validation("chain id must be string or number".to_owned()))?;
    parse_chain_id_str(s)
}

fn parse_chain_id_str(raw: &str) -> Result<u64, PortError> {
    if raw.starts_with("0x") || raw.starts_with("0X") {
        u64::from_str_radix(raw.trim_start_matches("0x").trim_start_matches("0X"), 16)
            .map_err(|e| PortError::Validation(format!("invalid hex chain id: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid chain id: {e}")))
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_provider() -> Result<wasm_bindgen::JsValue, PortError> {
    let window =
        web_sys::window().ok_or_else(|| PortError::Transport("missing window".to_owned()))?;
    let provider = get_prop(&window.into(), "ethereum")?;
    if provider.is_null() || provider.is_undefined() {
        return Err(PortError::NotFound("window.ethereum missing".to_owned()));
    }
    Ok(provider)
}

#[cfg(target_arch = "wasm32")]
fn get_prop(target: &wasm_bindgen::JsValue, key: &str) -> Result<wasm_bindgen::JsValue, PortError> {
    js_sys::Reflect::get(target, &wasm_bindgen::JsValue::from_str(key))
        .map_err(|e| PortError::Transport(format!("read wallet property {key} failed: {e:?}")))
}

#[cfg(target_arch = "wasm32")]
fn js_chain_id_to_u64(value: wasm_bindgen::JsValue) -> Result<u64, PortError> {
    if let Some(s) = value.as_string() {
        return parse_chain_id_str(&s);
    }
    if let Some(num) = value.as_f64() {
        return Ok(num as u64);
    }
    Err(PortError::Validation("invalid JS chain id".to_owned()))
}
