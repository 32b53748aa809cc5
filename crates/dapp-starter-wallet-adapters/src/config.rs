use std::env;

#[derive(Debug, Clone)]
pub struct WalletAdapterConfig {
    pub allow_eth_sign: bool,
    pub rpc_url: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for WalletAdapterConfig {
    fn default() -> Self {
        Self {
            allow_eth_sign: false,
            rpc_url: None,
            request_timeout_ms: 15_000,
        }
    }
}

impl WalletAdapterConfig {
    // Unset or unparseable variables keep the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("DAPP_STARTER_RPC_URL") {
            if !url.is_empty() {
                config.rpc_url = Some(url);
            }
        }
        if let Ok(raw) = env::var("DAPP_STARTER_RPC_TIMEOUT_MS") {
            if let Ok(ms) = raw.parse() {
                config.request_timeout_ms = ms;
            }
        }
        if let Ok(raw) = env::var("DAPP_STARTER_ALLOW_ETH_SIGN") {
            config.allow_eth_sign = matches!(raw.as_str(), "1" | "true" | "yes");
        }
        config
    }
}
