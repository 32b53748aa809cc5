use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountSelector {
    Index(usize),
    Address(Address),
}

impl Default for AccountSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignMethod {
    PersonalSign,
    EthSign,
    EthSignTypedData,
    EthSignTypedDataV4,
}

impl SignMethod {
    pub fn rpc_name(self) -> &'static str {
        match self {
            SignMethod::PersonalSign => "personal_sign",
            SignMethod::EthSign => "eth_sign",
            SignMethod::EthSignTypedData => "eth_signTypedData",
            SignMethod::EthSignTypedDataV4 => "eth_signTypedData_v4",
        }
    }
}
