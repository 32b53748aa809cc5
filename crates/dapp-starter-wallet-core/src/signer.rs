use alloy::primitives::{Address, Bytes, B256};
use serde_json::Value;

use crate::domain::{AccountSelector, SignMethod};
use crate::ports::{PortError, ProviderPort};

#[derive(Debug, Clone)]
pub struct Signer<P> {
    provider: P,
    account: AccountSelector,
}

impl<P: ProviderPort> Signer<P> {
    pub fn new(provider: P, account: AccountSelector) -> Self {
        Self { provider, account }
    }

    pub fn account(&self) -> AccountSelector {
        self.account
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn address(&self) -> Result<Address, PortError> {
        let accounts = self.provider.request_accounts()?;
        match self.account {
            AccountSelector::Index(i) => accounts.get(i).copied().ok_or_else(|| {
                PortError::Validation(format!(
                    "wallet exposes {} account(s), none at index {i}",
                    accounts.len()
                ))
            }),
            AccountSelector::Address(addr) => accounts
                .iter()
                .find(|a| **a == addr)
                .copied()
                .ok_or_else(|| {
                    PortError::Validation(format!("wallet does not expose account {addr}"))
                }),
        }
    }

    pub fn sign_message(&self, message: &[u8]) -> Result<Bytes, PortError> {
        let from = self.address()?;
        self.provider
            .sign_payload(SignMethod::PersonalSign, message, from)
    }

    pub fn sign_typed_data(&self, typed_data: &Value) -> Result<Bytes, PortError> {
        let from = self.address()?;
        let payload = serde_json::to_vec(typed_data)
            .map_err(|e| PortError::Validation(format!("typed data serialization failed: {e}")))?;
        self.provider
            .sign_payload(SignMethod::EthSignTypedDataV4, &payload, from)
    }

    pub fn send_transaction(&self, tx_payload: &Value) -> Result<B256, PortError> {
        let from = self.address()?;
        let mut payload = tx_payload.clone();
        match payload {
            Value::Object(ref mut fields) => {
                // An explicit "from" passes through untouched.
                fields
                    .entry("from")
                    .or_insert_with(|| Value::String(from.to_string()));
            }
            _ => {
                return Err(PortError::Validation(
                    "transaction payload must be a JSON object".to_owned(),
                ))
            }
        }
        self.provider.send_transaction(&payload)
    }
}
