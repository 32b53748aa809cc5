use alloy::primitives::{Address, Bytes, B256};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{AccountSelector, SignMethod};
use crate::signer::Signer;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("provider not found: {0}")]
    NotFound(String),
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy refused: {0}")]
    Policy(String),
}

pub trait ProviderPort {
    fn request_accounts(&self) -> Result<Vec<Address>, PortError>;
    fn chain_id(&self) -> Result<u64, PortError>;
    fn sign_payload(
        &self,
        method: SignMethod,
        payload: &[u8],
        expected_signer: Address,
    ) -> Result<Bytes, PortError>;
    fn send_transaction(&self, tx_payload: &Value) -> Result<B256, PortError>;

    // Derivation is free of wallet requests; the account resolves lazily.
    fn signer(&self) -> Signer<Self>
    where
        Self: Clone + Sized,
    {
        Signer::new(self.clone(), AccountSelector::default())
    }

    fn signer_for(&self, account: AccountSelector) -> Signer<Self>
    where
        Self: Clone + Sized,
    {
        Signer::new(self.clone(), account)
    }
}
