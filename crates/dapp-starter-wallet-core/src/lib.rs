pub mod domain;
pub mod ports;
pub mod signer;

pub use domain::{AccountSelector, SignMethod};
pub use ports::{PortError, ProviderPort};
pub use signer::Signer;
