pub mod config;
pub mod injected;

pub use config::WalletAdapterConfig;
pub use injected::InjectedProvider;
