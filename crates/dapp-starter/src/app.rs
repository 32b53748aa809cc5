//! Application shell: wallet bootstrap and the starter view

use egui::{CentralPanel, Context};

use dapp_starter_wallet_adapters::InjectedProvider;
use dapp_starter_wallet_core::{PortError, ProviderPort};

/// The application. The scaffold holds no state yet: the wallet handles are
/// established at creation and nothing reads them until features land.
pub struct App;

impl App {
    /// Bind the injected wallet provider, derive the default signer, and
    /// hand back the empty shell. Fails when no injection point exists.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, PortError> {
        let provider = InjectedProvider::from_env()?;
        let _signer = provider.signer();

        Ok(Self)
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("starter project");
        });
    }
}
