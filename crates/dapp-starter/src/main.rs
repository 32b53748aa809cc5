//! dapp-starter: a wallet-enabled egui starter shell

use eframe::egui;

mod app;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting dapp-starter");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("dapp-starter")
            .with_inner_size([640.0, 400.0])
            .with_min_inner_size([320.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dapp-starter",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)?))),
    )
}
