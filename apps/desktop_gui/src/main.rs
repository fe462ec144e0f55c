use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, FormController, PredictionClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{GuiFormView, PredictorApp, SharedFormModel};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long)]
    server_url: Option<String>,
    /// TOML settings file (defaults to ./predictor.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load predictor settings")?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let client = PredictionClient::new(&settings).context("failed to build prediction client")?;
    let endpoint = client.endpoint().to_string();
    tracing::info!(%endpoint, "starting placement predictor");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Placement Predictor")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([520.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Placement Predictor",
        options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx);
            let model = SharedFormModel::default();
            let view = GuiFormView::new(Arc::clone(&model), cc.egui_ctx.clone());
            let controller = Arc::new(FormController::new(view, client, &settings));
            backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::clone(&controller))?;
            Ok(Box::new(PredictorApp::new(
                model, controller, cmd_tx, ui_rx, endpoint,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
