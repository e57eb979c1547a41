mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::JobBoardApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Response field holding the job list (`results` or `data`).
    #[arg(long)]
    results_field: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = &args.api_base_url {
        settings = settings.with_api_base_url(url);
    }
    if let Some(field) = &args.results_field {
        settings = settings.with_results_field(field);
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Job Board")
            .with_inner_size([480.0, 800.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Job Board",
        options,
        Box::new(|_cc| Ok(Box::new(JobBoardApp::new(cmd_tx, ui_rx)))),
    )
}
