mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, ClientSettings, Controller};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DesktopGuiApp;

const APP_TITLE: &str = "Company Information Desk";

#[derive(Parser, Debug)]
#[command(name = "company-desk", about = "Desktop client for the company information service")]
struct Args {
    /// Backend base URL; overrides client.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    /// chrono format pattern used to display founded dates.
    #[arg(long)]
    date_format: Option<String>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(url) = &args.server_url {
        settings.server_url = url.clone();
    }
    if let Some(format) = &args.date_format {
        settings.date_format = format.clone();
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let initial = Controller::new(settings.date_style()).view();
    backend_bridge::runtime::launch(&settings, cmd_rx, ui_tx)
        .context("failed to start backend worker")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let server_url = settings.server_url.clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DesktopGuiApp::new(
                cmd_tx, ui_rx, initial, server_url,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop app exited with an error: {err}"))
}
