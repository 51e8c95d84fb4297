// Desktop entry point for the booking wizard
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use booking::{BookingConfig, ChannelNotifier};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "booking-desktop", about = "Vehicle booking wizard", version)]
struct Args {
    /// Base URL of the vehicle services
    #[arg(long)]
    api_url: Option<String>,

    /// TOML file with service settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = BookingConfig::load(args.config.as_deref())
        .context("failed to load booking configuration")?;
    if let Some(url) = args.api_url {
        config = config.with_api_url(url);
    }

    let (notifier, notifications) = ChannelNotifier::new();
    let controller = booking::connect(&config, Arc::new(notifier));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([520.0, 420.0])
            .with_title("Vehicle Booking"),
        ..Default::default()
    };

    eframe::run_native(
        "Vehicle Booking",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app::BookingApp::new(controller, notifications)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("desktop window failed: {e}"))
}
