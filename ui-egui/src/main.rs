// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the egui UI

use anyhow::{anyhow, Result};
use clap::Parser;
use gomoku_core::local::{HotSeatGame, LoopbackClient};
use gomoku_core::{ConnectionSource, GameSource};
use gomoku_ui_egui::{GomokuApp, UiConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gomoku-ui-egui")]
#[command(about = "Two-player Gomoku with an egui board")]
struct Args {
    #[arg(long, help = "Rows and columns of the board")]
    board_size: Option<usize>,

    #[arg(long, help = "Pixels per cell")]
    cell_size: Option<f32>,

    #[arg(long, help = "Host offered by the connect dialog")]
    host: Option<String>,

    #[arg(long, help = "Port offered by the connect dialog")]
    port: Option<u16>,

    #[arg(long, help = "JSON config file")]
    config: Option<PathBuf>,

    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

fn load_config(args: &Args) -> Result<UiConfig> {
    let mut config = match &args.config {
        Some(path) => UiConfig::load_from_file(path)?,
        None => UiConfig::default(),
    };

    if let Some(size) = args.board_size {
        config.board.size = size;
    }
    if let Some(cell_size) = args.cell_size {
        config.board.cell_size = cell_size;
    }
    if let Some(host) = &args.host {
        config.connect.host = host.clone();
    }
    if let Some(port) = args.port {
        config.connect.port = port;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let config = load_config(&args)?;
    tracing::info!(
        board_size = config.board.size,
        cell_size = config.board.cell_size,
        "Starting Gomoku"
    );

    let client: Arc<dyn ConnectionSource> = Arc::new(LoopbackClient::new());
    let game: Arc<dyn GameSource> = HotSeatGame::new(config.board.size, client.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_title(config.window.title.clone()),
        centered: true,
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(GomokuApp::new(&cc.egui_ctx, game, client, &config))),
    )
    .map_err(|e| anyhow!("Failed to run eframe: {}", e))
}
