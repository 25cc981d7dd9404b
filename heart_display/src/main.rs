// main.rs - heart-display: question, celebration, then a heart of Life

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;

mod app;        // Scene sequencing
mod automaton;  // Game of Life scene
mod settings;   // TOML settings
mod ui;         // eframe::App impl

use app::HeartApp;
use settings::AppConfig;

#[derive(Parser)]
#[command(name = "heart-display")]
#[command(about = "Asks a question, then grows a heart of Conway's Game of Life", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Label drawn inside the heart, e.g. "B + S"
    #[arg(long)]
    label: Option<String>,

    /// Fixed rng seed for reproducible hearts
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(label) = cli.label {
        config.life.label = label;
    }

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    let title = config.window.title.clone();
    let seed = cli.seed;
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(HeartApp::new(config, runtime, seed))),
    )
    .map_err(|err| anyhow::anyhow!("eframe: {err}"))
}
