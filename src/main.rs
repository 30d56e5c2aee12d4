use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use retro_snake::audio::{CuePlayer, Silent, TerminalBell};
use retro_snake::game::{GameConfig, GameEngine};
use retro_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retro_snake")]
#[command(version, about = "Retro grid snake in the terminal")]
struct Cli {
    /// JSON file with game settings; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the board (overrides the config file)
    #[arg(long)]
    cell_count: Option<i32>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell when the snake crashes
    #[arg(long)]
    bell: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(cell_count) = cli.cell_count {
        config.cell_count = cell_count;
    }

    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli).context("Invalid configuration")?;

    let sound: Box<dyn CuePlayer> = if cli.bell {
        Box::new(TerminalBell::new(std::io::stderr()))
    } else {
        Box::new(Silent)
    };

    match cli.seed {
        Some(seed) => {
            let engine = GameEngine::new_with_rng(config, StdRng::seed_from_u64(seed));
            let mut mode = HumanMode::new(engine).with_sound(sound);
            mode.run().await
        }
        None => {
            let mut mode = HumanMode::new(GameEngine::new(config)).with_sound(sound);
            mode.run().await
        }
    }
}
