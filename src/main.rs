use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snake_tui::app::GameLoop;
use snake_tui::game::GameConfig;
use snake_tui::score::FileScoreStore;

#[derive(Parser)]
#[command(name = "snake-tui")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {
    /// Side length of the square grid
    #[arg(long, default_value = "20", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    grid_size: usize,

    /// Initial tick delay in milliseconds (lower is faster)
    #[arg(long, default_value = "200", value_parser = clap::value_parser!(u64).range(1..))]
    speed: u64,

    /// File the high score is persisted in
    #[arg(long, default_value = "snake_scores.json")]
    score_file: PathBuf,

    /// Write logs to this file (the terminal itself belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "snake_tui=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false),
            )
            .init();
    }

    let config = GameConfig {
        grid_size: cli.grid_size,
        initial_delay_ms: cli.speed,
    };
    let score_store = FileScoreStore::open(cli.score_file);

    let mut game_loop = GameLoop::new(config, Box::new(score_store));
    game_loop.run().await?;

    Ok(())
}
