use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gym_snake::game::GameConfig;
use gym_snake::modes::{PlayMode, RolloutConfig, RolloutMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gym-snake")]
#[command(version, about = "Snake environment with a reset/step/render loop")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value_t = Mode::Rollout)]
    mode: Mode,

    /// JSON game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Seed for food placement and the random agent
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to run (rollout mode)
    #[arg(long, default_value_t = 10)]
    episodes: usize,

    /// Step cap per episode (rollout mode)
    #[arg(long, default_value_t = 1000)]
    max_steps: usize,

    /// Draw every step to the terminal (rollout mode)
    #[arg(long)]
    render: bool,

    /// Log a summary every N episodes (rollout mode)
    #[arg(long, default_value_t = 100)]
    log_frequency: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Play,
    /// Let a random agent play
    Rollout,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        config
            .with_overrides(self.width, self.height, self.seed)
            .context("Invalid game configuration")
    }
}

fn init_logging(interactive: bool) {
    // Log lines would tear the full-screen UI, so keep it quiet by default.
    let default = if interactive { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.mode == Mode::Play || cli.render);

    let game_config = cli.game_config()?;

    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(game_config)?;
            play_mode.run().await?;
        }
        Mode::Rollout => {
            let rollout_config = RolloutConfig {
                max_steps: cli.max_steps,
                render: cli.render,
                log_frequency: cli.log_frequency,
                ..RolloutConfig::new(cli.episodes, game_config)
            };
            let mut rollout_mode = RolloutMode::new(rollout_config)?;
            let stats = rollout_mode.run().await?;

            info!("rollout finished");
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
