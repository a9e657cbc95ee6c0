use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use term_snake::audio::{AudioController, TerminalBell};
use term_snake::game::{GameConfig, Level};
use term_snake::modes::PlayMode;
use term_snake::storage::{JsonFileStore, PreferenceStore, default_data_dir};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Starting level (defaults to the last level picked in the menu)
    #[arg(long)]
    level: Option<LevelArg>,

    /// Directory for preferences and logs
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log file (defaults to term_snake.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start with sound off for this session
    #[arg(long)]
    mute: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Easy,
    Normal,
    Hard,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Easy => Level::Easy,
            LevelArg::Normal => Level::Normal,
            LevelArg::Hard => Level::Hard,
        }
    }
}

/// Send logs to a file; the terminal itself belongs to the game
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(default_data_dir)
        .context("Could not determine a data directory, pass --data-dir")?;
    let log_file = cli
        .log_file
        .unwrap_or_else(|| data_dir.join("term_snake.log"));
    init_logging(&log_file)?;

    let store = JsonFileStore::in_dir(&data_dir);
    let prefs = store.load();

    // Create game configuration from CLI arguments
    let mut config = GameConfig::new(cli.width, cli.height);
    config.level = cli.level.map(Level::from).unwrap_or(prefs.level);

    info!(
        width = config.grid_width,
        height = config.grid_height,
        level = %config.level,
        data_dir = ?data_dir,
        "Starting term_snake"
    );

    let audio = AudioController::new(
        Box::new(TerminalBell::stderr()),
        prefs.sound_enabled && !cli.mute,
    );

    // Rejects a grid or snake length the engine cannot play
    let mut play_mode = PlayMode::new(config, prefs, store, audio)?;
    play_mode.run().await?;

    Ok(())
}
