use std::fs::File;
use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use reflex_snake::game::{SimulationConfig, SimulationStatus};
use reflex_snake::modes::{
    new_game, prompt_game_source, GameSource, PlainMode, SourceKind, WatchMode,
};
use reflex_snake::render::TextRenderer;
use tracing::Level;

#[derive(Parser)]
#[command(name = "reflex_snake")]
#[command(version, about = "Snake that drives itself with a one-step reflex controller")]
struct Cli {
    /// Where the starting world comes from; asks on stdin when omitted
    #[arg(long)]
    source: Option<SourceKind>,

    /// Level file used by `--source level`
    #[arg(long, default_value = "level.txt")]
    level: PathBuf,

    /// How frames are shown
    #[arg(long, default_value = "plain")]
    view: View,

    /// JSON file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows for random worlds
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns for random worlds
    #[arg(long)]
    cols: Option<usize>,

    /// Food items in random worlds
    #[arg(long)]
    foods: Option<usize>,

    /// Extra walls in random worlds
    #[arg(long)]
    walls: Option<usize>,

    /// Chance of a voluntary turn each tick
    #[arg(long)]
    turn_probability: Option<f64>,

    /// Food eaten needed to win
    #[arg(long)]
    win_threshold: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Do not clear the terminal between plain frames
    #[arg(long)]
    no_clear: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// Print glyph frames to stdout
    Plain,
    /// Full-screen terminal view with pause and restart
    Tui,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(foods) = self.foods {
            config.food_count = foods;
        }
        if let Some(walls) = self.walls {
            config.wall_count = walls;
        }
        if let Some(p) = self.turn_probability {
            config.turn_probability = p;
        }
        if let Some(threshold) = self.win_threshold {
            config.win_threshold = threshold;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config
            .validate()
            .map_err(|msg| anyhow!("invalid configuration: {msg}"))?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    match (&cli.log_file, cli.view) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, View::Plain) => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
        // stderr belongs to the alternate screen
        (None, View::Tui) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.simulation_config()?;

    let kind = match cli.source {
        Some(kind) => kind,
        None => prompt_game_source(stdin().lock(), stdout())?,
    };
    let source = GameSource::from_kind(kind, cli.level.clone());
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);

    let status = match cli.view {
        View::Plain => {
            let sim = new_game(&source, &config, seed)?;
            let sink = TextRenderer::new(stdout(), !cli.no_clear);
            let mut mode = PlainMode::new(
                sim,
                sink,
                Duration::from_millis(config.tick_interval_ms),
            );
            mode.run().await?
        }
        View::Tui => {
            let mut mode = WatchMode::new(source, config, seed)?;
            mode.run().await?
        }
    };

    if status == SimulationStatus::Running {
        println!("Stopped before the game ended.");
    }
    println!("GOODBYE!");

    Ok(())
}
