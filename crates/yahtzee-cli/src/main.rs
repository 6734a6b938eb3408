//! CLI frontend for two-player Yahtzee.

mod commands;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "YAHTZEE_LOG";

#[derive(Parser)]
#[command(
    name = "yahtzee",
    about = "Two-player Yahtzee at the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat game with typed commands
    Play {
        /// RNG seed for the dice
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Rounds to play (1-13)
        #[arg(short, long, default_value = "13")]
        rounds: u32,

        /// Replay dice from a file, one hand per line, instead of rolling
        #[arg(long)]
        dice: Option<PathBuf>,

        /// Write the markdown game log here when the game ends
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Score five dice in every category, or in one
    Score {
        /// Five face values, 1-6
        #[arg(num_args = 5, required = true)]
        dice: Vec<u8>,

        /// Only score this category
        #[arg(short, long)]
        category: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Play in the terminal UI
    Tui {
        /// RNG seed for the dice
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Rounds to play (1-13)
        #[arg(short, long, default_value = "13")]
        rounds: u32,

        /// Frames the dice take to settle
        #[arg(long, default_value = "4")]
        latency: u32,

        /// Write tracing output to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            seed,
            rounds,
            dice,
            log,
        } => {
            init_tracing(None);
            commands::play::run(seed, rounds, dice.as_deref(), log.as_deref())
        }
        Commands::Score {
            dice,
            category,
            json,
        } => {
            init_tracing(None);
            commands::score::run(&dice, category.as_deref(), json)
        }
        Commands::Tui {
            seed,
            rounds,
            latency,
            log_file,
        } => {
            // The terminal is taken over, so only log when sent to a file.
            if let Some(path) = &log_file {
                init_tracing(Some(path));
            }
            commands::tui::run(seed, rounds, latency)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Install the tracing subscriber, filtered by `YAHTZEE_LOG` (default `warn`).
fn init_tracing(file: Option<&Path>) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match file.map(File::create) {
        Some(Ok(file)) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        Some(Err(e)) => {
            eprintln!("warning: cannot open log file: {e}");
            return;
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if let Err(e) = installed {
        eprintln!("warning: tracing already initialized: {e}");
    }
}
