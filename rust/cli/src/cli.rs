//! Command-line definition.

use clap::{Parser, Subcommand};
use spider_engine::deck::Difficulty;

use crate::validation::parse_difficulty;

#[derive(Parser, Debug)]
#[command(
    name = "spider",
    version,
    about = "Spider Solitaire in the terminal: play, deal and simulate seeded games"
)]
pub struct SpiderCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive game on stdin/stdout
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Number of suits: 1, 2 or 4
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
    },
    /// Print the opening layout of a game
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Autoplay seeded games and optionally record them as JSONL
    Sim {
        #[arg(long, default_value_t = 1)]
        games: u64,
        /// Base seed; game i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        /// Automatic player: baseline or random
        #[arg(long)]
        ai: Option<String>,
        /// Cap on actions per game
        #[arg(long)]
        max_moves: Option<u32>,
        /// Print each game as a JSON line on stdout (summary goes to stderr)
        #[arg(long)]
        records: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a sample from the seeded RNG
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
