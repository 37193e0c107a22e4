use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban-sim")]
#[command(author, version, about = "Headless Kanban board simulator")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an engine config file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a new game with the greedy autoplayer
    Run {
        /// Random seed (overrides the config file)
        #[arg(long, env = "KANBAN_SIM_SEED")]
        seed: Option<u64>,

        /// Days to play (overrides the config horizon)
        #[arg(long)]
        days: Option<u32>,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,

        /// Write the final game state to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Continue a saved game
    Resume {
        /// Saved game produced by `--export`
        #[arg(long)]
        state: PathBuf,

        /// Random seed for the remaining days
        #[arg(long, env = "KANBAN_SIM_SEED")]
        seed: Option<u64>,

        /// Days to play (default: until the horizon)
        #[arg(long)]
        days: Option<u32>,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,

        /// Write the final game state to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Print the rule table and its fingerprint
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
