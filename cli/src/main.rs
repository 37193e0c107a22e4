mod autoplay;
mod commands;
mod config;
mod handlers;
mod logging;

use anyhow::Result;
use clap::Parser;

use commands::{Cli, Commands};
use config::load_engine_config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Run {
            seed,
            days,
            json,
            export,
        } => {
            let config = load_engine_config(cli.config.as_deref(), seed, days)?;
            handlers::handle_run(config, json, export.as_deref())
        }
        Commands::Resume {
            state,
            seed,
            days,
            json,
            export,
        } => {
            let config = load_engine_config(cli.config.as_deref(), seed, None)?;
            handlers::handle_resume(config, &state, days, json, export.as_deref())
        }
        Commands::Rules { json } => handlers::handle_rules(json),
    }
}
