//! FarmTech CLI - culture plot registry.

mod cli;
mod commands;
mod interactive;
mod render;
mod session;

use clap::Parser;
use cli::{Cli, Commands};
use farmtech::StorageConfig;
use log::LevelFilter;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = StorageConfig::resolve(cli.data_dir);
    log::debug!("Using data directory {}", config.data_dir.display());

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => interactive::run(&config),
        Commands::List { json } => commands::list::run(&config, json),
        Commands::Show { id } => commands::show::run(&config, id),
        Commands::Export => commands::export::run(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init().ok();
}
