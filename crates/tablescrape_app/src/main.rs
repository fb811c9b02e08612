mod app;
mod commands;
mod config;
mod effects;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use tablescrape_engine::TableEngine;

use crate::app::App;
use crate::config::{ConfigOrigin, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "tablescrape",
    version,
    about = "Fetch the HTML tables of a web page, browse them and export a selection."
)]
struct Cli {
    /// Page to fetch on startup.
    #[arg(long)]
    url: Option<String>,
    /// RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides the log level from the configuration (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, origin) = config::load_config(&cli.config)?;

    let level_name = cli.log_level.as_deref().unwrap_or(&config.log.level);
    engine_logging::initialize(config.log.destination, engine_logging::parse_level(level_name));
    match &origin {
        ConfigOrigin::File(path) => engine_info!("loaded configuration from {:?}", path),
        ConfigOrigin::Defaults => engine_info!(
            "no configuration at {:?}, using defaults",
            cli.config
        ),
    }

    let engine =
        TableEngine::new(config.fetch.to_settings()).context("failed to start the fetch engine")?;

    let stdin = io::stdin();
    let mut app = App::new(Box::new(engine), stdin.lock(), io::stdout(), config.preview_rows);
    app.run(cli.url)?;
    engine_info!("session ended");
    Ok(())
}
