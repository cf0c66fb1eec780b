//! Credence CLI - Command-line interface for the Credence credibility tracker.

use clap::Parser;
use credence_cli::commands;
use credence_cli::repl;
use credence_cli::{Cli, Command, Config, Formatter};
use credence_engine::{Engine, EngineConfig};
use credence_oracle::OllamaModel;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> credence_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Apply oracle overrides
    if let Some(endpoint) = cli.endpoint {
        config.oracle.endpoint = endpoint;
    }
    if let Some(model) = cli.model {
        config.oracle.model = model;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let model = OllamaModel::new(&config.oracle.endpoint, &config.oracle.model);
    let engine = Engine::new(model, EngineConfig::default());

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&engine, &formatter).await?;
        }
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &engine, &formatter).await?;
        }
    }

    Ok(())
}
