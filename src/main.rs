//! Socratic CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use socratic::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate(args) => socratic::cli::commands::simulate::execute(args, cli.json).await,
        Commands::Config(args) => socratic::cli::commands::config::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        socratic::cli::handle_error(err, cli.json);
    }
}
