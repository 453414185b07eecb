//! CLI type definitions and error handling.
//!
//! This module contains the clap command structures that define the CLI
//! interface; command implementations live under `commands`.

use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "socratic")]
#[command(about = "Socratic - Adaptive Interview Orchestration Engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted interview against in-process collaborators
    Simulate(commands::simulate::SimulateArgs),

    /// Configuration management commands
    Config(commands::config::ConfigArgs),
}

/// Prints a boundary error and exits non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        eprintln!(
            "{}",
            serde_json::json!({ "success": false, "error": err.to_string() })
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
