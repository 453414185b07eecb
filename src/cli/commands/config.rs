//! Configuration CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration after all overrides
    Show,
    /// Validate the configuration and report the first violation
    Validate {
        /// Validate a specific file instead of the hierarchical config
        #[arg(short, long)]
        file: Option<String>,
    },
}

pub async fn execute(args: ConfigArgs, json: bool) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let config = ConfigLoader::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to render configuration")?;
                print!("{yaml}");
            }
        }
        ConfigCommands::Validate { file } => {
            let config = match file {
                Some(path) => ConfigLoader::load_from_file(path)?,
                None => ConfigLoader::load()?,
            };
            ConfigLoader::validate(&config)?;
            if json {
                println!("{}", serde_json::json!({ "success": true }));
            } else {
                println!("Configuration is valid");
            }
        }
    }
    Ok(())
}
