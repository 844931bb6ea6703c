pub mod alphabet;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod output;
pub mod sampler;

use std::path::PathBuf;

use anyhow::Result;

use cli::{Cli, Commands};
use config::Config;

pub const CONFIG_FILE: &str = "keymint.toml";

/// Finds the nearest `keymint.toml` by walking up from the current
/// directory. Returns `None` if no config file is found.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let mut dir = current_dir.as_path();

    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        dir = dir.parent()?;
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            count,
            expires,
            no_uppercase,
            no_digits,
            exclude_similar,
            output,
            json,
            quiet,
        } => {
            let config = Config::load()?;
            commands::generate::run(
                count,
                expires,
                no_uppercase,
                no_digits,
                exclude_similar,
                output,
                json,
                quiet,
                &config,
            )
        }
        Commands::Alphabet {
            no_uppercase,
            no_digits,
            exclude_similar,
            json,
        } => commands::alphabet::run(no_uppercase, no_digits, exclude_similar, json),
        Commands::Check { file, json } => {
            let report = commands::check::run(&file)?;
            output::check_report(&report, json)?;
            if !report.is_ok() {
                anyhow::bail!("{} failed verification", file.display());
            }
            Ok(())
        }
    }
}
