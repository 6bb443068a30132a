//! api-toolkit CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use api_toolkit::config::ToolkitConfig;
use clap::{Parser, Subcommand};

pub use commands::GenerateCommand;

/// Command line interface
#[derive(Debug, Parser)]
#[command(name = "api-toolkit")]
#[command(version)]
#[command(about = "Generate CRUD API scaffolding from a compact schema", long_about = None)]
pub struct Cli {
    /// Configuration file, replacing the user and project config files
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate model, migration, controller and friends for one model
    Generate(GenerateCommand),
}

impl Cli {
    /// Load configuration, honouring `--config`
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed.
    pub fn load_config(&self) -> Result<ToolkitConfig> {
        let config = match &self.config {
            Some(path) => ToolkitConfig::load_from(path)?,
            None => ToolkitConfig::load()?,
        };
        Ok(config)
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or the command fails.
    pub fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(?config, "configuration loaded");

        match &self.command {
            Commands::Generate(command) => {
                command.execute(&config)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "api-toolkit",
            "-vv",
            "generate",
            "post",
            "title:string",
            "-cfFtmsrR",
            "-g",
            "blog",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Generate(command) = cli.command;
        assert_eq!(command.model, "post");
        assert_eq!(command.schema.as_deref(), Some("title:string"));
        assert_eq!(command.group.as_deref(), Some("blog"));
        let flags = command.flags();
        assert!(flags.controller && flags.factory && flags.filter && flags.test);
        assert!(flags.migration && flags.seeder && flags.resource && flags.request);
        assert!(!flags.all && !flags.routes && !flags.soft_delete);
    }

    #[test]
    fn test_parse_long_flags() {
        let cli = Cli::try_parse_from([
            "api-toolkit",
            "generate",
            "post",
            "--all",
            "--soft-delete",
            "--routes",
            "--force",
            "--plugin",
            "out",
            "--namespace",
            "Acme\\Blog",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Commands::Generate(command) = cli.command;
        assert!(command.all && command.soft_delete && command.routes && command.force);
        assert_eq!(command.plugin, Some(PathBuf::from("out")));
        assert_eq!(command.schema, None);
    }

    #[test]
    fn test_model_is_required() {
        assert!(Cli::try_parse_from(["api-toolkit", "generate"]).is_err());
    }
}
