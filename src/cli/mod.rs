//! CLI command definitions for contrib-bundle
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod commands;

use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Load and inspect JSON resources bundled with the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a settings file (skips project and user tiers)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Resource directory searched before all other tiers
    #[arg(short, long, global = true)]
    pub resource_dir: Option<PathBuf>,

    /// Do not fall back to resources compiled into the binary
    #[arg(long, global = true)]
    pub no_embedded: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a contribution resource (default if no subcommand given)
    Show(ShowArgs),

    /// Print aggregate statistics for a contribution resource
    Summary(ShowArgs),

    /// Load a resource and report exactly why it fails, if it does
    Check(CheckArgs),

    /// List resolvable resources and the tier serving each
    Resources,
}

/// Arguments for `show` and `summary`.
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Resource name without extension (default from settings)
    pub name: Option<String>,

    /// Output format (default from settings)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `check`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Resource name without extension (default from settings)
    pub name: Option<String>,
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
    fn test_parse_show_with_format() {
        let cli = Cli::parse_from(["contrib-bundle", "show", "contributions_dark", "-f", "json"]);
        match cli.command {
            Some(Command::Show(args)) => {
                assert_eq!(args.name.as_deref(), Some("contributions_dark"));
                assert_eq!(args.format, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "contrib-bundle",
            "check",
            "--resource-dir",
            "/srv/bundles",
            "--no-embedded",
        ]);
        assert_eq!(cli.resource_dir, Some(PathBuf::from("/srv/bundles")));
        assert!(cli.no_embedded);
        assert!(matches!(cli.command, Some(Command::Check(_))));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["contrib-bundle"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log, "2");
    }
}
