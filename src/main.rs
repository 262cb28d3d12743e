//! contrib-bundle
//!
//! Loads contribution calendars bundled with the application and prints them.

use anyhow::Result;
use clap::Parser;
use contrib_bundle::cli::commands::{run_check, run_resources, run_show, run_summary};
use contrib_bundle::cli::{Cli, Command, ShowArgs};
use contrib_bundle::config::{ConfigLoader, ConfigPaths};
use contrib_bundle::logging::{LogTarget, init_logging};
use std::process::ExitCode;
use tracing::debug;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut loader = match cli.config {
        Some(ref path) => ConfigLoader::load_explicit(ConfigPaths::discover(), path.clone())?,
        None => ConfigLoader::load()?,
    };

    for (tier, path) in loader.sources() {
        debug!(tier = %tier, path = %path.display(), "Merged settings file");
    }

    // CLI flags override every settings tier
    let config = loader.config_mut();
    if let Some(ref dir) = cli.resource_dir {
        config.resources.dir = Some(dir.clone());
    }
    if cli.no_embedded {
        config.resources.embedded = false;
    }

    let resolver = loader.resolver();
    let config = loader.config();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Command::Show(ref args)) => run_show(config, args, &resolver, &mut stdout)?,
        Some(Command::Summary(ref args)) => run_summary(config, args, &resolver, &mut stdout)?,
        Some(Command::Check(ref args)) => {
            if !run_check(config, args, &resolver, &mut stdout)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Command::Resources) => run_resources(config, &resolver, &mut stdout)?,
        None => run_show(config, &ShowArgs::default(), &resolver, &mut stdout)?,
    }

    Ok(ExitCode::SUCCESS)
}
