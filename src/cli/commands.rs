//! Subcommand implementations.
//!
//! Each runner writes to the given output so the binary can pass stdout and
//! tests can pass a buffer.

use super::{CheckArgs, ShowArgs};
use crate::bundle::JsonBundle;
use crate::config::Config;
use crate::contributions::ContributionInfo;
use crate::format::{ContributionSummary, format_contributions, format_summary};
use crate::resources::ResourceResolver;
use anyhow::Result;
use std::io::Write;
use tracing::{info, warn};

fn contributions_bundle<'a, R: ResourceResolver>(
    config: &Config,
    name: Option<&str>,
    resolver: &'a R,
) -> JsonBundle<ContributionInfo, &'a R> {
    let name = name.unwrap_or(config.resources.default_name.as_str());
    ContributionInfo::bundle(name, resolver).with_extension(config.resources.extension.clone())
}

/// Print a calendar, or an empty-state line when it cannot be loaded.
pub fn run_show<R: ResourceResolver, W: Write>(
    config: &Config,
    args: &ShowArgs,
    resolver: &R,
    out: &mut W,
) -> Result<()> {
    let bundle = contributions_bundle(config, args.name.as_deref(), resolver);
    let format = args.format.unwrap_or(config.output.format);

    match bundle.load() {
        Some(info) => {
            let rendered = format_contributions(&info, format)?;
            writeln!(out, "{}", rendered.trim_end())?;
        }
        None => {
            writeln!(out, "No contributions available for '{}'.", bundle.name())?;
        }
    }
    Ok(())
}

/// Print summary statistics, or an empty-state line.
pub fn run_summary<R: ResourceResolver, W: Write>(
    config: &Config,
    args: &ShowArgs,
    resolver: &R,
    out: &mut W,
) -> Result<()> {
    let bundle = contributions_bundle(config, args.name.as_deref(), resolver);
    let format = args.format.unwrap_or(config.output.format);

    match bundle.load() {
        Some(info) => {
            let summary = ContributionSummary::from_info(&info);
            let rendered = format_summary(&summary, format)?;
            writeln!(out, "{}", rendered.trim_end())?;
        }
        None => {
            writeln!(out, "No contributions available for '{}'.", bundle.name())?;
        }
    }
    Ok(())
}

/// Load with the typed error. Returns `false` when the resource fails.
pub fn run_check<R: ResourceResolver, W: Write>(
    config: &Config,
    args: &CheckArgs,
    resolver: &R,
    out: &mut W,
) -> Result<bool> {
    let bundle = contributions_bundle(config, args.name.as_deref(), resolver);

    match bundle.try_load() {
        Ok(info) => {
            let source = bundle
                .resolver()
                .resolve(bundle.name(), bundle.extension())
                .map(|h| h.source().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            info!(resource = %bundle.name(), records = info.len(), "Resource check passed");
            writeln!(
                out,
                "ok: {} ({} records, source: {})",
                bundle.name(),
                info.len(),
                source
            )?;
            Ok(true)
        }
        Err(err) => {
            warn!(resource = %err.resource_name(), code = err.code().as_str(), "Resource check failed");
            writeln!(out, "error [{}]: {}", err.code().as_str(), err)?;
            Ok(false)
        }
    }
}

/// List resources with the configured extension.
pub fn run_resources<R: ResourceResolver, W: Write>(
    config: &Config,
    resolver: &R,
    out: &mut W,
) -> Result<()> {
    let listed = resolver.list(&config.resources.extension);
    if listed.is_empty() {
        writeln!(out, "No resources found.")?;
        return Ok(());
    }

    for (name, source) in listed {
        let marker = if name == config.resources.default_name {
            " (default)"
        } else {
            ""
        };
        writeln!(out, "{:<32} {}{}", name, source, marker)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use crate::resources::{MemoryResolver, TieredResolver};

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_default_embedded_markdown() {
        let config = Config::default();
        let resolver = TieredResolver::embedded_only();
        let output = run(|out| run_show(&config, &ShowArgs::default(), &resolver, out));
        assert!(output.starts_with("# Contributions (45)"));
        assert!(output.contains("| 2024-01-10 | 12 | `#216e39` |"));
    }

    #[test]
    fn test_show_json_format() {
        let config = Config::default();
        let resolver = TieredResolver::embedded_only();
        let args = ShowArgs {
            name: Some("contributions_dark".into()),
            format: Some(OutputFormat::Json),
        };
        let output = run(|out| run_show(&config, &args, &resolver, out));
        let parsed: ContributionInfo = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 14);
    }

    #[test]
    fn test_show_missing_prints_empty_state() {
        let config = Config::default();
        let resolver = MemoryResolver::new();
        let output = run(|out| run_show(&config, &ShowArgs::default(), &resolver, out));
        assert_eq!(
            output,
            "No contributions available for 'contributions_light'.\n"
        );
    }

    #[test]
    fn test_summary_embedded() {
        let config = Config::default();
        let resolver = TieredResolver::embedded_only();
        let output = run(|out| run_summary(&config, &ShowArgs::default(), &resolver, out));
        assert!(output.contains("- **active_days**: 10"));
        assert!(output.contains("- **longest_streak**: 5"));
        assert!(output.contains("- **busiest**: 2024-01-10 (12)"));
    }

    #[test]
    fn test_summary_with_counts_at_i64_limit() {
        let config = Config::default();
        let resolver = MemoryResolver::new().with_resource(
            "huge",
            "json",
            format!(
                r##"{{"count": 1, "contributions": [{{"date": "2024-01-01", "contribution": {}, "hexColor": "#216e39"}}, {{"date": "2024-01-02", "contribution": 1, "hexColor": "#9be9a8"}}]}}"##,
                i64::MAX
            ),
        );
        let args = ShowArgs {
            name: Some("huge".into()),
            ..ShowArgs::default()
        };

        let output = run(|out| run_summary(&config, &args, &resolver, out));
        assert!(output.contains("- **summed**: 9223372036854775808"));
        assert!(output.contains("- **longest_streak**: 2"));
    }

    #[test]
    fn test_check_reports_kind() {
        let config = Config::default();
        let resolver = MemoryResolver::new().with_resource(
            "bad",
            "json",
            r##"{"count": 1, "contributions": [{"date": "2024-01-01", "contribution": "3", "hexColor": "#40c463"}]}"##,
        );

        let mut out = Vec::new();
        let args = CheckArgs {
            name: Some("bad".into()),
        };
        assert!(!run_check(&config, &args, &resolver, &mut out).unwrap());
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("error [SCHEMA_MISMATCH]"));

        let mut out = Vec::new();
        let args = CheckArgs {
            name: Some("absent".into()),
        };
        assert!(!run_check(&config, &args, &resolver, &mut out).unwrap());
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("error [RESOURCE_NOT_FOUND]"));
    }

    #[test]
    fn test_check_ok() {
        let config = Config::default();
        let resolver = TieredResolver::embedded_only();
        let mut out = Vec::new();
        assert!(run_check(&config, &CheckArgs::default(), &resolver, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ok: contributions_light (14 records, source: embedded)\n"
        );
    }

    #[test]
    fn test_resources_listing() {
        let config = Config::default();
        let resolver = TieredResolver::embedded_only();
        let output = run(|out| run_resources(&config, &resolver, out));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("contributions_dark"));
        assert!(lines[1].ends_with("embedded (default)"));
    }

    #[test]
    fn test_resources_empty() {
        let config = Config::default();
        let resolver = TieredResolver::embedded_only().with_embedded(false);
        let output = run(|out| run_resources(&config, &resolver, out));
        assert_eq!(output, "No resources found.\n");
    }
}
