//! Settings loader with tier-based merging.
//!
//! Loads `config.yaml` from the project and user tiers, merges them
//! field-by-field over the defaults, then applies environment overrides.

use super::merge::deep_merge_all;
use super::types::Config;
use crate::format::OutputFormat;
use crate::resources::TieredResolver;
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings file name inside each tier directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Resource subdirectory inside each tier directory.
pub const RESOURCES_DIR: &str = "resources";

/// Settings file tier priority (lowest to highest).
///
/// Compiled-in defaults sit below every tier and environment overrides above
/// them; neither is a file, so neither appears in [`ConfigLoader::sources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Project-level settings (./contrib-bundle/)
    Project = 0,
    /// User-level settings (~/.contrib-bundle/)
    User = 1,
    /// Single file given by `--config` or `CONTRIB_BUNDLE_CONFIG_PATH`
    Explicit = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Explicit => write!(f, "explicit"),
        }
    }
}

/// Directories for each configuration tier.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project-level directory
    pub project_dir: Option<PathBuf>,
    /// User-level directory
    pub user_dir: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover tier directories from environment and defaults.
    pub fn discover() -> Self {
        // User dir: CONTRIB_BUNDLE_USER_DIR or ~/.contrib-bundle
        let user_dir = std::env::var("CONTRIB_BUNDLE_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".contrib-bundle")));

        // Project dir: CONTRIB_BUNDLE_PROJECT_DIR or $CWD/contrib-bundle
        let project_dir = std::env::var("CONTRIB_BUNDLE_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("contrib-bundle")));

        Self {
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }

    pub fn project_resources_dir(&self) -> Option<PathBuf> {
        self.project_dir.as_ref().map(|d| d.join(RESOURCES_DIR))
    }

    pub fn user_resources_dir(&self) -> Option<PathBuf> {
        self.user_dir.as_ref().map(|d| d.join(RESOURCES_DIR))
    }
}

/// Settings loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directories for each tier
    pub paths: ConfigPaths,
    /// Merged settings
    config: Config,
    /// Settings files that contributed, lowest tier first
    sources: Vec<(ConfigTier, PathBuf)>,
}

impl ConfigLoader {
    /// Load settings from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load settings with explicit tier directories.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        // Explicit settings file overrides every tier
        if let Ok(explicit_path) = std::env::var("CONTRIB_BUNDLE_CONFIG_PATH") {
            return Self::load_explicit(paths, PathBuf::from(explicit_path));
        }

        let mut layers: Vec<Value> = Vec::new();
        let mut sources = Vec::new();

        // Tier 1: Defaults
        layers.push(serde_json::to_value(Config::default())?);

        // Tier 2: Project settings
        if let Some(ref project_dir) = paths.project_dir {
            let file = project_dir.join(CONFIG_FILE);
            if let Some(value) = read_yaml_layer(&file) {
                layers.push(value);
                sources.push((ConfigTier::Project, file));
            }
        }

        // Tier 3: User settings
        if let Some(ref user_dir) = paths.user_dir {
            let file = user_dir.join(CONFIG_FILE);
            if let Some(value) = read_yaml_layer(&file) {
                layers.push(value);
                sources.push((ConfigTier::User, file));
            }
        }

        let merged = deep_merge_all(layers);
        let mut config: Config = serde_json::from_value(merged)?;

        // Tier 4: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    /// Load a single settings file, skipping the project and user tiers.
    pub fn load_explicit(paths: ConfigPaths, path: PathBuf) -> Result<Self> {
        let mut config = Config::load(&path)?;
        Self::apply_env_overrides(&mut config);
        Ok(Self {
            paths,
            config,
            sources: vec![(ConfigTier::Explicit, path)],
        })
    }

    /// Apply environment variable overrides to settings.
    fn apply_env_overrides(config: &mut Config) {
        if let Ok(dir) = std::env::var("CONTRIB_BUNDLE_RESOURCE_DIR") {
            config.resources.dir = Some(PathBuf::from(dir));
        }

        if let Ok(embedded) = std::env::var("CONTRIB_BUNDLE_EMBEDDED") {
            match parse_flag(&embedded) {
                Some(enabled) => config.resources.embedded = enabled,
                None => warn!(value = %embedded, "Ignoring unrecognized CONTRIB_BUNDLE_EMBEDDED"),
            }
        }

        if let Ok(format) = std::env::var("CONTRIB_BUNDLE_FORMAT") {
            match OutputFormat::parse(&format) {
                Some(format) => config.output.format = format,
                None => warn!(value = %format, "Ignoring unrecognized CONTRIB_BUNDLE_FORMAT"),
            }
        }
    }

    /// Get the merged settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable access to the settings.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Settings files that were merged, lowest tier first.
    pub fn sources(&self) -> &[(ConfigTier, PathBuf)] {
        &self.sources
    }

    /// Highest-priority settings file that was used, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.sources.last().map(|(_, p)| p.as_path())
    }

    /// Resource resolver for the merged settings.
    pub fn resolver(&self) -> TieredResolver {
        TieredResolver::from_paths(&self.paths, &self.config.resources)
    }
}

/// Read one YAML tier. Missing files are silent; unreadable or invalid ones warn.
fn read_yaml_layer(path: &Path) -> Option<Value> {
    if !path.exists() {
        debug!(path = %path.display(), "No settings file");
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read settings file");
            return None;
        }
    };

    match serde_yaml::from_str::<Value>(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring invalid settings file");
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::FileSource;
    use tempfile::TempDir;

    #[test]
    fn test_config_paths_discover() {
        let paths = ConfigPaths::discover();
        assert!(paths.project_dir.is_some());
    }

    #[test]
    fn test_resource_dirs() {
        let paths = ConfigPaths::with_dirs(Some(PathBuf::from("p")), None);
        assert_eq!(
            paths.project_resources_dir(),
            Some(PathBuf::from("p").join("resources"))
        );
        assert!(paths.user_resources_dir().is_none());
    }

    #[test]
    fn test_load_defaults_only() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_dirs(
            Some(temp.path().join("project")),
            Some(temp.path().join("user")),
        );

        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config().resources.default_name, "contributions_light");
        assert!(loader.sources().is_empty());
        assert!(loader.config_path().is_none());
    }

    #[test]
    fn test_user_overrides_project() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        let user_dir = temp.path().join("user");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::create_dir_all(&user_dir).unwrap();

        std::fs::write(
            project_dir.join(CONFIG_FILE),
            "resources:\n  default_name: contributions_dark\n  embedded: false\n",
        )
        .unwrap();
        std::fs::write(
            user_dir.join(CONFIG_FILE),
            "resources:\n  embedded: true\n",
        )
        .unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), Some(user_dir.clone()));
        let loader = ConfigLoader::load_with_paths(paths).unwrap();

        assert_eq!(loader.config().resources.default_name, "contributions_dark");
        assert!(loader.config().resources.embedded);
        assert_eq!(loader.sources().len(), 2);
        assert_eq!(loader.config_path(), Some(user_dir.join(CONFIG_FILE).as_path()));
    }

    #[test]
    fn test_invalid_yaml_tier_is_skipped() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join(CONFIG_FILE), "resources: [unclosed").unwrap();

        let paths = ConfigPaths::with_dirs(Some(project_dir), None);
        let loader = ConfigLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.config(), &Config::default());
    }

    #[test]
    fn test_resolver_uses_tier_dirs() {
        let temp = TempDir::new().unwrap();
        let project_resources = temp.path().join("project").join(RESOURCES_DIR);
        std::fs::create_dir_all(&project_resources).unwrap();
        std::fs::write(project_resources.join("local.json"), "{}").unwrap();

        let paths = ConfigPaths::with_dirs(Some(temp.path().join("project")), None);
        let loader = ConfigLoader::load_with_paths(paths).unwrap();

        let resolver = loader.resolver();
        assert_eq!(resolver.source_of("local", "json"), Some(FileSource::Project));
    }

    #[test]
    fn test_load_explicit_records_explicit_tier() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("team.yaml");
        std::fs::write(&file, "resources:\n  default_name: contributions_dark\n").unwrap();

        let paths = ConfigPaths::with_dirs(Some(temp.path().join("project")), None);
        let loader = ConfigLoader::load_explicit(paths, file.clone()).unwrap();

        assert_eq!(loader.config().resources.default_name, "contributions_dark");
        assert_eq!(loader.sources(), &[(ConfigTier::Explicit, file.clone())]);
        assert_eq!(loader.config_path(), Some(file.as_path()));
        assert_eq!(ConfigTier::Explicit.to_string(), "explicit");
    }

    #[test]
    fn test_tier_order() {
        assert!(ConfigTier::Project < ConfigTier::User);
        assert!(ConfigTier::User < ConfigTier::Explicit);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
