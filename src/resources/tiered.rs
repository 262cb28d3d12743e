//! Resource resolution across directory tiers.
//!
//! Lookup is first-found-wins from the highest tier to the lowest, with the
//! embedded registry as the final fallback.

use super::{FileSource, ResourceHandle, ResourceResolver, embedded, file_name, is_valid_name};
use crate::config::{ConfigPaths, ResourcesConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory-tiered resolver with an embedded fallback.
#[derive(Debug, Clone)]
pub struct TieredResolver {
    /// Directories in priority order (highest first).
    tiers: Vec<(PathBuf, FileSource)>,
    /// Whether the embedded registry is consulted last.
    embedded: bool,
}

impl Default for TieredResolver {
    fn default() -> Self {
        Self::embedded_only()
    }
}

impl TieredResolver {
    /// Resolver with no directories, only embedded resources.
    pub fn embedded_only() -> Self {
        Self {
            tiers: Vec::new(),
            embedded: true,
        }
    }

    /// Build the standard tiers: override dir, user resources, project resources.
    pub fn from_paths(paths: &ConfigPaths, resources: &ResourcesConfig) -> Self {
        let mut resolver = Self {
            tiers: Vec::new(),
            embedded: resources.embedded,
        };

        if let Some(ref dir) = resources.dir {
            resolver = resolver.with_dir(dir.clone(), FileSource::Override);
        }
        if let Some(dir) = paths.user_resources_dir() {
            resolver = resolver.with_dir(dir, FileSource::User);
        }
        if let Some(dir) = paths.project_resources_dir() {
            resolver = resolver.with_dir(dir, FileSource::Project);
        }

        resolver
    }

    /// Append a directory below the existing tiers.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>, source: FileSource) -> Self {
        self.tiers.push((dir.into(), source));
        self
    }

    /// Enable or disable the embedded fallback.
    pub fn with_embedded(mut self, enabled: bool) -> Self {
        self.embedded = enabled;
        self
    }

    /// Directory tiers in priority order.
    pub fn tiers(&self) -> impl Iterator<Item = (&Path, FileSource)> {
        self.tiers.iter().map(|(dir, source)| (dir.as_path(), *source))
    }

    pub fn embedded_enabled(&self) -> bool {
        self.embedded
    }

    /// Tier that would serve `name`, without reading it.
    pub fn source_of(&self, name: &str, extension: &str) -> Option<FileSource> {
        self.resolve(name, extension).map(|handle| handle.source())
    }
}

impl ResourceResolver for TieredResolver {
    fn resolve(&self, name: &str, extension: &str) -> Option<ResourceHandle> {
        if !is_valid_name(name) {
            debug!(name, "Rejecting resource name with path components");
            return None;
        }

        let file = file_name(name, extension);
        for (dir, source) in &self.tiers {
            // exists(), not is_file(): an unreadable entry is a read failure,
            // it does not fall through to a lower tier.
            let path = dir.join(&file);
            if path.exists() {
                debug!(name, source = %source, path = %path.display(), "Resolved resource");
                return Some(ResourceHandle::from_path(name, path, *source));
            }
        }

        if self.embedded
            && let Some(content) = embedded::get(name, extension)
        {
            debug!(name, "Resolved embedded resource");
            return Some(ResourceHandle::from_embedded(name, content));
        }

        debug!(name, extension, "Resource not found in any tier");
        None
    }

    fn list(&self, extension: &str) -> Vec<(String, FileSource)> {
        let mut found: HashMap<String, FileSource> = HashMap::new();
        let suffix = format!(".{}", extension);

        // Scan from lowest to highest tier (higher tiers override)

        if self.embedded {
            for name in embedded::names(extension) {
                found.insert(name.to_string(), FileSource::Embedded);
            }
        }

        for (dir, source) in self.tiers.iter().rev() {
            if dir.is_dir()
                && let Ok(entries) = std::fs::read_dir(dir)
            {
                for entry in entries.flatten() {
                    let file_name = entry.file_name();
                    if let Some(name) = file_name
                        .to_str()
                        .and_then(|n| n.strip_suffix(&suffix))
                        && is_valid_name(name)
                    {
                        found.insert(name.to_string(), *source);
                    }
                }
            }
        }

        let mut result: Vec<_> = found.into_iter().collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }
}
