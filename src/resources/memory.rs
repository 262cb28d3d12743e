//! In-memory resolver.

use super::{FileSource, ResourceHandle, ResourceResolver, file_name};
use std::collections::BTreeMap;
use std::io;

#[derive(Debug, Clone)]
enum Entry {
    Bytes(Vec<u8>),
    Unreadable(io::ErrorKind),
}

/// Resolver over a fixed set of in-memory resources, keyed by `name.extension`.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    entries: BTreeMap<String, Entry>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under `name.extension`.
    pub fn with_resource(
        mut self,
        name: &str,
        extension: &str,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(name, extension, content);
        self
    }

    /// Register an entry that resolves but cannot be read.
    pub fn with_unreadable(mut self, name: &str, extension: &str, kind: io::ErrorKind) -> Self {
        self.entries
            .insert(file_name(name, extension), Entry::Unreadable(kind));
        self
    }

    pub fn insert(&mut self, name: &str, extension: &str, content: impl Into<Vec<u8>>) {
        self.entries
            .insert(file_name(name, extension), Entry::Bytes(content.into()));
    }

    pub fn remove(&mut self, name: &str, extension: &str) -> bool {
        self.entries.remove(&file_name(name, extension)).is_some()
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, name: &str, extension: &str) -> Option<ResourceHandle> {
        match self.entries.get(&file_name(name, extension))? {
            Entry::Bytes(bytes) => Some(ResourceHandle::from_bytes(name, bytes.clone())),
            Entry::Unreadable(kind) => Some(ResourceHandle::unreadable(name, *kind)),
        }
    }

    fn list(&self, extension: &str) -> Vec<(String, FileSource)> {
        let suffix = format!(".{}", extension);
        // Keys order by `name.extension`; `-` sorts before `.`, so re-sort by name.
        let mut result: Vec<_> = self
            .entries
            .keys()
            .filter_map(|key| key.strip_suffix(&suffix))
            .map(|name| (name.to_string(), FileSource::Memory))
            .collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }
}
