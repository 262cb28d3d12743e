//! Bundled resource lookup.
//!
//! A resource is a read-only file identified by a logical name plus an
//! extension (`contributions_light` + `json`). Resolvers turn the name into a
//! [`ResourceHandle`]; reading the handle is a separate step so that a missing
//! resource and an unreadable one stay distinguishable.
//!
//! Resolvers:
//! - [`TieredResolver`] - override dir, user dir, project dir, then embedded
//! - [`MemoryResolver`] - in-memory map, for injecting fakes
//! - [`embedded`] - resources compiled into the binary from `config/resources/`

pub mod embedded;
mod memory;
mod tiered;

pub use memory::MemoryResolver;
pub use tiered::TieredResolver;

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

/// Where a resolved resource came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileSource {
    /// Explicit resource directory (CLI flag or environment)
    Override,
    /// User resource directory (`~/.contrib-bundle/resources`)
    User,
    /// Project resource directory (`./contrib-bundle/resources`)
    Project,
    /// Compiled into the binary
    Embedded,
    /// Registered in a [`MemoryResolver`]
    Memory,
}

impl std::fmt::Display for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSource::Override => write!(f, "override"),
            FileSource::User => write!(f, "user"),
            FileSource::Project => write!(f, "project"),
            FileSource::Embedded => write!(f, "embedded"),
            FileSource::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
enum Location {
    Path(PathBuf),
    Static(&'static [u8]),
    Owned(Vec<u8>),
    Unreadable(io::ErrorKind),
}

/// A resolved, not yet read, resource.
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    name: String,
    location: Location,
    source: FileSource,
}

impl ResourceHandle {
    /// A resource backed by a file on disk.
    pub fn from_path(name: impl Into<String>, path: PathBuf, source: FileSource) -> Self {
        Self {
            name: name.into(),
            location: Location::Path(path),
            source,
        }
    }

    /// A resource compiled into the binary.
    pub fn from_embedded(name: impl Into<String>, content: &'static str) -> Self {
        Self {
            name: name.into(),
            location: Location::Static(content.as_bytes()),
            source: FileSource::Embedded,
        }
    }

    /// A resource held in memory.
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            location: Location::Owned(content),
            source: FileSource::Memory,
        }
    }

    /// A resource that resolves but fails every read with `kind`.
    pub fn unreadable(name: impl Into<String>, kind: io::ErrorKind) -> Self {
        Self {
            name: name.into(),
            location: Location::Unreadable(kind),
            source: FileSource::Memory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> FileSource {
        self.source
    }

    /// Filesystem path, for disk-backed resources.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Human-readable location used in diagnostics.
    pub fn describe(&self) -> String {
        match &self.location {
            Location::Path(path) => path.display().to_string(),
            _ => format!("{}:{}", self.source, self.name),
        }
    }

    /// Read the full contents.
    pub fn read(&self) -> io::Result<Cow<'_, [u8]>> {
        match &self.location {
            Location::Path(path) => std::fs::read(path).map(Cow::Owned),
            Location::Static(bytes) => Ok(Cow::Borrowed(*bytes)),
            Location::Owned(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            Location::Unreadable(kind) => Err(io::Error::new(
                *kind,
                format!("resource {} is not readable", self.name),
            )),
        }
    }
}

/// Maps a logical resource name to a readable handle.
pub trait ResourceResolver {
    /// Resolve `name` with `extension` (no leading dot). `None` when no tier has it.
    fn resolve(&self, name: &str, extension: &str) -> Option<ResourceHandle>;

    /// Resource names available with `extension`, sorted, with their source.
    fn list(&self, extension: &str) -> Vec<(String, FileSource)>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn resolve(&self, name: &str, extension: &str) -> Option<ResourceHandle> {
        (**self).resolve(name, extension)
    }

    fn list(&self, extension: &str) -> Vec<(String, FileSource)> {
        (**self).list(extension)
    }
}

/// Whether `name` is a plain logical name (no separators, no traversal).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// `name.extension`
pub(crate) fn file_name(name: &str, extension: &str) -> String {
    format!("{}.{}", name, extension)
}
