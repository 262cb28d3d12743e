//! Typed access to bundled JSON resources.
//!
//! [`JsonBundle::load`] resolves, reads and decodes the resource on every call
//! and collapses every failure to `None`. Schema mismatches are logged at
//! `warn`; a missing or unreadable resource is only logged at `debug`.
//! [`JsonBundle::try_load`] runs the same pipeline but returns the typed
//! [`BundleError`].
//!
//! [`CachedBundle`] keeps the first successful load until invalidated.

use crate::config::DEFAULT_EXTENSION;
use crate::error::{BundleError, BundleResult};
use crate::resources::ResourceResolver;
use arc_swap::ArcSwapOption;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// A named JSON resource decoded into `T` through resolver `R`.
#[derive(Debug, Clone)]
pub struct JsonBundle<T, R> {
    name: String,
    extension: String,
    resolver: R,
    _marker: PhantomData<fn() -> T>,
}

impl<T, R> JsonBundle<T, R>
where
    T: DeserializeOwned,
    R: ResourceResolver,
{
    /// Bundle for `name.json`.
    pub fn new(name: impl Into<String>, resolver: R) -> Self {
        Self {
            name: name.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            resolver,
            _marker: PhantomData,
        }
    }

    /// Use a different extension (no leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve, read and decode, reporting which step failed.
    pub fn try_load(&self) -> BundleResult<T> {
        let handle = self
            .resolver
            .resolve(&self.name, &self.extension)
            .ok_or_else(|| BundleError::not_found(&self.name, &self.extension))?;

        let bytes = handle.read().map_err(|source| BundleError::ReadFailure {
            name: self.name.clone(),
            location: handle.describe(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| BundleError::SchemaMismatch {
            name: self.name.clone(),
            source,
        })
    }

    /// Resolve, read and decode; `None` on any failure.
    pub fn load(&self) -> Option<T> {
        match self.try_load() {
            Ok(value) => Some(value),
            Err(err @ BundleError::SchemaMismatch { .. }) => {
                warn!(
                    resource = %self.name,
                    code = err.code().as_str(),
                    error = %err,
                    "Failed to decode bundled resource"
                );
                None
            }
            Err(err) => {
                debug!(
                    resource = %self.name,
                    code = err.code().as_str(),
                    error = %err,
                    "Bundled resource unavailable"
                );
                None
            }
        }
    }
}

/// A [`JsonBundle`] that keeps its first successful load.
///
/// Failures are never cached: the next [`get`](Self::get) tries again.
pub struct CachedBundle<T, R> {
    bundle: JsonBundle<T, R>,
    cached: ArcSwapOption<T>,
}

impl<T, R> CachedBundle<T, R>
where
    T: DeserializeOwned,
    R: ResourceResolver,
{
    pub fn new(bundle: JsonBundle<T, R>) -> Self {
        Self {
            bundle,
            cached: ArcSwapOption::empty(),
        }
    }

    /// Cached value, loading it on first use.
    pub fn get(&self) -> Option<Arc<T>> {
        if let Some(value) = self.cached.load_full() {
            return Some(value);
        }

        let value = Arc::new(self.bundle.load()?);
        self.cached.store(Some(Arc::clone(&value)));
        debug!(resource = %self.bundle.name(), "Cached bundled resource");
        Some(value)
    }

    /// Drop the cached value; the next `get` reads the resource again.
    pub fn invalidate(&self) {
        self.cached.store(None);
    }

    /// Invalidate and load again. On failure nothing stays cached.
    pub fn reload(&self) -> Option<Arc<T>> {
        self.invalidate();
        self.get()
    }

    pub fn is_cached(&self) -> bool {
        self.cached.load().is_some()
    }
}

impl<T, R> From<JsonBundle<T, R>> for CachedBundle<T, R>
where
    T: DeserializeOwned,
    R: ResourceResolver,
{
    fn from(bundle: JsonBundle<T, R>) -> Self {
        Self::new(bundle)
    }
}
