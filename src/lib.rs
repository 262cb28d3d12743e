//! Contrib Bundle Library
//!
//! Typed loading of JSON resources bundled with an application, plus the
//! contribution-calendar records and formatting used by the CLI.

pub mod bundle;
pub mod cli;
pub mod config;
pub mod contributions;
pub mod error;
pub mod format;
pub mod logging;
pub mod resources;

pub use bundle::{CachedBundle, JsonBundle};
pub use contributions::{ContributionInfo, ContributionRecord};
pub use error::{BundleError, ErrorCode};
pub use resources::{FileSource, MemoryResolver, ResourceHandle, ResourceResolver, TieredResolver};
