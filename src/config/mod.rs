//! Tool settings.
//!
//! Settings come from four tiers, merged field-by-field:
//! 1. **Defaults** - compiled in
//! 2. **Project** - `$CWD/contrib-bundle/config.yaml`
//! 3. **User** - `~/.contrib-bundle/config.yaml`
//! 4. **Environment** - variables below
//!
//! Resources are looked up in the `resources/` subdirectory of the same tiers
//! (see [`crate::resources::TieredResolver`]).
//!
//! ## Environment Variables
//! - `CONTRIB_BUNDLE_CONFIG_PATH` - Explicit settings file (overrides all tiers)
//! - `CONTRIB_BUNDLE_RESOURCE_DIR` - Resource directory searched first
//! - `CONTRIB_BUNDLE_EMBEDDED` - `true`/`false`, fall back to compiled-in resources
//! - `CONTRIB_BUNDLE_FORMAT` - `markdown` or `json`
//! - `CONTRIB_BUNDLE_USER_DIR` - User tier dir (default: `~/.contrib-bundle`)
//! - `CONTRIB_BUNDLE_PROJECT_DIR` - Project tier dir (default: `./contrib-bundle`)

mod loader;
mod merge;
mod types;

pub use loader::{CONFIG_FILE, ConfigLoader, ConfigPaths, ConfigTier, RESOURCES_DIR};
pub use merge::{deep_merge, deep_merge_all};
pub use types::*;
