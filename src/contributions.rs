//! Contribution calendar records.
//!
//! Field names on disk follow the bundled JSON (`count`, `contributions`,
//! `date`, `contribution`, `hexColor`). Nothing beyond the shape is
//! validated: `count` need not match the number of records, and dates and
//! colors are kept as the strings they were given.

use crate::bundle::JsonBundle;
use crate::config::DEFAULT_RESOURCE_NAME;
use crate::resources::ResourceResolver;
use serde::{Deserialize, Serialize};

/// One calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub date: String,
    #[serde(rename = "contribution")]
    pub contribution_count: i64,
    #[serde(rename = "hexColor")]
    pub color_hex: String,
}

impl ContributionRecord {
    pub fn new(date: impl Into<String>, contribution_count: i64, color_hex: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            contribution_count,
            color_hex: color_hex.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.contribution_count > 0
    }
}

/// A contribution calendar, records in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionInfo {
    #[serde(rename = "count")]
    pub total_count: i64,
    #[serde(rename = "contributions")]
    pub records: Vec<ContributionRecord>,
}

impl ContributionInfo {
    /// Bundle for the named contribution resource.
    pub fn bundle<R: ResourceResolver>(name: impl Into<String>, resolver: R) -> JsonBundle<Self, R> {
        JsonBundle::new(name, resolver)
    }

    /// Load the default `contributions_light` resource. Re-reads on every call.
    pub fn load_all<R: ResourceResolver>(resolver: R) -> Option<Self> {
        Self::bundle(DEFAULT_RESOURCE_NAME, resolver).load()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
