//! Inspection configuration.
//!
//! Preferences come from an optional YAML file, then command-line flags
//! override whatever the file sets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ogc_tiles::SourceInfo;

/// Negotiation preferences for one tileset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectConfig {
    /// Preferred tile media type
    pub media_type: Option<String>,

    /// Acceptable media types, most preferred first
    pub supported_media_types: Vec<String>,

    /// Collections to request from a multi-collection vector tileset
    pub collections: Vec<String>,

    /// CRS code overriding the tile matrix set CRS
    pub projection: Option<String>,

    /// Axis order override, e.g. `[Lat, Lon]`
    pub ordered_axes: Vec<String>,

    /// Extra URL template variables
    pub context: HashMap<String, String>,

    /// HTTP request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl InspectConfig {
    /// Combine with `overrides`; any value set there wins.
    ///
    /// Context variables are merged key by key.
    pub fn merge(mut self, overrides: InspectConfig) -> InspectConfig {
        if overrides.media_type.is_some() {
            self.media_type = overrides.media_type;
        }
        if !overrides.supported_media_types.is_empty() {
            self.supported_media_types = overrides.supported_media_types;
        }
        if !overrides.collections.is_empty() {
            self.collections = overrides.collections;
        }
        if overrides.projection.is_some() {
            self.projection = overrides.projection;
        }
        if !overrides.ordered_axes.is_empty() {
            self.ordered_axes = overrides.ordered_axes;
        }
        if overrides.timeout_secs.is_some() {
            self.timeout_secs = overrides.timeout_secs;
        }
        self.context.extend(overrides.context);
        self
    }

    /// Build the negotiation input for the tileset at `url`.
    pub fn source_info(&self, url: &str) -> SourceInfo {
        let non_empty = |v: &Vec<String>| (!v.is_empty()).then(|| v.clone());

        SourceInfo {
            url: url.to_string(),
            projection: self.projection.clone(),
            media_type: self.media_type.clone(),
            supported_media_types: non_empty(&self.supported_media_types),
            collections: non_empty(&self.collections),
            ordered_axes: non_empty(&self.ordered_axes),
            context: self.context.clone(),
        }
    }
}

/// Load an inspection config from a YAML file.
pub fn load_inspect_config<P: AsRef<Path>>(path: P) -> Result<InspectConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read inspect config from {:?}", path.as_ref()))?;

    let config: InspectConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse inspect config from {:?}", path.as_ref()))?;

    Ok(config)
}
