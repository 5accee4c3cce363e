//! Configuration for label categories and release automation.
//!
//! Configuration is YAML. Any section omitted from a user's file falls back to
//! the built-in defaults (see [`loader`]). Regex patterns are compiled while
//! deserializing, so a loaded [`Config`] only carries valid patterns.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod label;
pub mod loader;
pub mod pattern;
pub mod release;

pub use label::{
    BaseRule, FileMatchStrategy, LabelCategory, LabelConfig, LabelDefinition,
    Rule, RootRule,
};
pub use pattern::Pattern;
pub use release::{
    IncrementLevel, ReleaseCategory, ReleaseConfig, VersionConfig,
    VersionDefaults, VersionRules,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "release-butler.yml";

const DEFAULT_CONFIG: &str = include_str!("config/default.yml");

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Label synchronisation and attachment settings.
    pub label: LabelConfig,
    /// Release pull request and versioning settings.
    pub release: ReleaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG)
            .expect("built-in default configuration must be valid")
    }
}
