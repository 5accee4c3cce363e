//! Loads a configuration file and merges it over the built-in defaults.
//!
//! Merging is section-wise: a key present in the user's file replaces the
//! whole default value for that key, absent keys keep the default.
use log::*;
use merge::Merge;
use serde::Deserialize;
use std::{env, fs, path::Path};

use crate::{
    config::{
        Config, LabelCategory, LabelConfig, LabelDefinition, ReleaseCategory,
        ReleaseConfig, VersionConfig, VersionDefaults, VersionRules,
    },
    error::{ButlerError, Result},
};

/// Load configuration from `path`, or the built-in defaults when no path is
/// given. Relative paths are resolved against the current directory.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        debug!("no configuration path given: using defaults");
        return Ok(Config::default());
    };

    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    if !path.exists() {
        return Err(ButlerError::MissingConfigFile(
            path.display().to_string(),
        ));
    }

    info!("loading configuration from {}", path.display());

    let content = fs::read_to_string(&path)?;
    from_yaml(&content)
}

/// Parse YAML configuration content and merge it over the defaults.
pub fn from_yaml(content: &str) -> Result<Config> {
    // an empty document deserializes to unit, treat it as "no overrides"
    let mut partial: PartialConfig = if content.trim().is_empty() {
        PartialConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };

    partial.merge(PartialConfig::from(Config::default()));

    Config::try_from(partial)
}

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(default, deny_unknown_fields)]
struct PartialConfig {
    label: PartialLabelConfig,
    release: PartialReleaseConfig,
}

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(default, deny_unknown_fields)]
struct PartialLabelConfig {
    #[merge(strategy = merge::option::overwrite_none)]
    lgtm: Option<LabelDefinition>,
    #[merge(strategy = merge::option::overwrite_none)]
    categories: Option<Vec<LabelCategory>>,
}

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(default, deny_unknown_fields)]
struct PartialReleaseConfig {
    #[merge(strategy = merge::option::overwrite_none)]
    base: Option<String>,
    #[merge(strategy = merge::option::overwrite_none)]
    head: Option<String>,
    #[merge(strategy = merge::option::overwrite_none)]
    title: Option<String>,
    #[merge(strategy = merge::option::overwrite_none)]
    categories: Option<Vec<ReleaseCategory>>,
    version: PartialVersionConfig,
}

#[derive(Debug, Default, Deserialize, Merge)]
#[serde(default, deny_unknown_fields)]
struct PartialVersionConfig {
    #[merge(strategy = merge::option::overwrite_none)]
    rules: Option<VersionRules>,
    #[merge(strategy = merge::option::overwrite_none)]
    defaults: Option<VersionDefaults>,
}

impl From<Config> for PartialConfig {
    fn from(config: Config) -> Self {
        Self {
            label: PartialLabelConfig {
                lgtm: config.label.lgtm,
                categories: Some(config.label.categories),
            },
            release: PartialReleaseConfig {
                base: Some(config.release.base),
                head: Some(config.release.head),
                title: Some(config.release.title),
                categories: Some(config.release.categories),
                version: PartialVersionConfig {
                    rules: Some(config.release.version.rules),
                    defaults: Some(config.release.version.defaults),
                },
            },
        }
    }
}

impl TryFrom<PartialConfig> for Config {
    type Error = ButlerError;

    fn try_from(partial: PartialConfig) -> Result<Self> {
        Ok(Config {
            label: LabelConfig {
                lgtm: partial.label.lgtm,
                categories: required(
                    partial.label.categories,
                    "label.categories",
                )?,
            },
            release: ReleaseConfig {
                base: required(partial.release.base, "release.base")?,
                head: required(partial.release.head, "release.head")?,
                title: required(partial.release.title, "release.title")?,
                categories: required(
                    partial.release.categories,
                    "release.categories",
                )?,
                version: VersionConfig {
                    rules: required(
                        partial.release.version.rules,
                        "release.version.rules",
                    )?,
                    defaults: required(
                        partial.release.version.defaults,
                        "release.version.defaults",
                    )?,
                },
            },
        })
    }
}

fn required<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| ButlerError::invalid_config(format!("missing {key}")))
}
