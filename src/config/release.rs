//! Release configuration: branches, notes categories and version rules.
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, str::FromStr};
use strum::{Display, EnumString};

use crate::{
    config::pattern::Pattern,
    error::{ButlerError, Result},
};

/// Placeholder replaced with the previous version in release titles.
pub const PREVIOUS_VERSION_VARIABLE: &str = "${previous_version}";
/// Placeholder replaced with the released version in release titles.
pub const RELEASE_VERSION_VARIABLE: &str = "${version}";

/// Release settings for the staging → production flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Branch releases are cut from (e.g. `main`).
    pub base: String,
    /// Branch collecting merged work (e.g. `staging`).
    pub head: String,
    /// Release title template supporting `${previous_version}` and
    /// `${version}`.
    pub title: String,
    /// Release notes categories, in display order.
    pub categories: Vec<ReleaseCategory>,
    pub version: VersionConfig,
}

impl ReleaseConfig {
    /// Renders the release title for the given versions.
    pub fn title_for(&self, previous: &str, next: &str) -> String {
        self.title
            .replace(PREVIOUS_VERSION_VARIABLE, previous)
            .replace(RELEASE_VERSION_VARIABLE, next)
    }
}

/// A release notes bucket and the head branch patterns that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReleaseCategory {
    pub name: String,
    pub rules: Vec<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub rules: VersionRules,
    pub defaults: VersionDefaults,
}

/// Head branch patterns per increment level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct VersionRules {
    pub major: Vec<Pattern>,
    pub minor: Vec<Pattern>,
    pub patch: Vec<Pattern>,
}

impl VersionRules {
    pub fn for_level(&self, level: IncrementLevel) -> &[Pattern] {
        match level {
            IncrementLevel::Major => &self.major,
            IncrementLevel::Minor => &self.minor,
            IncrementLevel::Patch => &self.patch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct VersionDefaults {
    /// Level used when no version rule matches any merged branch.
    pub increment: IncrementLevel,
}

/// Which version component gets bumped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(try_from = "String", into = "String")]
pub enum IncrementLevel {
    Major,
    Minor,
    Patch,
}

impl IncrementLevel {
    /// Levels in the order they are tested: highest first.
    pub const PRIORITY: [IncrementLevel; 3] = [
        IncrementLevel::Major,
        IncrementLevel::Minor,
        IncrementLevel::Patch,
    ];

    /// Parses a level name, failing with
    /// [`ButlerError::InvalidIncrementLevel`].
    pub fn parse(level: &str) -> Result<Self> {
        IncrementLevel::from_str(level)
            .map_err(|_| ButlerError::InvalidIncrementLevel(level.to_string()))
    }
}

impl TryFrom<String> for IncrementLevel {
    type Error = ButlerError;

    fn try_from(value: String) -> Result<Self> {
        IncrementLevel::parse(&value)
    }
}

impl From<IncrementLevel> for String {
    fn from(level: IncrementLevel) -> Self {
        level.to_string()
    }
}

impl JsonSchema for IncrementLevel {
    fn schema_name() -> Cow<'static, str> {
        "IncrementLevel".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "enum": ["major", "minor", "patch"],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_level_parse() {
        assert_eq!(IncrementLevel::parse("major").unwrap(), IncrementLevel::Major);
        assert_eq!(IncrementLevel::parse("minor").unwrap(), IncrementLevel::Minor);
        assert_eq!(IncrementLevel::parse("patch").unwrap(), IncrementLevel::Patch);
    }

    #[test]
    fn test_increment_level_parse_rejects_unknown() {
        let err = IncrementLevel::parse("huge").unwrap_err();
        assert!(matches!(err, ButlerError::InvalidIncrementLevel(level) if level == "huge"));
    }

    #[test]
    fn test_increment_level_deserialize_rejects_unknown() {
        let result: std::result::Result<VersionDefaults, _> =
            serde_yaml::from_str("increment: prerelease\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid increment level"));
    }

    #[test]
    fn test_increment_level_serializes_lowercase() {
        let defaults = VersionDefaults {
            increment: IncrementLevel::Minor,
        };
        let json = serde_json::to_string(&defaults).unwrap();
        assert_eq!(json, r#"{"increment":"minor"}"#);
    }

    #[test]
    fn test_title_for_replaces_placeholders() {
        let config = ReleaseConfig {
            base: "main".into(),
            head: "staging".into(),
            title: "${previous_version} → ${version}".into(),
            categories: vec![],
            version: VersionConfig {
                rules: VersionRules::default(),
                defaults: VersionDefaults {
                    increment: IncrementLevel::Patch,
                },
            },
        };

        assert_eq!(config.title_for("v1.0.0", "v1.1.0"), "v1.0.0 → v1.1.0");
    }
}
