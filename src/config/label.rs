//! Label categories and the branch/file rules that select them.
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::config::pattern::Pattern;

/// Formats the name a label is created with on the forge: `"<icon> <name>"`.
pub fn format_label(icon: &str, name: &str) -> String {
    format!("{icon} {name}")
}

/// Label configuration (applies to all pull requests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    /// Rule driven label categories.
    pub categories: Vec<LabelCategory>,
    /// Label attached to approved pull requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lgtm: Option<LabelDefinition>,
}

impl LabelConfig {
    /// Every label to create on the forge, named `"<icon> <name>"`: the
    /// categories in order followed by the lgtm label.
    pub fn definitions(&self) -> Vec<LabelDefinition> {
        let mut definitions: Vec<LabelDefinition> = self
            .categories
            .iter()
            .map(LabelCategory::definition)
            .collect();

        if let Some(lgtm) = self.lgtm.as_ref() {
            definitions.push(LabelDefinition {
                name: lgtm.label_name(),
                ..lgtm.clone()
            });
        }

        definitions
    }

    /// Formatted lgtm label name, if one is configured.
    pub fn lgtm_label(&self) -> Option<String> {
        self.lgtm.as_ref().map(LabelDefinition::label_name)
    }
}

/// A label without rules, e.g. the approval label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LabelDefinition {
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Hex color without the leading `#`.
    pub color: String,
}

impl LabelDefinition {
    pub fn label_name(&self) -> String {
        format_label(&self.icon, &self.name)
    }
}

/// A named label together with the rules deciding when it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LabelCategory {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    /// Rules are OR-ed: the category applies when any of them matches.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl LabelCategory {
    pub fn label_name(&self) -> String {
        format_label(&self.icon, &self.name)
    }

    pub fn definition(&self) -> LabelDefinition {
        LabelDefinition {
            name: self.label_name(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
        }
    }
}

/// Glob lists keyed by how patterns combine with the changed files.
///
/// Only the data shape lives here: evaluation is done by the third-party
/// labeler the configuration is exported to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileMatchStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_glob_to_any_file: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_glob_to_all_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_globs_to_any_file: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_globs_to_all_files: Option<Vec<String>>,
}

/// Leaf rule matching base branch, head branch and changed files.
///
/// `None` means the key is absent, which matters for `all` rules where both
/// branch keys are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BaseRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<Vec<Pattern>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_branch: Option<Vec<Pattern>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_files: Option<Vec<FileMatchStrategy>>,
}

/// Combinator rule wrapping base rules under `any` (OR) or `all` (AND).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RootRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<BaseRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<BaseRule>>,
}

/// A single entry of a category's rule list.
///
/// An entry carrying an `any` or `all` key is a [`RootRule`]; anything else
/// is a [`BaseRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRule", into = "RawRule")]
pub enum Rule {
    Base(BaseRule),
    Root(RootRule),
}

/// Flat on-disk shape of a [`Rule`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    any: Option<Vec<BaseRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    all: Option<Vec<BaseRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_branch: Option<Vec<Pattern>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    head_branch: Option<Vec<Pattern>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    changed_files: Option<Vec<FileMatchStrategy>>,
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        if raw.any.is_some() || raw.all.is_some() {
            Rule::Root(RootRule {
                any: raw.any,
                all: raw.all,
            })
        } else {
            Rule::Base(BaseRule {
                base_branch: raw.base_branch,
                head_branch: raw.head_branch,
                changed_files: raw.changed_files,
            })
        }
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Root(root) => RawRule {
                any: root.any,
                all: root.all,
                ..Default::default()
            },
            Rule::Base(base) => RawRule {
                base_branch: base.base_branch,
                head_branch: base.head_branch,
                changed_files: base.changed_files,
                ..Default::default()
            },
        }
    }
}

impl JsonSchema for Rule {
    fn schema_name() -> Cow<'static, str> {
        "Rule".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        RawRule::json_schema(generator)
    }
}
