//! Exports label categories as an actions/labeler configuration file.
use log::*;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tokio::fs;

use crate::{
    command::common::CommandOutput,
    config::LabelConfig,
    error::Result,
};

/// Default output path, relative to the repository root.
pub const DEFAULT_LABELER_FILE: &str = ".github/pr-labels.yml";

/// Render the labeler YAML: one key per category, named `"<icon> <name>"`,
/// holding the category rules unchanged.
pub fn to_yaml(config: &LabelConfig) -> Result<String> {
    let mut mapping = Mapping::new();

    for category in config.categories.iter() {
        mapping.insert(
            Value::String(category.label_name()),
            serde_yaml::to_value(&category.rules)?,
        );
    }

    Ok(serde_yaml::to_string(&mapping)?)
}

/// Write the labeler configuration to `out_file`, creating parent
/// directories as needed.
pub async fn execute(
    config: &LabelConfig,
    out_file: &Path,
) -> Result<CommandOutput> {
    let content = to_yaml(config)?;

    if let Some(parent) = out_file.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).await?;
    }

    info!("writing labeler configuration to: {}", out_file.display());
    fs::write(out_file, &content).await?;

    Ok(CommandOutput::success(
        format!("🎉 Generated {}", out_file.display()),
        serde_json::Value::Null,
    ))
}
