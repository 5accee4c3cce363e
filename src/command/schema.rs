//! Prints the JSON schema of the configuration file.
use schemars::schema_for;

use crate::{command::common::CommandOutput, config::Config, error::Result};

/// JSON schema describing `release-butler.yml`.
pub fn config_schema() -> Result<serde_json::Value> {
    Ok(serde_json::to_value(schema_for!(Config))?)
}

pub fn execute() -> Result<CommandOutput> {
    Ok(CommandOutput::success(
        "🎉 Configuration schema generated",
        config_schema()?,
    ))
}
