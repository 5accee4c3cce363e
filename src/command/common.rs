//! Common functionality shared between commands
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::ReleaseConfig,
    error::Result,
    forge::manager::ForgeManager,
    release::{NoteFormat, generate},
};

/// Result printed on stdout after every command as a single JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl CommandOutput {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Value::Null,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Checklist notes for the staging pull request: every pull request merged
/// into the release head that the release base does not contain yet.
pub async fn staging_notes(
    forge_manager: &ForgeManager,
    config: &ReleaseConfig,
) -> Result<String> {
    let prs = forge_manager.release_prs(config, None).await?;
    Ok(generate(&prs, &config.categories, NoteFormat::Checklist))
}
