//! Attaches labels to a pull request.
use log::*;

use crate::{
    command::common::CommandOutput,
    config::LabelConfig,
    error::{ButlerError, Result},
    forge::{manager::ForgeManager, request::PrLabelsRequest},
};

/// Add `labels` to the pull request, plus the lgtm label when `lgtm` is set
/// and one is configured.
pub async fn execute(
    forge_manager: &ForgeManager,
    config: &LabelConfig,
    pr_number: Option<u64>,
    labels: Vec<String>,
    lgtm: bool,
) -> Result<CommandOutput> {
    let pr_number =
        pr_number.ok_or_else(|| ButlerError::missing_env("PR_NUMBER"))?;

    let mut labels: Vec<String> = labels
        .into_iter()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect();

    if labels.is_empty() && !lgtm {
        return Err(ButlerError::missing_env("LABELS"));
    }

    if lgtm {
        match config.lgtm_label() {
            Some(label) => labels.push(label),
            None => warn!("lgtm requested but no lgtm label is configured"),
        }
    }

    if labels.is_empty() {
        return Ok(CommandOutput::success(
            "⚠️ No labels to attach",
            serde_json::Value::Null,
        ));
    }

    info!("attaching {:?} to #{pr_number}", labels);

    forge_manager
        .add_labels(PrLabelsRequest { pr_number, labels })
        .await?;

    Ok(CommandOutput::success(
        "🎉 Labels attached",
        serde_json::Value::Null,
    ))
}
