//! Opens the staging pull request from the release head into the release
//! base.
use log::*;
use serde_json::json;

use crate::{
    command::common::{CommandOutput, staging_notes},
    config::Config,
    error::Result,
    forge::{
        manager::ForgeManager,
        request::{CreatePrRequest, GetPrRequest, PrLabelsRequest},
    },
    labeler::matching_labels,
};

/// Staging pull request title: `<base> ← <head>`.
pub fn staging_title(base: &str, head: &str) -> String {
    format!("{base} ← {head}")
}

/// Create the staging pull request unless one is already open or the head
/// has nothing new, then label it with every matching category.
pub async fn execute(
    forge_manager: &ForgeManager,
    config: &Config,
) -> Result<CommandOutput> {
    let base = &config.release.base;
    let head = &config.release.head;

    let existing = forge_manager
        .find_open_pr(GetPrRequest {
            base_branch: base.clone(),
            head_branch: head.clone(),
        })
        .await?;

    let has_diff = forge_manager.has_diff(base, head).await?;

    if let Some(pr) = existing.as_ref() {
        info!("pull request #{} already open for {base} ← {head}", pr.number);
    }

    if existing.is_some() || !has_diff {
        if !has_diff {
            info!("{head} has no changes for {base}");
        }
        return Ok(CommandOutput::success(
            "⚠️ Skipped pull request creation",
            json!({ "number": null }),
        ));
    }

    let body = staging_notes(forge_manager, &config.release).await?;

    let pr = forge_manager
        .create_pr(CreatePrRequest {
            head_branch: head.clone(),
            base_branch: base.clone(),
            title: staging_title(base, head),
            body,
        })
        .await?;

    info!("created pull request #{}", pr.number);

    let labels = matching_labels(&config.label.categories, base, head);

    if !labels.is_empty() {
        forge_manager
            .add_labels(PrLabelsRequest {
                pr_number: pr.number,
                labels,
            })
            .await?;
    }

    Ok(CommandOutput::success(
        "🎉 Pull request created",
        json!({ "number": pr.number }),
    ))
}
