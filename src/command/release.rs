//! Publishes a versioned release once the staging pull request (or a
//! hotfix) is merged.
use log::*;
use serde_json::json;

use crate::{
    command::common::CommandOutput,
    config::ReleaseConfig,
    error::{ButlerError, Result},
    forge::{manager::ForgeManager, request::CreateReleaseRequest},
    release::{NoteFormat, VersionIncrementer, format_version, generate},
};

/// Shown in place of the previous version for the first release.
pub const INITIAL_RELEASE_MARKER: &str = "🎉";

/// Release body used when no pull request is part of the release.
pub fn default_note(pr_link: &str) -> String {
    format!("## 🚀 Release Butler\n\n{pr_link}")
}

/// Create a release for the merged pull request `pr_number`: tag the next
/// version on the release base, titled from the template, with list format
/// notes of the released pull requests.
pub async fn execute(
    forge_manager: &ForgeManager,
    config: &ReleaseConfig,
    pr_number: Option<u64>,
) -> Result<CommandOutput> {
    let pr_number =
        pr_number.ok_or_else(|| ButlerError::missing_env("PR_NUMBER"))?;

    let prs = forge_manager.release_prs(config, Some(pr_number)).await?;
    let current = forge_manager.latest_release_tag().await?;

    let increment = VersionIncrementer::new(&config.version)
        .increment(current.as_deref(), &prs)?;

    let previous = increment
        .current
        .as_ref()
        .map(format_version)
        .unwrap_or_else(|| INITIAL_RELEASE_MARKER.to_string());
    let tag = format_version(&increment.next);
    let title = config.title_for(&previous, &tag);

    let body = if prs.is_empty() {
        default_note(&forge_manager.remote_config().pr_link(pr_number))
    } else {
        generate(&prs, &config.categories, NoteFormat::List)
    };

    info!("creating release {tag}: {title}");

    forge_manager
        .create_release(CreateReleaseRequest {
            tag: tag.clone(),
            title: title.clone(),
            body,
            target: config.base.clone(),
        })
        .await?;

    Ok(CommandOutput::success(
        "🎉 Release created",
        json!({ "version": tag, "title": title }),
    ))
}
