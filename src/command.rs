//! Command execution for release-butler.
//!
//! Each module implements one subcommand as an async `execute` returning a
//! [`CommandOutput`](common::CommandOutput) that the binary prints as a
//! single JSON line. Commands talking to GitHub receive a
//! [`ForgeManager`], so `--dry-run` is honored everywhere.
use log::*;
use std::time::Duration;

use crate::{
    cli::{Args, Command},
    config::loader,
    error::Result,
    forge::{github::Github, manager::ForgeManager},
};

/// Shared output type and helpers.
pub mod common;

/// Attach labels to a pull request.
pub mod label_attach;

/// Synchronize repository labels with the configuration.
pub mod label_sync;

/// Export label categories for actions/labeler.
pub mod labeler_generate;

/// Comment on a pull request.
pub mod pr_comment;

/// Open the staging pull request.
pub mod pr_create;

/// Refresh the staging pull request notes.
pub mod pr_update;

/// Publish a versioned release.
pub mod release;

/// Print the configuration schema.
pub mod schema;

use common::CommandOutput;

/// Build the forge manager for commands talking to GitHub.
fn connect(args: &Args) -> Result<ForgeManager> {
    let remote_config = args.remote_config()?;

    if remote_config.dry_run {
        warn!("dry run enabled: no changes will be made on GitHub");
    }

    Ok(ForgeManager::new(Box::new(Github::new(remote_config)?)))
}

/// Load configuration and run the selected subcommand.
pub async fn run(args: Args) -> Result<CommandOutput> {
    let config = loader::load(args.config.as_deref())?;

    match args.command.clone() {
        Command::SyncLabels {
            replace_all,
            interval_ms,
        } => {
            label_sync::execute(
                &connect(&args)?,
                &config.label,
                replace_all,
                Duration::from_millis(interval_ms),
            )
            .await
        }
        Command::AttachLabels {
            pr_number,
            labels,
            lgtm,
        } => {
            label_attach::execute(
                &connect(&args)?,
                &config.label,
                pr_number,
                labels,
                lgtm,
            )
            .await
        }
        Command::GenerateLabeler { out_file } => {
            labeler_generate::execute(&config.label, &out_file).await
        }
        Command::CreatePr => pr_create::execute(&connect(&args)?, &config).await,
        Command::UpdatePr => {
            pr_update::execute(&connect(&args)?, &config.release).await
        }
        Command::Comment { pr_number, comment } => {
            pr_comment::execute(&connect(&args)?, pr_number, comment).await
        }
        Command::Release { pr_number } => {
            release::execute(&connect(&args)?, &config.release, pr_number)
                .await
        }
        Command::Schema => schema::execute(),
    }
}
