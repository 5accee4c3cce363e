//! Refreshes the body of the open staging pull request.
use log::*;
use serde_json::json;

use crate::{
    command::common::{CommandOutput, staging_notes},
    config::ReleaseConfig,
    error::Result,
    forge::{
        manager::ForgeManager,
        request::{GetPrRequest, UpdatePrRequest},
    },
};

/// Replace the staging pull request body with up to date checklist notes.
/// Does nothing when no staging pull request is open.
pub async fn execute(
    forge_manager: &ForgeManager,
    config: &ReleaseConfig,
) -> Result<CommandOutput> {
    let found = forge_manager
        .find_open_pr(GetPrRequest {
            base_branch: config.base.clone(),
            head_branch: config.head.clone(),
        })
        .await?;

    let Some(found) = found else {
        info!("no open pull request for {} ← {}", config.base, config.head);
        return Ok(CommandOutput::success(
            "⚠️ Skipped pull request update",
            json!({ "number": null }),
        ));
    };

    let body = staging_notes(forge_manager, config).await?;

    forge_manager
        .update_pr(UpdatePrRequest {
            pr_number: found.number,
            title: None,
            body: Some(body),
        })
        .await?;

    info!("updated pull request #{}", found.number);

    Ok(CommandOutput::success(
        "🎉 Pull request updated",
        json!({ "number": found.number }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        forge::{request::Comparison, traits::MockForge},
        test_helpers::{create_test_manager, create_test_pr},
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn updates_open_pr_body() {
        let mut mock = MockForge::new();
        mock.expect_find_open_pr()
            .with(eq(GetPrRequest {
                base_branch: "main".into(),
                head_branch: "staging".into(),
            }))
            .returning(|_| Ok(Some(create_test_pr(8, "staging", None))));
        mock.expect_compare()
            .returning(|_, _| Ok(Comparison::default()));
        mock.expect_update_pr()
            .with(eq(UpdatePrRequest {
                pr_number: 8,
                title: None,
                body: Some("".into()),
            }))
            .times(1)
            .returning(|_| Ok(()));

        let manager = create_test_manager(mock, false);
        let output = execute(&manager, &Config::default().release)
            .await
            .unwrap();

        assert_eq!(output.data, json!({ "number": 8 }));
    }

    #[tokio::test]
    async fn skips_without_open_pr() {
        let mut mock = MockForge::new();
        mock.expect_find_open_pr().returning(|_| Ok(None));
        mock.expect_update_pr().never();

        let manager = create_test_manager(mock, false);
        let output = execute(&manager, &Config::default().release)
            .await
            .unwrap();

        assert_eq!(output.data, json!({ "number": null }));
    }
}
