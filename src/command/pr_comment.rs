//! Comments on a pull request.
use log::*;

use crate::{
    command::common::CommandOutput,
    error::{ButlerError, Result},
    forge::manager::ForgeManager,
};

/// Comment posted when none is given.
pub const DEFAULT_COMMENT: &str = "🚀 Release Butler";

/// Post `comment` (or [`DEFAULT_COMMENT`]) on the pull request. A pull
/// request that does not exist is skipped.
pub async fn execute(
    forge_manager: &ForgeManager,
    pr_number: Option<u64>,
    comment: Option<String>,
) -> Result<CommandOutput> {
    let pr_number =
        pr_number.ok_or_else(|| ButlerError::missing_env("PR_NUMBER"))?;

    let comment = comment
        .filter(|comment| !comment.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COMMENT.to_string());

    if forge_manager.get_pr(pr_number).await?.is_none() {
        warn!("pull request #{pr_number} not found: skipping comment");
        return Ok(CommandOutput::success(
            "⚠️ Skipped comment",
            serde_json::Value::Null,
        ));
    }

    forge_manager.comment(pr_number, &comment).await?;
    info!("commented on #{pr_number}");

    Ok(CommandOutput::success(
        "🎉 Comment added",
        serde_json::Value::Null,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forge::traits::MockForge,
        test_helpers::{create_test_manager, create_test_pr},
    };
    use mockall::predicate::eq;

    #[tokio::test]
    async fn comments_on_existing_pr() {
        let mut mock = MockForge::new();
        mock.expect_get_pr()
            .with(eq(1))
            .returning(|n| Ok(Some(create_test_pr(n, "fix/a", None))));
        mock.expect_comment()
            .with(eq(1), eq("Test comment"))
            .times(1)
            .returning(|_, _| Ok(()));

        let manager = create_test_manager(mock, false);
        let output = execute(&manager, Some(1), Some("Test comment".into()))
            .await
            .unwrap();

        assert_eq!(output.message, "🎉 Comment added");
    }

    #[tokio::test]
    async fn missing_pr_is_skipped() {
        let mut mock = MockForge::new();
        mock.expect_get_pr().returning(|_| Ok(None));
        mock.expect_comment().never();

        let manager = create_test_manager(mock, false);
        let output = execute(&manager, Some(999), Some("Test comment".into()))
            .await
            .unwrap();

        assert!(output.success);
    }

    #[tokio::test]
    async fn uses_default_comment() {
        let mut mock = MockForge::new();
        mock.expect_get_pr()
            .returning(|n| Ok(Some(create_test_pr(n, "fix/a", None))));
        mock.expect_comment()
            .with(eq(2), eq(DEFAULT_COMMENT))
            .times(1)
            .returning(|_, _| Ok(()));

        let manager = create_test_manager(mock, false);
        execute(&manager, Some(2), None).await.unwrap();
    }

    #[tokio::test]
    async fn missing_pr_number_fails() {
        let manager = create_test_manager(MockForge::new(), false);

        let result = execute(&manager, None, None).await;

        assert!(matches!(
            result,
            Err(ButlerError::MissingEnvironmentVariable(_))
        ));
    }
}
