//! Synchronizes repository labels with the configured label categories.
use log::*;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;

use crate::{
    command::common::CommandOutput,
    config::LabelConfig,
    error::Result,
    forge::{manager::ForgeManager, request::CreateLabelRequest},
};

/// Pause between label API calls to stay clear of secondary rate limits.
pub const DEFAULT_CALL_INTERVAL: Duration = Duration::from_secs(1);

/// Create every configured label missing on the repository. With
/// `replace_all`, existing labels are deleted first.
pub async fn execute(
    forge_manager: &ForgeManager,
    config: &LabelConfig,
    replace_all: bool,
    interval: Duration,
) -> Result<CommandOutput> {
    let mut existing = forge_manager.list_labels().await?;
    debug!("repository has {} label(s)", existing.len());

    let mut deleted = vec![];

    if replace_all {
        for name in existing.drain(..) {
            forge_manager.delete_label(&name).await?;
            info!("🗑️ deleted label {name}");
            deleted.push(name);
            sleep(interval).await;
        }
    }

    let mut created = vec![];

    for definition in config.definitions() {
        if existing.contains(&definition.name) {
            debug!("label {} already exists", definition.name);
            continue;
        }

        forge_manager
            .create_label(CreateLabelRequest {
                name: definition.name.clone(),
                description: definition.description,
                color: definition.color,
            })
            .await?;

        info!("✨ created label {}", definition.name);
        existing.push(definition.name.clone());
        created.push(definition.name);
        sleep(interval).await;
    }

    Ok(CommandOutput::success(
        "🎉 Labels synchronized",
        json!({ "created": created, "deleted": deleted }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LabelDefinition,
        forge::traits::MockForge,
        test_helpers::{create_test_label_category, create_test_manager},
    };
    use mockall::predicate::eq;

    fn label_config() -> LabelConfig {
        LabelConfig {
            categories: vec![
                create_test_label_category("Bug", "🐛", vec![]),
                create_test_label_category("Docs", "📝", vec![]),
            ],
            lgtm: Some(LabelDefinition {
                name: "LGTM".into(),
                description: "approved".into(),
                icon: "👍".into(),
                color: "0E8A16".into(),
            }),
        }
    }

    #[test_log::test(tokio::test)]
    async fn creates_only_missing_labels() {
        let mut mock = MockForge::new();
        mock.expect_list_labels()
            .returning(|| Ok(vec!["🐛 Bug".into(), "wontfix".into()]));
        mock.expect_delete_label().never();
        mock.expect_create_label()
            .with(eq(CreateLabelRequest {
                name: "📝 Docs".into(),
                description: "Docs changes".into(),
                color: "000000".into(),
            }))
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_create_label()
            .with(eq(CreateLabelRequest {
                name: "👍 LGTM".into(),
                description: "approved".into(),
                color: "0E8A16".into(),
            }))
            .times(1)
            .returning(|_| Ok(()));

        let manager = create_test_manager(mock, false);
        let output =
            execute(&manager, &label_config(), false, Duration::ZERO)
                .await
                .unwrap();

        assert!(output.success);
        assert_eq!(output.data["created"], json!(["📝 Docs", "👍 LGTM"]));
        assert_eq!(output.data["deleted"], json!([]));
    }

    #[tokio::test]
    async fn replace_all_deletes_then_recreates() {
        let mut mock = MockForge::new();
        mock.expect_list_labels()
            .returning(|| Ok(vec!["🐛 Bug".into(), "wontfix".into()]));
        mock.expect_delete_label()
            .with(eq("🐛 Bug"))
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_delete_label()
            .with(eq("wontfix"))
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_create_label().times(3).returning(|_| Ok(()));

        let manager = create_test_manager(mock, false);
        let output = execute(&manager, &label_config(), true, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(output.data["deleted"], json!(["🐛 Bug", "wontfix"]));
        assert_eq!(
            output.data["created"],
            json!(["🐛 Bug", "📝 Docs", "👍 LGTM"])
        );
    }

    #[tokio::test]
    async fn list_failure_is_propagated() {
        let mut mock = MockForge::new();
        mock.expect_list_labels().returning(|| {
            Err(crate::error::ButlerError::Forge {
                summary: "failed to list labels".into(),
                reason: "unauthorized".into(),
            })
        });
        mock.expect_create_label().never();

        let manager = create_test_manager(mock, false);
        let result =
            execute(&manager, &label_config(), false, Duration::ZERO).await;

        assert!(result.is_err());
    }
}
