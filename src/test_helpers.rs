//! Common test helper functions shared across test modules.
//!
//! This module provides reusable builders for test fixtures and mock
//! objects, reducing duplication across the test suites.
use secrecy::SecretString;

use crate::{
    config::{LabelCategory, Pattern, ReleaseCategory, Rule},
    forge::{
        config::RemoteConfig,
        manager::ForgeManager,
        request::{PullRequest, PullRequestBuilder},
        traits::MockForge,
    },
};

/// Creates a test RemoteConfig for the `test/repo` repository.
///
/// # Example
/// ```ignore
/// let config = create_test_remote_config();
/// ```
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        token: SecretString::from("test-token".to_string()),
        ..RemoteConfig::default()
    }
}

/// Creates a test PullRequest merged from `head`.
///
/// # Arguments
/// * `number` - Pull request number
/// * `head` - Head branch name
/// * `author` - Optional author login
///
/// # Example
/// ```ignore
/// let pr = create_test_pr(1, "feature/login", Some("octocat"));
/// ```
pub fn create_test_pr(
    number: u64,
    head: &str,
    author: Option<&str>,
) -> PullRequest {
    let mut pr = PullRequestBuilder::default()
        .number(number)
        .title(format!("PR {number}"))
        .head(head)
        .base("staging")
        .sha(format!("sha-{number}"))
        .url(format!("https://github.com/test/repo/pull/{number}"))
        .build()
        .unwrap();
    pr.author = author.map(String::from);
    pr
}

/// Creates a release category from regex sources.
pub fn create_test_release_category(
    name: &str,
    rules: &[&str],
) -> ReleaseCategory {
    ReleaseCategory {
        name: name.to_string(),
        rules: rules.iter().map(|r| Pattern::new(r).unwrap()).collect(),
    }
}

/// Creates a label category with the given rules.
pub fn create_test_label_category(
    name: &str,
    icon: &str,
    rules: Vec<Rule>,
) -> LabelCategory {
    LabelCategory {
        name: name.to_string(),
        description: format!("{name} changes"),
        icon: icon.to_string(),
        color: "000000".to_string(),
        rules,
    }
}

/// Converts regex sources into patterns.
pub fn patterns(sources: &[&str]) -> Vec<Pattern> {
    sources.iter().map(|s| Pattern::new(s).unwrap()).collect()
}

/// Wraps a MockForge in a ForgeManager, registering the remote config
/// expectation every manager needs.
pub fn create_test_manager(mut mock: MockForge, dry_run: bool) -> ForgeManager {
    mock.expect_remote_config().returning(move || RemoteConfig {
        dry_run,
        ..create_test_remote_config()
    });
    ForgeManager::new(Box::new(mock))
}
