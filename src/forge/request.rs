use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(setter(into), default)]
/// Pull request normalized from the forge's native representation.
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    /// Base branch name.
    pub base: String,
    /// Head branch name.
    pub head: String,
    /// Head commit sha.
    pub sha: String,
    /// Base commit sha at the time the pull request was fetched.
    #[builder(setter(strip_option))]
    pub base_sha: Option<String>,
    /// Web url of the pull request.
    pub url: String,
    #[builder(setter(strip_option))]
    pub merged_at: Option<DateTime<Utc>>,
    #[builder(setter(strip_option))]
    pub author: Option<String>,
    #[builder(setter(strip_option))]
    pub merge_commit_sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to find an open pull request by branch names.
pub struct GetPrRequest {
    pub base_branch: String,
    pub head_branch: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to create a new pull request.
pub struct CreatePrRequest {
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to update an existing pull request.
pub struct UpdatePrRequest {
    pub pr_number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to add labels to a pull request.
pub struct PrLabelsRequest {
    pub pr_number: u64,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to create a repository label.
pub struct CreateLabelRequest {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to list merged pull requests targeting a branch.
pub struct ListMergedPrsRequest {
    pub base_branch: String,
    pub per_page: u8,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to publish a release.
pub struct CreateReleaseRequest {
    /// Tag name, e.g. `v1.2.0`.
    pub tag: String,
    pub title: String,
    pub body: String,
    /// Branch or sha the tag is created from.
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of comparing two refs.
pub struct Comparison {
    pub total_commits: u64,
    /// Shas of the commits in `head` that are not in `base`.
    pub shas: Vec<String>,
}
