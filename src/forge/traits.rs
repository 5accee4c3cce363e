//! Traits related to the remote forge
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            Comparison, CreateLabelRequest, CreatePrRequest,
            CreateReleaseRequest, GetPrRequest, ListMergedPrsRequest,
            PrLabelsRequest, PullRequest, UpdatePrRequest,
        },
    },
};

/// Primitive operations against the hosting platform. Each call either
/// succeeds or fails; retries are left to the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;

    // labels
    async fn list_labels(&self) -> Result<Vec<String>>;
    async fn create_label(&self, req: CreateLabelRequest) -> Result<()>;
    /// Deleting a label that does not exist is not an error.
    async fn delete_label(&self, name: &str) -> Result<()>;
    async fn add_labels(&self, req: PrLabelsRequest) -> Result<()>;

    // pull requests
    async fn find_open_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>>;
    async fn get_pr(&self, number: u64) -> Result<Option<PullRequest>>;
    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest>;
    async fn update_pr(&self, req: UpdatePrRequest) -> Result<()>;
    async fn comment(&self, number: u64, body: &str) -> Result<()>;
    async fn list_merged_prs(
        &self,
        req: ListMergedPrsRequest,
    ) -> Result<Vec<PullRequest>>;

    // refs
    async fn branch_sha(&self, branch: &str) -> Result<Option<String>>;
    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()>;
    async fn compare(&self, base: &str, head: &str) -> Result<Comparison>;

    // releases
    async fn latest_release_tag(&self) -> Result<Option<String>>;
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()>;
}
