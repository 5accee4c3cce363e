//! Manager that wraps forge implementations
use log::*;

use crate::{
    config::ReleaseConfig,
    error::{ButlerError, Result},
    forge::{
        config::{MAX_PAGE_SIZE, RemoteConfig},
        request::{
            CreateLabelRequest, CreatePrRequest, CreateReleaseRequest,
            GetPrRequest, ListMergedPrsRequest, PrLabelsRequest, PullRequest,
            UpdatePrRequest,
        },
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn list_labels(&self) -> Result<Vec<String>> {
        self.forge.list_labels().await
    }

    pub async fn create_label(&self, req: CreateLabelRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create label: req: {:#?}", req);
            return Ok(());
        }
        self.forge.create_label(req).await
    }

    pub async fn delete_label(&self, name: &str) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would delete label: {name}");
            return Ok(());
        }
        self.forge.delete_label(name).await
    }

    pub async fn add_labels(&self, req: PrLabelsRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would add PR labels: req: {:#?}", req);
            return Ok(());
        }
        self.forge.add_labels(req).await
    }

    pub async fn find_open_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>> {
        self.forge.find_open_pr(req).await
    }

    pub async fn get_pr(&self, number: u64) -> Result<Option<PullRequest>> {
        self.forge.get_pr(number).await
    }

    pub async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create PR: req: {:#?}", req);
            return Ok(PullRequest {
                number: 0,
                title: req.title,
                body: req.body,
                base: req.base_branch,
                head: req.head_branch,
                sha: "fff".into(),
                ..Default::default()
            });
        }

        self.forge.create_pr(req).await
    }

    pub async fn update_pr(&self, req: UpdatePrRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would update PR: req: {:#?}", req);
            return Ok(());
        }
        self.forge.update_pr(req).await
    }

    pub async fn comment(&self, number: u64, body: &str) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would comment on PR #{number}: {body}");
            return Ok(());
        }
        self.forge.comment(number, body).await
    }

    pub async fn latest_release_tag(&self) -> Result<Option<String>> {
        self.forge.latest_release_tag().await
    }

    pub async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create release: req: {:#?}", req);
            return Ok(());
        }
        self.forge.create_release(req).await
    }

    /// Whether `head` has commits that `base` does not. A branch missing on
    /// the remote is first created from the one that exists.
    pub async fn has_diff(&self, base: &str, head: &str) -> Result<bool> {
        let base_sha = self.forge.branch_sha(base).await?;
        let head_sha = self.forge.branch_sha(head).await?;

        let source = base_sha.clone().or_else(|| head_sha.clone()).ok_or_else(
            || ButlerError::Forge {
                summary: format!("failed to compare {base} and {head}"),
                reason: "at least one of the branches must exist".into(),
            },
        )?;

        for (branch, sha) in [(base, &base_sha), (head, &head_sha)] {
            if sha.is_some() {
                continue;
            }

            if self.remote_config.dry_run {
                warn!("dry_run: would create branch {branch} at {source}");
                continue;
            }

            info!("branch {branch} does not exist: creating from {source}");
            self.forge.create_branch(branch, &source).await?;
        }

        let comparison = self.forge.compare(base, head).await?;
        debug!(
            "{head} is {} commit(s) ahead of {base}",
            comparison.total_commits
        );

        Ok(comparison.total_commits > 0)
    }

    /// Pull requests merged into the release head branch that are part of
    /// the release.
    ///
    /// When `number` refers to a pull request targeting the release base
    /// from any branch other than the release head, it is a hotfix and is
    /// the only pull request released.
    pub async fn release_prs(
        &self,
        config: &ReleaseConfig,
        number: Option<u64>,
    ) -> Result<Vec<PullRequest>> {
        let pr = match number {
            Some(number) => self.forge.get_pr(number).await?,
            None => None,
        };

        if let Some(pr) = pr.as_ref() {
            let is_hotfix = pr.head != config.head && pr.base == config.base;
            if is_hotfix {
                info!(
                    "pull request #{} is a hotfix: releasing it alone",
                    pr.number
                );
                return Ok(vec![pr.clone()]);
            }
        }

        let compare_base = pr
            .as_ref()
            .and_then(|pr| pr.base_sha.clone())
            .unwrap_or_else(|| config.base.clone());

        let comparison = self.forge.compare(&compare_base, &config.head).await?;

        if comparison.total_commits == 0 {
            info!("no commits between {compare_base} and {}", config.head);
            return Ok(vec![]);
        }

        let per_page = comparison
            .total_commits
            .min(MAX_PAGE_SIZE as u64) as u8;

        let merged = self
            .forge
            .list_merged_prs(ListMergedPrsRequest {
                base_branch: config.head.clone(),
                per_page,
            })
            .await?;

        let prs: Vec<PullRequest> = merged
            .into_iter()
            .filter(|pr| {
                pr.merged_at.is_some()
                    && pr
                        .merge_commit_sha
                        .as_ref()
                        .is_some_and(|sha| comparison.shas.contains(sha))
            })
            .collect();

        info!("found {} pull request(s) to release", prs.len());

        Ok(prs)
    }
}
