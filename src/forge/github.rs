//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{
    Octocrab,
    models::{pulls::PullRequest as GithubPullRequest, repos::Object},
    params::{self, repos::Reference},
};
use serde::Deserialize;

use crate::{
    error::{ButlerError, Result, is_not_found},
    forge::{
        config::RemoteConfig,
        request::{
            Comparison, CreateLabelRequest, CreatePrRequest,
            CreateReleaseRequest, GetPrRequest, ListMergedPrsRequest,
            PrLabelsRequest, PullRequest, UpdatePrRequest,
        },
        traits::Forge,
    },
};

#[derive(Debug, Deserialize)]
struct CompareCommit {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct CompareResult {
    pub total_commits: u64,
    pub commits: Vec<CompareCommit>,
}

/// Normalize an octocrab pull request.
fn to_pull_request(pr: GithubPullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone().unwrap_or_default(),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
        base: pr.base.ref_field.clone(),
        head: pr.head.ref_field.clone(),
        sha: pr.head.sha.clone(),
        base_sha: Some(pr.base.sha.clone()),
        url: pr
            .html_url
            .as_ref()
            .map(|url| url.to_string())
            .unwrap_or_default(),
        merged_at: pr.merged_at,
        author: pr.user.as_ref().map(|user| user.login.clone()),
        merge_commit_sha: pr.merge_commit_sha.clone(),
    }
}

/// GitHub forge implementation using Octocrab for API interactions with
/// labels, pull requests, refs and releases.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(config.api_url.clone())
            .and_then(|builder| builder.build())
            .map_err(|e| {
                ButlerError::forge("failed to configure GitHub client", e)
            })?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_labels(&self) -> Result<Vec<String>> {
        let page = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .list_labels_for_repo()
            .per_page(100)
            .send()
            .await
            .map_err(|e| ButlerError::forge("failed to list labels", e))?;

        Ok(page.items.into_iter().map(|l| l.name).collect())
    }

    async fn create_label(&self, req: CreateLabelRequest) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .create_label(&req.name, &req.color, &req.description)
            .await
            .map_err(|e| {
                ButlerError::forge(
                    format!("failed to create label {}", req.name),
                    e,
                )
            })?;

        Ok(())
    }

    async fn delete_label(&self, name: &str) -> Result<()> {
        let result = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .delete_label(name)
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(err) if is_not_found(&err) => {
                info!("label {name} already deleted");
                Ok(())
            }
            Err(err) => Err(ButlerError::forge(
                format!("failed to delete label {name}"),
                err,
            )),
        }
    }

    async fn add_labels(&self, req: PrLabelsRequest) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(req.pr_number, &req.labels)
            .await
            .map_err(|e| ButlerError::forge("failed to add labels", e))?;

        Ok(())
    }

    async fn find_open_pr(
        &self,
        req: GetPrRequest,
    ) -> Result<Option<PullRequest>> {
        let page = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Open)
            .base(req.base_branch)
            .head(format!("{}:{}", self.config.owner, req.head_branch))
            .sort(params::pulls::Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(1)
            .send()
            .await
            .map_err(|e| ButlerError::forge("failed to find pull request", e))?;

        Ok(page.items.into_iter().next().map(to_pull_request))
    }

    async fn get_pr(&self, number: u64) -> Result<Option<PullRequest>> {
        let result = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await;

        match result {
            Ok(pr) => Ok(Some(to_pull_request(pr))),
            Err(err) if is_not_found(&err) => {
                info!("no pull request found for #{number}");
                Ok(None)
            }
            Err(err) => Err(ButlerError::forge(
                format!("failed to get pull request #{number}"),
                err,
            )),
        }
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<PullRequest> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, req.head_branch, req.base_branch)
            .body(req.body)
            .send()
            .await
            .map_err(|e| {
                ButlerError::forge("failed to create pull request", e)
            })?;

        Ok(to_pull_request(pr))
    }

    async fn update_pr(&self, req: UpdatePrRequest) -> Result<()> {
        let handler = self.instance.pulls(&self.config.owner, &self.config.repo);
        let mut builder = handler.update(req.pr_number);

        if let Some(title) = req.title {
            builder = builder.title(title);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        builder.send().await.map_err(|e| {
            ButlerError::forge(
                format!("failed to update pull request #{}", req.pr_number),
                e,
            )
        })?;

        Ok(())
    }

    async fn comment(&self, number: u64, body: &str) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(number, body)
            .await
            .map_err(|e| ButlerError::forge("failed to add comment", e))?;

        Ok(())
    }

    async fn list_merged_prs(
        &self,
        req: ListMergedPrsRequest,
    ) -> Result<Vec<PullRequest>> {
        let page = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Closed)
            .base(req.base_branch)
            .sort(params::pulls::Sort::Updated)
            .direction(params::Direction::Descending)
            .per_page(req.per_page)
            .send()
            .await
            .map_err(|e| {
                ButlerError::forge("failed to list merged pull requests", e)
            })?;

        Ok(page
            .items
            .into_iter()
            .filter(|pr| pr.merged_at.is_some())
            .map(to_pull_request)
            .collect())
    }

    async fn branch_sha(&self, branch: &str) -> Result<Option<String>> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_ref(&Reference::Branch(branch.to_string()))
            .await;

        match result {
            Ok(reference) => match reference.object {
                Object::Commit { sha, .. } => Ok(Some(sha)),
                Object::Tag { sha, .. } => Ok(Some(sha)),
                _ => Ok(None),
            },
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(ButlerError::forge(
                format!("failed to get branch {branch}"),
                err,
            )),
        }
    }

    async fn create_branch(&self, branch: &str, sha: &str) -> Result<()> {
        info!("creating branch {branch} at {sha}");

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&Reference::Branch(branch.to_string()), sha)
            .await
            .map_err(|e| {
                ButlerError::forge(format!("failed to create branch {branch}"), e)
            })?;

        Ok(())
    }

    async fn compare(&self, base: &str, head: &str) -> Result<Comparison> {
        let route = format!(
            "/repos/{}/{}/compare/{base}...{head}",
            self.config.owner, self.config.repo
        );

        let result: CompareResult = self
            .instance
            .get(route, None::<&()>)
            .await
            .map_err(|e| {
                ButlerError::forge(
                    format!("failed to compare {base} and {head}"),
                    e,
                )
            })?;

        Ok(Comparison {
            total_commits: result.total_commits,
            shas: result.commits.into_iter().map(|c| c.sha).collect(),
        })
    }

    async fn latest_release_tag(&self) -> Result<Option<String>> {
        let page = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .list()
            .per_page(1)
            .send()
            .await
            .map_err(|e| ButlerError::forge("failed to get latest release", e))?;

        Ok(page.items.into_iter().next().map(|r| r.tag_name))
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .name(&req.title)
            .body(&req.body)
            .target_commitish(&req.target)
            .draft(false)
            .prerelease(false)
            .send()
            .await
            .map_err(|e| {
                ButlerError::forge(
                    format!("failed to create release {}", req.tag),
                    e,
                )
            })?;

        Ok(())
    }
}
