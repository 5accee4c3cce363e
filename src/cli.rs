//! CLI argument parsing and GitHub connection configuration.
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::path::PathBuf;

use crate::{
    command::labeler_generate::DEFAULT_LABELER_FILE,
    error::{ButlerError, Result},
    forge::config::{DEFAULT_API_URL, DEFAULT_WEB_URL, RemoteConfig},
};

/// Global CLI arguments for configuration, GitHub access and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Path to the configuration file. Built-in defaults are used when
    /// omitted.
    pub config: Option<PathBuf>,

    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "", global = true)]
    /// Repository in `owner/repo` form.
    pub repo: String,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    /// GitHub access token.
    pub github_token: String,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    /// GitHub REST API base url.
    pub api_url: String,

    #[arg(long, env = "GITHUB_SERVER_URL", default_value = DEFAULT_WEB_URL, global = true)]
    /// GitHub web url used for pull request links.
    pub web_url: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Log mutating forge calls instead of performing them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Butler subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create configured labels missing on the repository.
    SyncLabels {
        #[arg(long, default_value_t = false)]
        /// Delete every existing label first.
        replace_all: bool,

        #[arg(long, default_value_t = 1000)]
        /// Milliseconds to wait between label API calls.
        interval_ms: u64,
    },

    /// Attach labels to a pull request.
    AttachLabels {
        #[arg(long, env = "PR_NUMBER")]
        /// Pull request number.
        pr_number: Option<u64>,

        #[arg(long, env = "LABELS", value_delimiter = ',')]
        /// Comma separated label names.
        labels: Vec<String>,

        #[arg(long, default_value_t = false)]
        /// Also attach the configured lgtm label.
        lgtm: bool,
    },

    /// Write the actions/labeler configuration for the label categories.
    GenerateLabeler {
        #[arg(long, default_value = DEFAULT_LABELER_FILE)]
        /// Output file.
        out_file: PathBuf,
    },

    /// Open the staging pull request when the head has new changes.
    CreatePr,

    /// Refresh the notes of the open staging pull request.
    UpdatePr,

    /// Comment on a pull request.
    Comment {
        #[arg(long, env = "PR_NUMBER")]
        /// Pull request number.
        pr_number: Option<u64>,

        #[arg(long, env = "COMMENT")]
        /// Comment body. Defaults to the butler signature.
        comment: Option<String>,
    },

    /// Publish a release for a merged pull request.
    Release {
        #[arg(long, env = "PR_NUMBER")]
        /// Merged pull request number.
        pr_number: Option<u64>,
    },

    /// Print the configuration JSON schema.
    Schema,
}

impl Args {
    /// Configure the GitHub connection from CLI arguments and environment.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let token = self.github_token.trim();

        if token.is_empty() {
            return Err(ButlerError::missing_env("GITHUB_TOKEN"));
        }

        if self.repo.trim().is_empty() {
            return Err(ButlerError::missing_env("GITHUB_REPOSITORY"));
        }

        let (owner, repo) = parse_repo(&self.repo)?;

        Ok(RemoteConfig {
            owner,
            repo,
            token: SecretString::from(token.to_string()),
            api_url: self.api_url.clone(),
            web_url: self.web_url.clone(),
            dry_run: self.dry_run,
        })
    }
}

/// Split `owner/repo` into its parts.
fn parse_repo(repo: &str) -> Result<(String, String)> {
    let invalid = || {
        ButlerError::invalid_config(format!(
            "repository must be in owner/repo form: {repo}"
        ))
    };

    let (owner, name) = repo.trim().split_once('/').ok_or_else(invalid)?;

    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }

    Ok((owner.to_string(), name.to_string()))
}
