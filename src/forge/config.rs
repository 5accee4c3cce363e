//! Configuration for the GitHub connection.
use secrecy::SecretString;

/// Default GitHub REST API base url.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Default GitHub web url used to link pull requests.
pub const DEFAULT_WEB_URL: &str = "https://github.com";
/// Maximum page size accepted by the GitHub REST API.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// REST API base url.
    pub api_url: String,
    /// Web url pull request links are built from.
    pub web_url: String,
    /// Log mutating calls instead of performing them.
    pub dry_run: bool,
}

impl RemoteConfig {
    /// Web link to a pull request of this repository.
    pub fn pr_link(&self, number: u64) -> String {
        format!(
            "{}/{}/{}/pull/{number}",
            self.web_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            api_url: DEFAULT_API_URL.to_string(),
            web_url: DEFAULT_WEB_URL.to_string(),
            dry_run: false,
        }
    }
}
