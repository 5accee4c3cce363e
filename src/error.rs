//! Custom error types for release-butler.

use thiserror::Error;

/// Main error type for release-butler operations.
#[derive(Error, Debug)]
pub enum ButlerError {
    // Environment / cli errors
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    // Configuration errors
    #[error("Configuration file not found: {0}")]
    MissingConfigFile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Release errors
    #[error("Invalid increment level: {0}")]
    InvalidIncrementLevel(String),

    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Invalid pull request format: {0}")]
    InvalidFormat(String),

    // Forge errors
    #[error("{summary}: {reason}")]
    Forge { summary: String, reason: String },

    // Parsing errors - automatic conversions via #[from]
    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using ButlerError
pub type Result<T> = std::result::Result<T, ButlerError>;

impl ButlerError {
    /// Create a forge error from the summary of the failed action and the
    /// underlying octocrab error.
    pub fn forge(summary: impl Into<String>, err: octocrab::Error) -> Self {
        let reason = match &err {
            octocrab::Error::GitHub { source, .. } => {
                status_reason(source.status_code.as_u16()).to_string()
            }
            _ => format!("communication error: {err}"),
        };

        Self::Forge {
            summary: summary.into(),
            reason,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a missing environment variable error
    pub fn missing_env(msg: impl Into<String>) -> Self {
        Self::MissingEnvironmentVariable(msg.into())
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        401 => "token authentication failed",
        403 => "access denied",
        404 => "resource not found",
        422 => "request content is invalid",
        _ => "an error occurred while communicating with GitHub",
    }
}

/// Returns true when the octocrab error is a GitHub 404 response.
pub fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(
        err,
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = ButlerError::invalid_config("missing field");
        assert_eq!(err.to_string(), "Invalid configuration: missing field");

        let err = ButlerError::InvalidVersionFormat("v1.2".into());
        assert_eq!(err.to_string(), "Invalid version format: v1.2");

        let err = ButlerError::Forge {
            summary: "failed to list labels".into(),
            reason: status_reason(404).into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to list labels: resource not found"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = ButlerError::invalid_config("missing field");
        assert!(matches!(err, ButlerError::InvalidConfig(_)));

        let err = ButlerError::missing_env("GITHUB_TOKEN");
        assert!(matches!(err, ButlerError::MissingEnvironmentVariable(_)));
    }

    #[test]
    fn test_status_reasons() {
        assert_eq!(status_reason(401), "token authentication failed");
        assert_eq!(status_reason(403), "access denied");
        assert_eq!(status_reason(422), "request content is invalid");
        assert_eq!(
            status_reason(500),
            "an error occurred while communicating with GitHub"
        );
    }

    #[test]
    fn test_from_conversions() {
        let regex_err = regex::Regex::new("(unclosed");
        assert!(regex_err.is_err());
        let err: ButlerError = regex_err.unwrap_err().into();
        assert!(matches!(err, ButlerError::RegexError(_)));
    }
}
