//! Next version calculation from merged pull request branch names.
use log::*;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

use crate::{
    config::{IncrementLevel, VersionConfig},
    error::{ButlerError, Result},
    forge::request::PullRequest,
};

/// Version proposed when the repository has no release yet.
pub const INITIAL_VERSION: Version = Version::new(1, 0, 0);

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").expect("version regex is valid")
});

/// Parse `v1.2.3` / `1.2.3`. Anything else, including pre-release suffixes
/// or components that overflow `u64`, is an invalid format.
pub fn parse_version(version: &str) -> Result<Version> {
    let invalid = || ButlerError::InvalidVersionFormat(version.to_string());

    let caps = VERSION_RE.captures(version).ok_or_else(invalid)?;

    let component = |i: usize| -> Result<u64> {
        caps[i].parse::<u64>().map_err(|_| invalid())
    };

    Ok(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Render a version as a release tag: `v<major>.<minor>.<patch>`.
pub fn format_version(version: &Version) -> String {
    format!("v{}.{}.{}", version.major, version.minor, version.patch)
}

/// Bump the component selected by `level`, resetting the lower ones.
/// A component already at `u64::MAX` cannot be bumped and is reported as an
/// invalid format.
pub fn bump(version: &Version, level: IncrementLevel) -> Result<Version> {
    let next = |component: u64| {
        component.checked_add(1).ok_or_else(|| {
            ButlerError::InvalidVersionFormat(format_version(version))
        })
    };

    Ok(match level {
        IncrementLevel::Major => Version::new(next(version.major)?, 0, 0),
        IncrementLevel::Minor => {
            Version::new(version.major, next(version.minor)?, 0)
        }
        IncrementLevel::Patch => {
            Version::new(version.major, version.minor, next(version.patch)?)
        }
    })
}

/// Outcome of an increment: the parsed current version (if any release
/// exists) and the version to release next.
#[derive(Debug, Clone, PartialEq)]
pub struct Increment {
    pub current: Option<Version>,
    pub next: Version,
}

/// Decides the next version from configured head branch rules.
#[derive(Debug, Clone)]
pub struct VersionIncrementer<'a> {
    config: &'a VersionConfig,
}

impl<'a> VersionIncrementer<'a> {
    pub fn new(config: &'a VersionConfig) -> Self {
        Self { config }
    }

    /// Compute the next version.
    ///
    /// `current` is the latest release tag, or `None` when nothing has been
    /// released yet, in which case [`INITIAL_VERSION`] is returned without
    /// consulting any rule.
    pub fn increment(
        &self,
        current: Option<&str>,
        prs: &[PullRequest],
    ) -> Result<Increment> {
        let Some(current) = current else {
            info!("no previous release found: using initial version");
            return Ok(Increment {
                current: None,
                next: INITIAL_VERSION,
            });
        };

        let current = parse_version(current)?;
        let branches: Vec<&str> = prs.iter().map(|pr| pr.head.as_str()).collect();
        let level = self.level(&branches);
        let next = bump(&current, level)?;

        info!(
            "incrementing {} by {level}: next version {}",
            format_version(&current),
            format_version(&next)
        );

        Ok(Increment {
            current: Some(current),
            next,
        })
    }

    /// First level (major, minor, patch) with a rule matching any branch, or
    /// the configured default.
    pub fn level(&self, branches: &[&str]) -> IncrementLevel {
        for level in IncrementLevel::PRIORITY {
            let rules = self.config.rules.for_level(level);
            if let Some(branch) = branches
                .iter()
                .find(|branch| rules.iter().any(|rule| rule.is_match(branch)))
            {
                debug!("branch {branch} selects {level} increment");
                return level;
            }
        }

        let level = self.config.defaults.increment;
        debug!("no version rule matched: using default {level} increment");
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{VersionDefaults, VersionRules},
        test_helpers::{create_test_pr, patterns},
    };

    fn version_config(default: IncrementLevel) -> VersionConfig {
        VersionConfig {
            rules: VersionRules {
                major: patterns(&["^breaking/", "^major/"]),
                minor: patterns(&["^feature/", "^feat/"]),
                patch: patterns(&["^fix/", "^bugfix/"]),
            },
            defaults: VersionDefaults { increment: default },
        }
    }

    #[test]
    fn test_patch_increment_from_fix_branch() {
        let config = VersionConfig {
            rules: VersionRules {
                patch: patterns(&["^fix/"]),
                ..Default::default()
            },
            defaults: VersionDefaults {
                increment: IncrementLevel::Minor,
            },
        };
        let prs = vec![create_test_pr(1, "fix/bug-123", None)];

        let result = VersionIncrementer::new(&config)
            .increment(Some("v1.2.3"), &prs)
            .unwrap();

        assert_eq!(result.current, Some(Version::new(1, 2, 3)));
        assert_eq!(format_version(&result.next), "v1.2.4");
    }

    #[test]
    fn test_no_current_version_returns_initial() {
        let config = version_config(IncrementLevel::Major);
        let prs = vec![create_test_pr(1, "breaking/api", None)];
        let incrementer = VersionIncrementer::new(&config);

        for prs in [&prs[..], &[]] {
            let result = incrementer.increment(None, prs).unwrap();
            assert_eq!(
                result,
                Increment {
                    current: None,
                    next: Version::new(1, 0, 0),
                }
            );
        }
    }

    #[test]
    fn test_major_takes_priority() {
        let config = version_config(IncrementLevel::Patch);
        let prs = vec![
            create_test_pr(1, "fix/a", None),
            create_test_pr(2, "feature/b", None),
            create_test_pr(3, "breaking/c", None),
        ];

        let result = VersionIncrementer::new(&config)
            .increment(Some("v2.5.9"), &prs)
            .unwrap();

        assert_eq!(result.next, Version::new(3, 0, 0));
    }

    #[test]
    fn test_minor_resets_patch() {
        let config = version_config(IncrementLevel::Patch);
        let prs = vec![
            create_test_pr(1, "fix/a", None),
            create_test_pr(2, "feat/b", None),
        ];

        let result = VersionIncrementer::new(&config)
            .increment(Some("1.4.7"), &prs)
            .unwrap();

        assert_eq!(result.next, Version::new(1, 5, 0));
    }

    #[test]
    fn test_default_level_when_nothing_matches() {
        let config = version_config(IncrementLevel::Minor);
        let prs = vec![create_test_pr(1, "chore/deps", None)];

        let result = VersionIncrementer::new(&config)
            .increment(Some("v0.9.1"), &prs)
            .unwrap();

        assert_eq!(result.next, Version::new(0, 10, 0));
    }

    #[test]
    fn test_default_level_with_no_prs() {
        let config = version_config(IncrementLevel::Patch);

        let result = VersionIncrementer::new(&config)
            .increment(Some("v1.0.0"), &[])
            .unwrap();

        assert_eq!(result.next, Version::new(1, 0, 1));
    }

    #[test]
    fn test_invalid_current_version_fails() {
        let config = version_config(IncrementLevel::Patch);

        let err = VersionIncrementer::new(&config)
            .increment(Some("release-7"), &[])
            .unwrap_err();

        assert!(matches!(err, ButlerError::InvalidVersionFormat(_)));
    }

    #[test]
    fn test_parse_version_accepts_optional_prefix() {
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("10.20.30").unwrap(), Version::new(10, 20, 30));
        assert_eq!(parse_version("v01.002.0").unwrap(), Version::new(1, 2, 0));
    }

    #[test]
    fn test_parse_version_rejects_invalid_formats() {
        for input in [
            "v1.2",
            "va.b.c",
            "1.2.3.4",
            "v1.2.3-rc.1",
            "V1.2.3",
            " v1.2.3",
            "vv1.2.3",
            "",
            "v99999999999999999999.0.0",
        ] {
            let result = parse_version(input);
            assert!(
                matches!(result, Err(ButlerError::InvalidVersionFormat(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_increment_at_max_component_fails() {
        let config = version_config(IncrementLevel::Patch);

        let err = VersionIncrementer::new(&config)
            .increment(Some("v1.2.18446744073709551615"), &[])
            .unwrap_err();

        assert!(matches!(
            err,
            ButlerError::InvalidVersionFormat(tag) if tag == "v1.2.18446744073709551615"
        ));
    }

    #[test]
    fn test_format_parse_round_trip() {
        for version in [
            Version::new(0, 0, 0),
            Version::new(1, 2, 3),
            Version::new(10, 0, 42),
            Version::new(u64::MAX, u64::MAX, u64::MAX),
        ] {
            assert_eq!(parse_version(&format_version(&version)).unwrap(), version);
        }
    }

    #[test]
    fn test_versions_order_by_component() {
        assert!(Version::new(1, 2, 3) < Version::new(1, 3, 0));
        assert!(Version::new(1, 9, 9) < Version::new(2, 0, 0));
        assert!(Version::new(1, 2, 3) < Version::new(1, 2, 4));
    }

    #[test]
    fn test_bump_levels() {
        let version = Version::new(1, 2, 3);
        assert_eq!(
            bump(&version, IncrementLevel::Major).unwrap(),
            Version::new(2, 0, 0)
        );
        assert_eq!(
            bump(&version, IncrementLevel::Minor).unwrap(),
            Version::new(1, 3, 0)
        );
        assert_eq!(
            bump(&version, IncrementLevel::Patch).unwrap(),
            Version::new(1, 2, 4)
        );
    }

    #[test]
    fn test_bump_only_checks_the_bumped_component() {
        let version = Version::new(1, u64::MAX, u64::MAX);
        assert_eq!(
            bump(&version, IncrementLevel::Major).unwrap(),
            Version::new(2, 0, 0)
        );
        assert!(matches!(
            bump(&version, IncrementLevel::Minor),
            Err(ButlerError::InvalidVersionFormat(_))
        ));
    }

    #[test]
    fn test_level_checks_every_branch() {
        let config = version_config(IncrementLevel::Patch);
        let incrementer = VersionIncrementer::new(&config);

        assert_eq!(
            incrementer.level(&["docs/readme", "major/rewrite"]),
            IncrementLevel::Major
        );
        assert_eq!(incrementer.level(&["docs/readme"]), IncrementLevel::Patch);
    }
}
