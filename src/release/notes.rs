//! Release notes: classify merged pull requests into categories and render
//! them as markdown.
//!
//! A pull request lands in every category with a (non-fallback) rule matching
//! its head branch. Pull requests no specific category claims are copied into
//! *every* fallback category, i.e. each category declaring the [`FALLBACK_RULE`]
//! pattern, or [`DEFAULT_FALLBACK_CATEGORY`] when none does.
use log::*;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::{
    config::ReleaseCategory,
    error::{ButlerError, Result},
    forge::request::PullRequest,
};

/// Rule value marking a release category as a fallback bucket.
pub const FALLBACK_RULE: &str = ".*";

/// Bucket used for unmatched pull requests when no category is a fallback.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "🔍 Other";

/// How a single pull request is rendered in the notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NoteFormat {
    /// `- [ ] #<number> @<author>`, used in staging pull request bodies.
    Checklist,
    /// `- [<title>](<url>) @<author>`, used in release bodies.
    List,
}

impl NoteFormat {
    /// Parses a format name, failing with [`ButlerError::InvalidFormat`].
    pub fn parse(format: &str) -> Result<Self> {
        NoteFormat::from_str(format)
            .map_err(|_| ButlerError::InvalidFormat(format.to_string()))
    }

    fn line(&self, pr: &PullRequest) -> String {
        let author = pr
            .author
            .as_ref()
            .map(|author| format!(" @{author}"))
            .unwrap_or_default();

        match self {
            NoteFormat::Checklist => format!("- [ ] #{}{author}", pr.number),
            NoteFormat::List => format!("- [{}]({}){author}", pr.title, pr.url),
        }
    }
}

/// A named group of pull requests in the release notes.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteBucket<'a> {
    pub name: String,
    pub prs: Vec<&'a PullRequest>,
}

impl<'a> NoteBucket<'a> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prs: vec![],
        }
    }
}

/// Names of the categories that receive unmatched pull requests.
pub fn fallback_categories(categories: &[ReleaseCategory]) -> Vec<String> {
    let fallbacks: Vec<String> = categories
        .iter()
        .filter(|c| c.rules.iter().any(|r| r.as_str() == FALLBACK_RULE))
        .map(|c| c.name.clone())
        .collect();

    if fallbacks.is_empty() {
        return vec![DEFAULT_FALLBACK_CATEGORY.to_string()];
    }

    fallbacks
}

/// Partition `prs` into buckets, one per category in declaration order
/// followed by any fallback bucket that is not a configured category.
///
/// Pull requests are sorted by number within each bucket.
pub fn classify<'a>(
    prs: &'a [PullRequest],
    categories: &[ReleaseCategory],
) -> Vec<NoteBucket<'a>> {
    let fallbacks = fallback_categories(categories);

    let mut buckets: Vec<NoteBucket<'a>> = vec![];
    for name in categories.iter().map(|c| c.name.as_str()) {
        if !buckets.iter().any(|b| b.name == name) {
            buckets.push(NoteBucket::new(name));
        }
    }
    for name in fallbacks.iter() {
        if !buckets.iter().any(|b| &b.name == name) {
            buckets.push(NoteBucket::new(name));
        }
    }

    let mut sorted: Vec<&PullRequest> = prs.iter().collect();
    sorted.sort_by_key(|pr| pr.number);

    for pr in sorted {
        let specifics: Vec<&str> = categories
            .iter()
            .filter(|c| {
                c.rules
                    .iter()
                    .filter(|r| r.as_str() != FALLBACK_RULE)
                    .any(|r| r.is_match(&pr.head))
            })
            .map(|c| c.name.as_str())
            .collect();

        let targets: Vec<&str> = if specifics.is_empty() {
            debug!("#{} ({}) matched no category: using fallbacks", pr.number, pr.head);
            fallbacks.iter().map(String::as_str).collect()
        } else {
            debug!("#{} ({}) matched categories: {:?}", pr.number, pr.head, specifics);
            specifics
        };

        for target in targets {
            if let Some(bucket) = buckets.iter_mut().find(|b| b.name == target) {
                bucket.prs.push(pr);
            }
        }
    }

    buckets
}

/// Render buckets as markdown, skipping empty ones.
pub fn render(buckets: &[NoteBucket], format: NoteFormat) -> String {
    buckets
        .iter()
        .filter(|bucket| !bucket.prs.is_empty())
        .map(|bucket| {
            let lines = bucket
                .prs
                .iter()
                .map(|pr| format.line(pr))
                .collect::<Vec<String>>()
                .join("\n");
            format!("## {}\n\n{lines}", bucket.name)
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Classify and render in one step.
pub fn generate(
    prs: &[PullRequest],
    categories: &[ReleaseCategory],
    format: NoteFormat,
) -> String {
    render(&classify(prs, categories), format)
}
