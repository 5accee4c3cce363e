//! Branch based label matching.
//!
//! Decides whether a [`LabelCategory`] applies to a pull request from its base
//! and head branch names alone. File based rules (`changed-files`) are left to
//! the third-party labeler the configuration is exported to, so they never
//! match here.
use crate::config::{BaseRule, LabelCategory, Pattern, Rule, RootRule};

/// Returns true when any rule of `category` matches the `base`/`head` pair.
pub fn is_matched(category: &LabelCategory, base: &str, head: &str) -> bool {
    category.rules.iter().any(|rule| match rule {
        Rule::Base(rule) => is_branch_any_match(rule, base, head),
        Rule::Root(root) => is_root_match(root, base, head),
    })
}

/// Names (`"<icon> <name>"`) of every category matching the branch pair, in
/// declaration order.
pub fn matching_labels(
    categories: &[LabelCategory],
    base: &str,
    head: &str,
) -> Vec<String> {
    categories
        .iter()
        .filter(|category| is_matched(category, base, head))
        .map(LabelCategory::label_name)
        .collect()
}

// `any` decides the result whenever the key is present, `all` is only
// consulted when there is no `any` key.
fn is_root_match(rule: &RootRule, base: &str, head: &str) -> bool {
    if let Some(any) = &rule.any {
        return any.iter().any(|rule| is_branch_any_match(rule, base, head));
    }

    if let Some(all) = &rule.all {
        return all.iter().any(|rule| is_branch_all_match(rule, base, head));
    }

    false
}

// Base patterns take precedence: head patterns are only tested when no base
// pattern matched.
fn is_branch_any_match(rule: &BaseRule, base: &str, head: &str) -> bool {
    if let Some(patterns) = &rule.base_branch
        && any_matches(patterns, base)
    {
        return true;
    }

    match &rule.head_branch {
        Some(patterns) => any_matches(patterns, head),
        None => false,
    }
}

// Both keys are required; each of their patterns must match.
fn is_branch_all_match(rule: &BaseRule, base: &str, head: &str) -> bool {
    match (&rule.base_branch, &rule.head_branch) {
        (Some(base_patterns), Some(head_patterns)) => {
            all_match(base_patterns, base) && all_match(head_patterns, head)
        }
        _ => false,
    }
}

fn any_matches(patterns: &[Pattern], branch: &str) -> bool {
    patterns.iter().any(|p| p.is_match(branch))
}

fn all_match(patterns: &[Pattern], branch: &str) -> bool {
    patterns.iter().all(|p| p.is_match(branch))
}
