// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation of a single changeset.

use crate::config::GateConfig;
use crate::error::Result;
use crate::git::{ChangeSet, Identity};
use crate::rules::{self, IdentityChecker, PatternCache};

use super::result::ChangeSetOutcome;

/// Run every group and both identity checks for one changeset.
///
/// Merge commits skip the groups when `exclude_merge_commits` is set; the
/// identity checks always run.
pub fn validate(
    changeset: &ChangeSet,
    config: &GateConfig,
    actor: Option<&Identity>,
    patterns: &mut PatternCache,
) -> Result<ChangeSetOutcome> {
    let mut group_outcomes = Vec::new();

    if changeset.is_merge() && config.exclude_merge_commits {
        tracing::debug!("{} is a merge commit, skipping rule groups", changeset.id);
    } else {
        for (index, group) in config.groups.iter().enumerate() {
            if let Some(outcome) = rules::evaluate(index, group, &changeset.message, patterns)? {
                group_outcomes.push(outcome);
            }
        }
    }

    let identity = IdentityChecker::new(config, actor);

    Ok(ChangeSetOutcome {
        changeset: changeset.clone(),
        group_outcomes,
        email_matched: identity.email_matches(&changeset.committer),
        name_matched: identity.name_matches(&changeset.committer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AcceptMode, Group, MatchMode, Rule};

    fn config() -> GateConfig {
        GateConfig {
            require_matching_author_email: true,
            groups: vec![
                Group::new(AcceptMode::Accept, MatchMode::All).with_rule(Rule::new(r"^JIRA-\d+")),
                Group::new(AcceptMode::ShowMessage, MatchMode::One).with_rule(Rule::new("(?i)todo")),
            ],
            ..GateConfig::default()
        }
    }

    fn actor() -> Identity {
        Identity::new("Ada", "ada@example.com")
    }

    fn validate_once(changeset: &ChangeSet, config: &GateConfig) -> Result<ChangeSetOutcome> {
        validate(changeset, config, Some(&actor()), &mut PatternCache::new())
    }

    #[test]
    fn test_groups_in_declaration_order() {
        let changeset = ChangeSet::new("c1", "fix bug, TODO tests", actor());
        let outcome = validate_once(&changeset, &config()).unwrap();

        let indexes: Vec<usize> = outcome.group_outcomes.iter().map(|o| o.group_index).collect();
        assert_eq!(indexes, vec![0, 1]);
        assert!(outcome.email_matched);
        assert!(outcome.name_matched);
    }

    #[test]
    fn test_clean_changeset_has_no_reportables() {
        let changeset = ChangeSet::new("c1", "JIRA-7 fix bug", actor());
        let outcome = validate_once(&changeset, &config()).unwrap();
        assert!(outcome.group_outcomes.is_empty());
        assert!(!outcome.has_reportables());
    }

    #[test]
    fn test_merge_commit_excluded_but_identity_checked() {
        let mut config = config();
        config.exclude_merge_commits = true;

        let committer = Identity::new("Ada", "someone@example.com");
        let merge = ChangeSet::new("m1", "Merge branch 'x'", committer).with_parent_count(2);
        let outcome = validate_once(&merge, &config).unwrap();

        assert!(outcome.group_outcomes.is_empty());
        assert!(!outcome.email_matched);
        assert!(outcome.name_matched);
    }

    #[test]
    fn test_merge_commit_checked_when_not_excluded() {
        let merge = ChangeSet::new("m1", "Merge branch 'x'", actor()).with_parent_count(2);
        let outcome = validate_once(&merge, &config()).unwrap();
        assert_eq!(outcome.group_outcomes.len(), 1);
        assert!(outcome.group_outcomes[0].is_violation());
    }
}
