// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation of a single reference update.

use crate::config::GateConfig;
use crate::error::Result;
use crate::git::{ChangeType, Identity, ReferenceUpdate};
use crate::rules::PatternCache;

use super::changeset;
use super::result::RefChangeOutcome;
use super::traits::ChangesetProvider;

/// Why a reference update is not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The ref is deleted; there is no new history.
    Deleted,
    /// The ref does not match the branch filter.
    FilteredOut,
    /// Notes are never validated.
    Note,
    /// Tags are excluded by configuration.
    ExcludedTag,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::Deleted => "ref is deleted",
            SkipReason::FilteredOut => "ref does not match the branch filter",
            SkipReason::Note => "ref is a note",
            SkipReason::ExcludedTag => "tag commits are excluded",
        };
        write!(f, "{}", reason)
    }
}

/// Apply the reference filters in order, returning the first that applies.
///
/// A malformed branch filter is a configuration error.
pub fn skip_reason(
    update: &ReferenceUpdate,
    config: &GateConfig,
    patterns: &mut PatternCache,
) -> Result<Option<SkipReason>> {
    if update.change_type == ChangeType::Delete {
        return Ok(Some(SkipReason::Deleted));
    }

    if !patterns.get(config.branch_filter())?.is_match(&update.ref_id) {
        return Ok(Some(SkipReason::FilteredOut));
    }

    if update.is_note() {
        return Ok(Some(SkipReason::Note));
    }

    if update.is_tag() && config.exclude_tag_commits {
        return Ok(Some(SkipReason::ExcludedTag));
    }

    Ok(None)
}

/// Validate every new changeset of `update`.
///
/// Skipped updates yield an empty outcome without asking the provider.
pub fn validate(
    update: &ReferenceUpdate,
    config: &GateConfig,
    actor: Option<&Identity>,
    provider: &dyn ChangesetProvider,
    patterns: &mut PatternCache,
) -> Result<RefChangeOutcome> {
    let mut outcome = RefChangeOutcome::new(update.clone());

    if let Some(reason) = skip_reason(update, config, patterns)? {
        tracing::debug!("Skipping {}: {}", update.ref_id, reason);
        return Ok(outcome);
    }

    for changeset in provider.list_new_changesets(update)? {
        tracing::debug!(
            "Validating {} ({} parent(s)) committed by {}",
            changeset.id,
            changeset.parent_count,
            changeset.committer
        );
        outcome.insert(changeset::validate(&changeset, config, actor, patterns)?);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AcceptMode, Group, MatchMode, Rule};
    use crate::error::{ConfigError, GateError};
    use crate::git::ChangeSet;
    use std::cell::RefCell;

    const ZERO: &str = "0000000000000000000000000000000000000000";
    const OLD: &str = "1111111111111111111111111111111111111111";
    const NEW: &str = "2222222222222222222222222222222222222222";

    /// Returns fixed changesets and records every request.
    struct Recorder {
        changesets: Vec<ChangeSet>,
        requests: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn new(messages: &[&str]) -> Self {
            let changesets = messages
                .iter()
                .enumerate()
                .map(|(i, message)| {
                    ChangeSet::new(format!("c{}", i), *message, Identity::new("Ada", "ada@example.com"))
                })
                .collect();
            Self {
                changesets,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChangesetProvider for Recorder {
        fn list_new_changesets(&self, update: &ReferenceUpdate) -> Result<Vec<ChangeSet>> {
            self.requests.borrow_mut().push(update.ref_id.clone());
            Ok(self.changesets.clone())
        }
    }

    fn config() -> GateConfig {
        GateConfig {
            groups: vec![Group::new(AcceptMode::Accept, MatchMode::All).with_rule(Rule::new(r"^JIRA-\d+"))],
            ..GateConfig::default()
        }
    }

    fn skip(update: &ReferenceUpdate, config: &GateConfig) -> Result<Option<SkipReason>> {
        skip_reason(update, config, &mut PatternCache::new())
    }

    fn validate_once(
        update: &ReferenceUpdate,
        config: &GateConfig,
        actor: Option<&Identity>,
        provider: &dyn ChangesetProvider,
    ) -> Result<RefChangeOutcome> {
        validate(update, config, actor, provider, &mut PatternCache::new())
    }

    #[test]
    fn test_delete_never_fetches() {
        let provider = Recorder::new(&["fix bug"]);
        let update = ReferenceUpdate::new("refs/heads/main", OLD, ZERO);
        let outcome = validate_once(&update, &config(), None, &provider).unwrap();

        assert!(outcome.is_empty());
        assert!(provider.requests.borrow().is_empty());
    }

    #[test]
    fn test_delete_skipped_before_branch_filter() {
        let mut config = config();
        config.branches = Some("(broken".to_string());
        let update = ReferenceUpdate::new("refs/heads/main", OLD, ZERO);
        assert_eq!(skip(&update, &config).unwrap(), Some(SkipReason::Deleted));
    }

    #[test]
    fn test_branch_filter() {
        let mut config = config();
        config.branches = Some("^refs/heads/release/.*".to_string());
        let provider = Recorder::new(&["fix bug"]);

        let feature = ReferenceUpdate::new("refs/heads/feature/x", OLD, NEW);
        assert!(validate_once(&feature, &config, None, &provider).unwrap().is_empty());

        let release = ReferenceUpdate::new("refs/heads/release/1.0", OLD, NEW);
        assert_eq!(validate_once(&release, &config, None, &provider).unwrap().len(), 1);
        assert_eq!(*provider.requests.borrow(), vec!["refs/heads/release/1.0".to_string()]);
    }

    #[test]
    fn test_branch_filter_is_a_search() {
        let mut config = config();
        config.branches = Some("release".to_string());
        let update = ReferenceUpdate::new("refs/heads/release/1.0", OLD, NEW);
        assert_eq!(skip(&update, &config).unwrap(), None);
    }

    #[test]
    fn test_malformed_branch_filter() {
        let mut config = config();
        config.branches = Some("(broken".to_string());
        let update = ReferenceUpdate::new("refs/heads/main", OLD, NEW);
        let result = skip(&update, &config);
        assert!(matches!(
            result,
            Err(GateError::Config(ConfigError::InvalidPattern { .. }))
        ));
    }

    #[test]
    fn test_notes_always_skipped() {
        let update = ReferenceUpdate::new("refs/notes/commits", OLD, NEW);
        assert_eq!(skip(&update, &config()).unwrap(), Some(SkipReason::Note));
    }

    #[test]
    fn test_tags_skipped_only_when_excluded() {
        let update = ReferenceUpdate::new("refs/tags/v1.0", ZERO, NEW);
        assert_eq!(skip(&update, &config()).unwrap(), None);

        let mut config = config();
        config.exclude_tag_commits = true;
        assert_eq!(skip(&update, &config).unwrap(), Some(SkipReason::ExcludedTag));
    }

    #[test]
    fn test_changesets_in_provider_order() {
        let provider = Recorder::new(&["fix bug", "JIRA-1 ok", "another"]);
        let update = ReferenceUpdate::new("refs/heads/main", OLD, NEW);
        let outcome = validate_once(&update, &config(), None, &provider).unwrap();

        let ids: Vec<&str> = outcome.outcomes().map(|o| o.changeset.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2"]);
        let violating: Vec<bool> = outcome
            .outcomes()
            .map(|o| o.violations().next().is_some())
            .collect();
        assert_eq!(violating, vec![true, false, true]);
    }

    #[test]
    fn test_patterns_compiled_once_across_updates() {
        let mut config = config();
        config.branches = Some("^refs/heads/".to_string());
        let provider = Recorder::new(&["fix bug", "JIRA-1 ok"]);
        let mut patterns = PatternCache::new();

        for ref_id in ["refs/heads/main", "refs/heads/dev", "refs/tags/v1"] {
            let update = ReferenceUpdate::new(ref_id, OLD, NEW);
            validate(&update, &config, None, &provider, &mut patterns).unwrap();
        }
        assert_eq!(patterns.len(), 2);
    }
}
