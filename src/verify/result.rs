// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The verification tree: ref update → changeset → group outcomes.
//!
//! Children are built bottom-up and only attached when they carry anything.
//! The tree is read-only once the gate hands it out.

use crate::config::AcceptMode;
use crate::git::{ChangeSet, ReferenceUpdate};
use crate::rules::GroupOutcome;
use indexmap::IndexMap;
use serde::Serialize;

/// Result of validating one changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSetOutcome {
    /// The validated changeset.
    pub changeset: ChangeSet,
    /// Produced group outcomes, one per group at most, in group order.
    pub group_outcomes: Vec<GroupOutcome>,
    /// Committer email check (true when disabled).
    pub email_matched: bool,
    /// Committer name check (true when disabled).
    pub name_matched: bool,
}

impl ChangeSetOutcome {
    /// Whether anything about this changeset should be shown.
    pub fn has_reportables(&self) -> bool {
        !self.group_outcomes.is_empty() || !self.email_matched || !self.name_matched
    }

    /// Outcomes of `accept` groups, which reject the push.
    pub fn violations(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.group_outcomes
            .iter()
            .filter(|outcome| outcome.group.accept == AcceptMode::Accept)
    }
}

/// Result of validating one reference update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefChangeOutcome {
    /// The validated update.
    pub ref_change: ReferenceUpdate,
    /// Outcomes keyed by changeset id, in processing order.
    pub changesets: IndexMap<String, ChangeSetOutcome>,
}

impl RefChangeOutcome {
    /// Create an outcome without changesets.
    pub fn new(ref_change: ReferenceUpdate) -> Self {
        Self {
            ref_change,
            changesets: IndexMap::new(),
        }
    }

    /// Attach the outcome of one changeset.
    pub fn insert(&mut self, outcome: ChangeSetOutcome) {
        self.changesets.insert(outcome.changeset.id.clone(), outcome);
    }

    /// Whether no changeset was validated at all.
    pub fn is_empty(&self) -> bool {
        self.changesets.is_empty()
    }

    /// Number of validated changesets.
    pub fn len(&self) -> usize {
        self.changesets.len()
    }

    /// Whether any changeset has something to show.
    pub fn has_reportables(&self) -> bool {
        self.changesets.values().any(ChangeSetOutcome::has_reportables)
    }

    /// Changeset outcomes in processing order.
    pub fn outcomes(&self) -> impl Iterator<Item = &ChangeSetOutcome> {
        self.changesets.values()
    }
}

/// Root of the tree for one push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    ref_changes: Vec<RefChangeOutcome>,
}

impl VerificationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a ref outcome; empty outcomes are dropped.
    pub fn add(&mut self, outcome: RefChangeOutcome) {
        if !outcome.is_empty() {
            self.ref_changes.push(outcome);
        }
    }

    /// Ref outcomes in input order.
    pub fn ref_changes(&self) -> &[RefChangeOutcome] {
        &self.ref_changes
    }

    /// Whether no ref update contributed anything.
    pub fn is_empty(&self) -> bool {
        self.ref_changes.is_empty()
    }

    /// True unless some `accept` group produced an outcome.
    ///
    /// Informational outcomes and identity mismatches never reject.
    pub fn is_accepted(&self) -> bool {
        self.violation_count() == 0
    }

    /// Number of blocking group outcomes in the whole tree.
    pub fn violation_count(&self) -> usize {
        self.ref_changes
            .iter()
            .flat_map(RefChangeOutcome::outcomes)
            .map(|outcome| outcome.violations().count())
            .sum()
    }

    /// Whether any ref update has something to show.
    pub fn has_reportables(&self) -> bool {
        self.ref_changes.iter().any(RefChangeOutcome::has_reportables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Group, MatchMode};
    use crate::git::Identity;

    const OLD: &str = "1111111111111111111111111111111111111111";
    const NEW: &str = "2222222222222222222222222222222222222222";

    fn changeset(id: &str) -> ChangeSet {
        ChangeSet::new(id, "message", Identity::new("Ada", "ada@example.com"))
    }

    fn outcome(accept: AcceptMode) -> GroupOutcome {
        GroupOutcome {
            group_index: 0,
            group: Group::new(accept, MatchMode::One),
            matching: MatchMode::One,
            matching_rules: Vec::new(),
        }
    }

    fn changeset_outcome(id: &str, groups: Vec<GroupOutcome>, identity_ok: bool) -> ChangeSetOutcome {
        ChangeSetOutcome {
            changeset: changeset(id),
            group_outcomes: groups,
            email_matched: identity_ok,
            name_matched: true,
        }
    }

    fn ref_outcome(outcomes: Vec<ChangeSetOutcome>) -> RefChangeOutcome {
        let mut ref_outcome = RefChangeOutcome::new(ReferenceUpdate::new("refs/heads/main", OLD, NEW));
        for outcome in outcomes {
            ref_outcome.insert(outcome);
        }
        ref_outcome
    }

    #[test]
    fn test_changeset_reportables() {
        assert!(!changeset_outcome("a", vec![], true).has_reportables());
        assert!(changeset_outcome("a", vec![], false).has_reportables());
        assert!(changeset_outcome("a", vec![outcome(AcceptMode::ShowMessage)], true).has_reportables());
    }

    #[test]
    fn test_empty_ref_outcome_is_dropped() {
        let mut result = VerificationResult::new();
        result.add(ref_outcome(vec![]));
        assert!(result.is_empty());
        assert!(result.is_accepted());
    }

    #[test]
    fn test_ref_outcome_without_reportables_is_kept() {
        let mut result = VerificationResult::new();
        let quiet = ref_outcome(vec![changeset_outcome("a", vec![], true)]);
        assert!(!quiet.is_empty());
        assert!(!quiet.has_reportables());
        result.add(quiet);
        assert_eq!(result.ref_changes().len(), 1);
        assert!(!result.has_reportables());
    }

    #[test]
    fn test_advisory_outcomes_are_accepted() {
        let mut result = VerificationResult::new();
        result.add(ref_outcome(vec![
            changeset_outcome("a", vec![outcome(AcceptMode::ShowMessage)], false),
            changeset_outcome("b", vec![outcome(AcceptMode::ShowMessage)], true),
        ]));
        assert!(result.has_reportables());
        assert!(result.is_accepted());
    }

    #[test]
    fn test_single_violation_rejects() {
        let mut result = VerificationResult::new();
        result.add(ref_outcome(vec![changeset_outcome("a", vec![], true)]));
        result.add(ref_outcome(vec![
            changeset_outcome("b", vec![outcome(AcceptMode::ShowMessage)], true),
            changeset_outcome("c", vec![outcome(AcceptMode::Accept)], true),
        ]));
        assert!(!result.is_accepted());
        assert_eq!(result.violation_count(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let outcome = ref_outcome(vec![
            changeset_outcome("c", vec![], true),
            changeset_outcome("a", vec![], true),
            changeset_outcome("b", vec![], true),
        ]);
        let ids: Vec<&str> = outcome.outcomes().map(|o| o.changeset.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(outcome.len(), 3);
    }
}
