// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Evaluation of a rule group against a commit message.
//!
//! A group is a quantifier over its rules. The accept mode decides what a
//! satisfied quantifier means:
//!
//! | accept         | satisfied | outcome        |
//! |----------------|-----------|----------------|
//! | `show_message` | yes       | informational  |
//! | `show_message` | no        | none           |
//! | `accept`       | yes       | none           |
//! | `accept`       | no        | violation      |

use crate::config::{AcceptMode, Group, MatchMode, Rule};
use crate::error::Result;
use serde::Serialize;

use super::matcher::PatternCache;

/// Kind of a produced group outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Reported, never blocks.
    Informational,
    /// Blocks the push.
    Violation,
}

/// Decide whether a group reports anything.
pub fn classify(accept: AcceptMode, satisfied: bool) -> Option<Verdict> {
    match (accept, satisfied) {
        (AcceptMode::ShowMessage, true) => Some(Verdict::Informational),
        (AcceptMode::Accept, false) => Some(Verdict::Violation),
        (AcceptMode::ShowMessage, false) | (AcceptMode::Accept, true) => None,
    }
}

/// What a produced outcome says about the message.
pub fn describe(accept: AcceptMode, matching: MatchMode) -> &'static str {
    match (accept, matching) {
        (AcceptMode::ShowMessage, MatchMode::All) => "all rules matched",
        (AcceptMode::ShowMessage, MatchMode::None) => "no rule matched",
        (AcceptMode::ShowMessage, MatchMode::One) => "at least one rule matched",
        (AcceptMode::Accept, MatchMode::All) => "not all rules matched",
        (AcceptMode::Accept, MatchMode::None) => "a forbidden rule matched",
        (AcceptMode::Accept, MatchMode::One) => "no required rule matched",
    }
}

/// A reportable result of one group for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    /// Position of the group in the configuration.
    pub group_index: usize,
    /// The evaluated group.
    pub group: Group,
    /// The group's quantifier.
    pub matching: MatchMode,
    /// Rules that matched, in rule order.
    pub matching_rules: Vec<Rule>,
}

impl GroupOutcome {
    /// Whether this outcome blocks the push.
    pub fn is_violation(&self) -> bool {
        self.verdict() == Verdict::Violation
    }

    /// Informational or violation, derived from the accept mode.
    pub fn verdict(&self) -> Verdict {
        match self.group.accept {
            AcceptMode::Accept => Verdict::Violation,
            AcceptMode::ShowMessage => Verdict::Informational,
        }
    }

    /// Human-readable meaning of the outcome.
    pub fn description(&self) -> &'static str {
        describe(self.group.accept, self.matching)
    }
}

/// Evaluate `group` (at position `group_index`) against `message`.
///
/// Returns `None` when the group has nothing to report.
pub fn evaluate(
    group_index: usize,
    group: &Group,
    message: &str,
    patterns: &mut PatternCache,
) -> Result<Option<GroupOutcome>> {
    let mut matching_rules = Vec::new();
    for rule in &group.rules {
        if patterns.matches(rule, message)? {
            matching_rules.push(rule.clone());
        }
    }

    let satisfied = group
        .matching
        .is_satisfied(matching_rules.len(), group.rules.len());

    Ok(classify(group.accept, satisfied).map(|_| GroupOutcome {
        group_index,
        group: group.clone(),
        matching: group.matching,
        matching_rules,
    }))
}
