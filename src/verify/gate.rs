// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The commit gate: validates a whole push and decides on it.

use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::git::ReferenceUpdate;
use crate::rules::PatternCache;
use serde::Serialize;

use super::refchange;
use super::result::VerificationResult;
use super::traits::{ActorIdentityProvider, ChangesetProvider};

/// Final verdict on a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// The push goes through. In dry run mode the result may still contain violations.
    Allow {
        result: VerificationResult,
        dry_run: bool,
    },
    /// At least one `accept` group was violated.
    Reject { result: VerificationResult },
    /// Validation failed internally; the push goes through.
    FailOpen { diagnostic: String },
}

impl Decision {
    /// Allow everything because validation could not complete.
    pub fn fail_open(error: &GateError) -> Self {
        let diagnostic = format!(
            "Error while validating reference changes. Will allow all of them. \"{}\"",
            error
        );
        tracing::error!("{}", diagnostic);
        Decision::FailOpen { diagnostic }
    }

    /// Whether the push may proceed.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Decision::Reject { .. })
    }

    /// The verification tree, unless validation failed.
    pub fn result(&self) -> Option<&VerificationResult> {
        match self {
            Decision::Allow { result, .. } | Decision::Reject { result } => Some(result),
            Decision::FailOpen { .. } => None,
        }
    }

    /// The failure message of a fail-open decision.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Decision::FailOpen { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }

    /// Short name for logs and machine output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow { .. } => "allow",
            Decision::Reject { .. } => "reject",
            Decision::FailOpen { .. } => "fail_open",
        }
    }
}

/// Validates reference updates against the configured rule groups.
pub struct CommitGate<'a> {
    config: &'a GateConfig,
    changesets: &'a dyn ChangesetProvider,
    actor: &'a dyn ActorIdentityProvider,
}

impl<'a> CommitGate<'a> {
    /// Create a gate from settings and its collaborators.
    pub fn new(
        config: &'a GateConfig,
        changesets: &'a dyn ChangesetProvider,
        actor: &'a dyn ActorIdentityProvider,
    ) -> Self {
        Self {
            config,
            changesets,
            actor,
        }
    }

    /// Build the verification tree for `updates`.
    ///
    /// The actor is only resolved when an identity check is enabled.
    pub fn verify(&self, updates: &[ReferenceUpdate]) -> Result<VerificationResult> {
        let actor = if self.config.requires_identity() {
            Some(self.actor.current_identity()?)
        } else {
            None
        };

        let mut patterns = PatternCache::new();
        let mut result = VerificationResult::new();
        for update in updates {
            tracing::debug!(
                "Reference update {} {} -> {} ({:?})",
                update.ref_id,
                update.from_hash,
                update.to_hash,
                update.change_type
            );
            result.add(refchange::validate(
                update,
                self.config,
                actor.as_ref(),
                self.changesets,
                &mut patterns,
            )?);
        }

        Ok(result)
    }

    /// Validate `updates` and decide.
    ///
    /// Never fails: any error during validation allows the push and carries
    /// the error as diagnostic.
    pub fn run(&self, updates: &[ReferenceUpdate]) -> Decision {
        let result = match self.verify(updates) {
            Ok(result) => result,
            Err(e) => return Decision::fail_open(&e),
        };

        let decision = if self.config.dry_run {
            Decision::Allow {
                result,
                dry_run: true,
            }
        } else if result.is_accepted() {
            Decision::Allow {
                result,
                dry_run: false,
            }
        } else {
            Decision::Reject { result }
        };

        tracing::info!("Decision for {} update(s): {}", updates.len(), decision.as_str());
        decision
    }
}
