// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit validation engine.
//!
//! [`CommitGate`] walks every reference update of a push, lets
//! [`refchange`] filter and expand it into changesets, validates each one in
//! [`changeset`] and collects everything into a [`VerificationResult`].

pub mod changeset;
mod gate;
pub mod refchange;
mod result;
mod traits;

pub use gate::{CommitGate, Decision};
pub use refchange::SkipReason;
pub use result::{ChangeSetOutcome, RefChangeOutcome, VerificationResult};
pub use traits::{ActorIdentityProvider, ChangesetProvider};
