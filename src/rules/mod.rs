// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule evaluation for commit messages and committer identities.
//!
//! This module holds the leaves of the validation: single rule matching,
//! rule group quantifiers and identity comparison.

pub mod group;
pub mod identity;
pub mod matcher;

pub use group::{classify, describe, evaluate, GroupOutcome, Verdict};
pub use identity::{check_email, check_name, IdentityChecker};
pub use matcher::PatternCache;
