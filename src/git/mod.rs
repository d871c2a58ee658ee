// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! This module provides the reference updates a push consists of and the
//! libgit2-backed lookup of the commits each update introduces.

pub mod refs;
mod repo;
mod types;

pub use refs::{is_null_oid, read_updates, ChangeType, ReferenceUpdate};
pub use repo::{ChangesetScope, Repository};
pub use types::{ChangeSet, Identity};
