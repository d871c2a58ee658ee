// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Reference updates as received by a `pre-receive` hook.
//!
//! git feeds the hook one line per updated ref on stdin:
//!
//! ```text
//! <old-oid> <new-oid> <refname>
//! ```
//!
//! An all-zero old id creates the ref, an all-zero new id deletes it.

use crate::error::{GitError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::io::BufRead;

lazy_static! {
    /// SHA-1 or SHA-256 hex object ids followed by a ref name.
    static ref REF_LINE_REGEX: Regex =
        Regex::new(r"^([0-9a-f]{40}|[0-9a-f]{64}) ([0-9a-f]{40}|[0-9a-f]{64}) (\S+)$").unwrap();
}

const TAG_PREFIX: &str = "refs/tags/";
const NOTE_PREFIX: &str = "refs/notes/";

/// Kind of movement of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// The ref is created.
    Add,
    /// The ref moves from one commit to another.
    Update,
    /// The ref is removed.
    Delete,
}

/// A requested move of a single ref.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReferenceUpdate {
    /// Full ref name, e.g. `refs/heads/main`.
    pub ref_id: String,
    /// Object id before the update.
    pub from_hash: String,
    /// Object id after the update.
    pub to_hash: String,
    /// Derived from the two ids.
    pub change_type: ChangeType,
}

impl ReferenceUpdate {
    /// Create an update, deriving the change type from null ids.
    pub fn new(
        ref_id: impl Into<String>,
        from_hash: impl Into<String>,
        to_hash: impl Into<String>,
    ) -> Self {
        let from_hash = from_hash.into();
        let to_hash = to_hash.into();
        let change_type = if is_null_oid(&from_hash) {
            ChangeType::Add
        } else if is_null_oid(&to_hash) {
            ChangeType::Delete
        } else {
            ChangeType::Update
        };

        Self {
            ref_id: ref_id.into(),
            from_hash,
            to_hash,
            change_type,
        }
    }

    /// Parse one `<old> <new> <ref>` line.
    pub fn parse_line(line: &str) -> Result<Self> {
        let captures = REF_LINE_REGEX.captures(line.trim()).ok_or_else(|| {
            GitError::InvalidRefLine {
                line: line.to_string(),
            }
        })?;

        Ok(Self::new(&captures[3], &captures[1], &captures[2]))
    }

    /// Whether this update targets a tag.
    pub fn is_tag(&self) -> bool {
        self.ref_id.starts_with(TAG_PREFIX)
    }

    /// Whether this update targets a git note.
    pub fn is_note(&self) -> bool {
        self.ref_id.starts_with(NOTE_PREFIX)
    }

    /// Abbreviated old id for display.
    pub fn short_from(&self) -> &str {
        abbreviate(&self.from_hash)
    }

    /// Abbreviated new id for display.
    pub fn short_to(&self) -> &str {
        abbreviate(&self.to_hash)
    }
}

/// Whether an object id consists only of zeros.
pub fn is_null_oid(oid: &str) -> bool {
    !oid.is_empty() && oid.bytes().all(|b| b == b'0')
}

fn abbreviate(oid: &str) -> &str {
    &oid[..10.min(oid.len())]
}

/// Read all updates from hook input, skipping blank lines.
pub fn read_updates(reader: impl BufRead) -> Result<Vec<ReferenceUpdate>> {
    let mut updates = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        updates.push(ReferenceUpdate::parse_line(&line)?);
    }
    Ok(updates)
}
