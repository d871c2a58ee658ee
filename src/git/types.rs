// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit data handed to the validators.

use serde::Serialize;

/// A name and email pair, either a committer or the pushing actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl Identity {
    /// Create a new identity.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// One commit introduced by a reference update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChangeSet {
    /// Full commit id.
    pub id: String,
    /// Full commit message.
    pub message: String,
    /// Who committed it.
    pub committer: Identity,
    /// Number of parents, more than one for merges.
    pub parent_count: usize,
}

impl ChangeSet {
    /// Create a single-parent changeset.
    pub fn new(id: impl Into<String>, message: impl Into<String>, committer: Identity) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            committer,
            parent_count: 1,
        }
    }

    /// Set the number of parents.
    pub fn with_parent_count(mut self, parent_count: usize) -> Self {
        self.parent_count = parent_count;
        self
    }

    /// Whether this is a merge commit.
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_detection() {
        let committer = Identity::new("Ada", "ada@example.com");
        let commit = ChangeSet::new("abc", "Merge branch 'x'", committer);
        assert!(!commit.is_merge());
        assert!(commit.with_parent_count(2).is_merge());
    }

    #[test]
    fn test_identity_display() {
        let id = Identity::new("Ada Lovelace", "ada@example.com");
        assert_eq!(id.to_string(), "Ada Lovelace <ada@example.com>");
    }
}
