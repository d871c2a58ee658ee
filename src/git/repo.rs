// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository access backed by libgit2.

use crate::error::{GateError, GitError, Result};
use crate::verify::ChangesetProvider;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

use super::refs::{is_null_oid, ReferenceUpdate};
use super::types::{ChangeSet, Identity};

/// Which commits of an update count as new.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangesetScope {
    /// Commits no existing ref reaches yet, as seen by `pre-receive`.
    #[default]
    NewToRepository,
    /// Every commit between the old and the new tip, even if already on a ref.
    SinceBase,
}

/// Wrapper around git2::Repository that lists the commits a push introduces.
pub struct Repository {
    inner: Git2Repo,
    scope: ChangesetScope,
}

impl Repository {
    /// Open the repository a hook is running for.
    ///
    /// Honors `GIT_DIR` and the quarantine object directories git exports to
    /// `pre-receive`, so objects that are not yet accepted are visible.
    pub fn open_from_env() -> Result<Self> {
        let inner = Git2Repo::open_from_env().map_err(open_error)?;
        Ok(Self {
            inner,
            scope: ChangesetScope::default(),
        })
    }

    /// Open a repository from a path (bare or not).
    pub fn open(path: &Path) -> Result<Self> {
        let inner = Git2Repo::discover(path).map_err(open_error)?;
        Ok(Self {
            inner,
            scope: ChangesetScope::default(),
        })
    }

    /// Set which commits count as new.
    pub fn with_scope(mut self, scope: ChangesetScope) -> Self {
        self.scope = scope;
        self
    }

    /// Get the git directory path.
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Commits reachable from the new tip, oldest first.
    ///
    /// With [`ChangesetScope::NewToRepository`] this is
    /// `git rev-list --topo-order --reverse <to> --not <from> --all`; with
    /// [`ChangesetScope::SinceBase`] the `--all` exclusion is dropped.
    pub fn new_changesets(&self, update: &ReferenceUpdate) -> Result<Vec<ChangeSet>> {
        if is_null_oid(&update.to_hash) {
            return Ok(Vec::new());
        }

        let list_failed = |e: git2::Error| {
            GateError::Git(GitError::ListFailed {
                reference: update.ref_id.clone(),
                message: e.message().to_string(),
            })
        };

        let to = parse_oid(&update.to_hash)?;
        let tip = self
            .inner
            .find_object(to, None)
            .and_then(|object| object.peel_to_commit())
            .map_err(list_failed)?;

        let mut revwalk = self.inner.revwalk().map_err(list_failed)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .map_err(list_failed)?;
        revwalk.push(tip.id()).map_err(list_failed)?;

        if !is_null_oid(&update.from_hash) {
            let from = parse_oid(&update.from_hash)?;
            let base = self
                .inner
                .find_object(from, None)
                .and_then(|object| object.peel_to_commit())
                .map_err(list_failed)?;
            revwalk.hide(base.id()).map_err(list_failed)?;
        }

        if self.scope == ChangesetScope::NewToRepository {
            for reference in self.inner.references().map_err(list_failed)? {
                let reference = reference.map_err(list_failed)?;
                // Refs to trees or blobs cannot hide commits.
                if let Ok(commit) = reference.peel_to_commit() {
                    revwalk.hide(commit.id()).map_err(list_failed)?;
                }
            }
        }

        let mut changesets = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(list_failed)?;
            let commit = self.inner.find_commit(oid).map_err(list_failed)?;
            changesets.push(to_changeset(&commit));
        }

        tracing::debug!(
            "{} introduces {} changeset(s)",
            update.ref_id,
            changesets.len()
        );

        Ok(changesets)
    }
}

impl ChangesetProvider for Repository {
    fn list_new_changesets(&self, update: &ReferenceUpdate) -> Result<Vec<ChangeSet>> {
        self.new_changesets(update)
    }
}

fn open_error(e: git2::Error) -> GateError {
    if e.code() == git2::ErrorCode::NotFound {
        GateError::Git(GitError::NotARepository)
    } else {
        GateError::Git(GitError::OpenFailed {
            message: e.message().to_string(),
        })
    }
}

fn parse_oid(hex: &str) -> Result<Oid> {
    Oid::from_str(hex).map_err(|_| {
        GateError::Git(GitError::InvalidObjectId {
            oid: hex.to_string(),
        })
    })
}

fn to_changeset(commit: &git2::Commit<'_>) -> ChangeSet {
    let committer = commit.committer();
    ChangeSet {
        id: commit.id().to_string(),
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
        committer: Identity::new(
            String::from_utf8_lossy(committer.name_bytes()),
            String::from_utf8_lossy(committer.email_bytes()),
        ),
        parent_count: commit.parent_count(),
    }
}
