// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Collaborators the gate reads repository and actor data from.

use crate::error::Result;
use crate::git::{ChangeSet, Identity, ReferenceUpdate};

/// Lists the commits a reference update introduces.
pub trait ChangesetProvider {
    /// The new changesets of `update`, in the order they should be reported.
    fn list_new_changesets(&self, update: &ReferenceUpdate) -> Result<Vec<ChangeSet>>;
}

/// Resolves the authenticated actor performing the push.
pub trait ActorIdentityProvider {
    /// The pushing actor.
    fn current_identity(&self) -> Result<Identity>;
}

impl ActorIdentityProvider for Identity {
    fn current_identity(&self) -> Result<Identity> {
        Ok(self.clone())
    }
}
