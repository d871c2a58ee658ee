// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Committer versus pushing actor checks.

use crate::config::GateConfig;
use crate::git::Identity;

/// Exact, case-sensitive name comparison.
pub fn check_name(expected: &str, committer: &str) -> bool {
    expected == committer
}

/// Exact, case-sensitive email comparison.
pub fn check_email(expected: &str, committer: &str) -> bool {
    expected == committer
}

/// Identity checks bound to the configured switches and the pushing actor.
///
/// A disabled switch always reports a match.
#[derive(Debug, Clone, Copy)]
pub struct IdentityChecker<'a> {
    require_name: bool,
    require_email: bool,
    actor: Option<&'a Identity>,
}

impl<'a> IdentityChecker<'a> {
    /// Create a checker for `actor` using the switches of `config`.
    pub fn new(config: &GateConfig, actor: Option<&'a Identity>) -> Self {
        Self {
            require_name: config.require_matching_author_name,
            require_email: config.require_matching_author_email,
            actor,
        }
    }

    /// Whether the committer name is acceptable.
    pub fn name_matches(&self, committer: &Identity) -> bool {
        if !self.require_name {
            return true;
        }
        self.actor
            .is_some_and(|actor| check_name(&actor.name, &committer.name))
    }

    /// Whether the committer email is acceptable.
    pub fn email_matches(&self, committer: &Identity) -> bool {
        if !self.require_email {
            return true;
        }
        self.actor
            .is_some_and(|actor| check_email(&actor.email, &committer.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: bool, email: bool) -> GateConfig {
        GateConfig {
            require_matching_author_name: name,
            require_matching_author_email: email,
            ..GateConfig::default()
        }
    }

    #[test]
    fn test_exact_comparison() {
        assert!(check_name("Ada", "Ada"));
        assert!(!check_name("Ada", "ada"));
        assert!(!check_email("ada@example.com", "ADA@example.com"));
    }

    #[test]
    fn test_disabled_checks_always_match() {
        let actor = Identity::new("Ada", "ada@example.com");
        let committer = Identity::new("Bob", "bob@example.com");
        let checker = IdentityChecker::new(&config(false, false), Some(&actor));
        assert!(checker.name_matches(&committer));
        assert!(checker.email_matches(&committer));

        let no_actor = IdentityChecker::new(&config(false, false), None);
        assert!(no_actor.name_matches(&committer));
    }

    #[test]
    fn test_enabled_checks_compare() {
        let actor = Identity::new("Ada", "ada@example.com");
        let checker = IdentityChecker::new(&config(true, true), Some(&actor));

        assert!(checker.name_matches(&Identity::new("Ada", "other@example.com")));
        assert!(!checker.email_matches(&Identity::new("Ada", "other@example.com")));
        assert!(!checker.name_matches(&Identity::new("Bob", "ada@example.com")));
        assert!(checker.email_matches(&Identity::new("Bob", "ada@example.com")));
    }

    #[test]
    fn test_enabled_without_actor_never_matches() {
        let checker = IdentityChecker::new(&config(true, false), None);
        assert!(!checker.name_matches(&Identity::new("Ada", "ada@example.com")));
    }
}
