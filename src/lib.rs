// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pushgate - commit acceptance gate for git pushes
//!
//! Runs as a `pre-receive` hook and checks every commit a push introduces
//! against configurable rule groups.
//!
//! # Features
//!
//! - **Rule Groups**: Regex rules combined with `all`, `one` or `none`
//!   quantifiers, either blocking or informational
//! - **Identity Checks**: Committer name and email compared with the pushing user
//! - **Dry Run**: Full reports without ever rejecting
//! - **Fail Open**: Internal errors never block a push
//! - **Hook Management**: Installs the `pre-receive` script into bare repositories
//!
//! # Example
//!
//! ```no_run
//! use pushgate::config::GateConfig;
//! use pushgate::git::{Identity, ReferenceUpdate, Repository};
//! use pushgate::verify::CommitGate;
//!
//! let config = GateConfig::load().unwrap();
//! let repo = Repository::open_from_env().unwrap();
//! let actor = Identity::new("Ada", "ada@example.com");
//!
//! let updates = vec![ReferenceUpdate::new(
//!     "refs/heads/main",
//!     "0000000000000000000000000000000000000000",
//!     "1111111111111111111111111111111111111111",
//! )];
//! let decision = CommitGate::new(&config, &repo, &actor).run(&updates);
//! println!("{}", decision.as_str());
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod report;
pub mod rules;
pub mod verify;

// Re-exports for convenience
pub use config::GateConfig;
pub use error::{GateError, Result};
pub use verify::{CommitGate, Decision};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of pushgate.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
