// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from pushgate.toml.

use serde::{Deserialize, Serialize};

/// Branch filter used when none is configured.
pub const DEFAULT_BRANCH_FILTER: &str = ".*";

/// The main configuration structure for pushgate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Header printed before every report.
    pub hook_name: String,

    /// Regex searched in the full ref id; refs that do not match are not checked.
    pub branches: Option<String>,

    /// Skip rule groups for commits with more than one parent.
    pub exclude_merge_commits: bool,

    /// Skip updates of `refs/tags/*`.
    pub exclude_tag_commits: bool,

    /// Report everything but never reject.
    pub dry_run: bool,

    /// Committer name must equal the pushing actor's name.
    pub require_matching_author_name: bool,

    /// Committer email must equal the pushing actor's email.
    pub require_matching_author_email: bool,

    /// Actors for which no checks are performed at all.
    pub skip_for_users: Vec<String>,

    /// Message templates.
    pub messages: MessagesConfig,

    /// Where the pushing actor is read from.
    pub identity: IdentityConfig,

    /// Rule groups, evaluated in declaration order.
    pub groups: Vec<Group>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            hook_name: "Pushgate Commit Checker".to_string(),
            branches: None,
            exclude_merge_commits: false,
            exclude_tag_commits: false,
            dry_run: false,
            require_matching_author_name: false,
            require_matching_author_email: false,
            skip_for_users: Vec::new(),
            messages: MessagesConfig::default(),
            identity: IdentityConfig::default(),
            groups: Vec::new(),
        }
    }
}

impl GateConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// The effective branch filter pattern.
    pub fn branch_filter(&self) -> &str {
        self.branches.as_deref().unwrap_or(DEFAULT_BRANCH_FILTER)
    }

    /// Whether any identity check needs the pushing actor.
    pub fn requires_identity(&self) -> bool {
        self.require_matching_author_name || self.require_matching_author_email
    }

    /// Whether checks should be skipped for the given actor name.
    pub fn is_skipped_user(&self, name: &str) -> bool {
        self.skip_for_users.iter().any(|user| user == name)
    }
}

/// Message templates shown to the pusher.
///
/// Every message is a handlebars template, see [`crate::report::Renderer`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MessagesConfig {
    /// Shown when the push is accepted.
    pub accept: Option<String>,

    /// Shown when the push is rejected.
    pub reject: Option<String>,

    /// Appended to the report in dry run mode.
    pub dry_run: Option<String>,

    /// Shown below a committer name mismatch.
    pub require_matching_author_name: Option<String>,

    /// Shown below a committer email mismatch.
    pub require_matching_author_email: Option<String>,
}

/// Environment variables carrying the authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Variable holding the actor's name.
    pub name_env: String,

    /// Variable holding the actor's email.
    pub email_env: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name_env: "PUSHGATE_USER_NAME".to_string(),
            email_env: "PUSHGATE_USER_EMAIL".to_string(),
        }
    }
}

/// What a satisfied quantifier means for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptMode {
    /// The quantifier must hold, otherwise the push is rejected.
    Accept,
    /// Holding quantifiers are reported, never blocking.
    ShowMessage,
}

impl AcceptMode {
    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptMode::Accept => "accept",
            AcceptMode::ShowMessage => "show_message",
        }
    }
}

impl std::fmt::Display for AcceptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quantifier over the rules of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every rule matches.
    All,
    /// At least one rule matches.
    One,
    /// No rule matches.
    None,
}

impl MatchMode {
    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::All => "all",
            MatchMode::One => "one",
            MatchMode::None => "none",
        }
    }

    /// Whether the quantifier holds for `matched` out of `total` rules.
    pub fn is_satisfied(&self, matched: usize, total: usize) -> bool {
        match self {
            MatchMode::All => matched == total,
            MatchMode::One => matched >= 1,
            MatchMode::None => matched == 0,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named set of rules with a quantifier and an accept mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Optional display name; groups are identified by position.
    #[serde(default)]
    pub name: Option<String>,

    /// Meaning of a satisfied quantifier.
    pub accept: AcceptMode,

    /// The quantifier.
    #[serde(rename = "match")]
    pub matching: MatchMode,

    /// Message shown when the group produces an outcome.
    #[serde(default)]
    pub message: Option<String>,

    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Group {
    /// Create a group without rules.
    pub fn new(accept: AcceptMode, matching: MatchMode) -> Self {
        Self {
            name: None,
            accept,
            matching,
            message: None,
            rules: Vec::new(),
        }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the group message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A regular expression searched in the commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The regex.
    pub pattern: String,

    /// Advisory message printed for this rule.
    #[serde(default)]
    pub message: Option<String>,
}

impl Rule {
    /// Create a rule without a message.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: None,
        }
    }

    /// Set the rule message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
