// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::GateConfig;
use crate::error::{Result, ResultExt};

/// Get the default configuration.
pub fn default_config() -> GateConfig {
    GateConfig::default()
}

/// The default configuration as TOML, without any rule group.
pub fn minimal_config() -> Result<String> {
    let body = toml::to_string_pretty(&default_config()).context("Failed to serialize configuration")?;
    Ok(format!("# Pushgate Configuration File\n\n{}", body))
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# Pushgate Configuration File
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Header printed above every report
hook_name = "Pushgate Commit Checker"

# Only refs whose full name matches this regex are checked
branches = "^refs/heads/(main|release/.*)$"

exclude_merge_commits = true
exclude_tag_commits = true

# Report everything, reject nothing
dry_run = false

# Committer must be the pushing user
require_matching_author_name = false
require_matching_author_email = true

# Users that bypass all checks
skip_for_users = ["release-bot"]

# Messages are handlebars templates. Available variables:
# user_name, user_email, committer_name, committer_email,
# changeset_id, ref_id, pattern, hook_name
[messages]
accept = "Thanks {{user_name}}, all commits look good."
reject = "Push rejected, see the commits listed below."
dry_run = "Dry run: nothing was rejected."
require_matching_author_email = "Commit as {{user_email}} (git config user.email)."

# Where the pushing user is read from
[identity]
name_env = "PUSHGATE_USER_NAME"
email_env = "PUSHGATE_USER_EMAIL"

# Every commit must reference a ticket
[[groups]]
name = "ticket"
accept = "accept"
match = "one"
message = "Reference a ticket in the commit message."

[[groups.rules]]
pattern = "^[A-Z]+-\\d+"
message = "Start the subject with a ticket key, like JIRA-42."

[[groups.rules]]
pattern = "^Merge "

# Work in progress must not land
[[groups]]
name = "no-wip"
accept = "accept"
match = "none"
message = "Squash work-in-progress commits before pushing."

[[groups.rules]]
pattern = "(?i)\\bwip\\b"

[[groups.rules]]
pattern = "^fixup!"

# Friendly reminder, never blocking
[[groups]]
name = "changelog-hint"
accept = "show_message"
match = "one"
message = "Remember to update the changelog for {{ref_id}}."

[[groups.rules]]
pattern = "(?i)breaking"
"#
}
