// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The installed `pre-receive` script.

use std::path::Path;

/// File name of the hook below `hooks/`.
pub const HOOK_FILENAME: &str = "pre-receive";

/// First comment line of every script we install.
pub const HOOK_MARKER: &str = "# Pushgate Git Hook";

/// Whether `content` is a script written by [`pre_receive_script`].
pub fn is_pushgate_hook(content: &str) -> bool {
    content.lines().any(|line| line.trim() == HOOK_MARKER)
}

/// Shell script that hands the push over to `pushgate pre-receive`.
///
/// A missing binary lets the push through, like any other internal failure.
pub fn pre_receive_script(config: Option<&Path>) -> String {
    let config_arg = config
        .map(|path| format!(" --config '{}'", path.display().to_string().replace('\'', "'\\''")))
        .unwrap_or_default();

    format!(
        r#"#!/bin/sh
{marker}
# Generated by pushgate v{version}

if ! command -v pushgate >/dev/null 2>&1; then
    echo "pushgate not found in PATH, commit checks skipped" >&2
    exit 0
fi

exec pushgate{config_arg} pre-receive
"#,
        marker = HOOK_MARKER,
        version = crate::version::VERSION,
        config_arg = config_arg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_runs_pre_receive() {
        let script = pre_receive_script(None);
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("exec pushgate pre-receive"));
        assert!(is_pushgate_hook(&script));
    }

    #[test]
    fn test_script_with_config() {
        let script = pre_receive_script(Some(Path::new("/srv/git/it's.toml")));
        assert!(script.contains("exec pushgate --config '/srv/git/it'\\''s.toml' pre-receive"));
    }

    #[test]
    fn test_foreign_hook() {
        assert!(!is_pushgate_hook("#!/bin/sh\nexec other-tool\n"));
    }
}
