// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The `pre-receive` entry point.
//!
//! Everything that can go wrong here allows the push: an unreadable
//! configuration, garbage on stdin, a repository that cannot be opened or a
//! report that cannot be rendered all end in a fail-open decision.

use crate::config::{self, GateConfig};
use crate::error::Result;
use crate::git::{self, ChangesetScope, ReferenceUpdate, Repository};
use crate::report::{OutputFormat, ReportPrinter};
use crate::verify::{ActorIdentityProvider, CommitGate, Decision};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::identity::EnvIdentity;

/// Exit code that lets git accept the push.
pub const EXIT_ALLOW: i32 = 0;

/// Exit code that makes git reject the push.
pub const EXIT_REJECT: i32 = 1;

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ReceiveOptions {
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
    /// Repository to inspect instead of the one in the hook environment.
    pub repo: Option<PathBuf>,
    /// Force dry run regardless of the configuration.
    pub dry_run: bool,
    /// Report format.
    pub format: OutputFormat,
    /// Actor name override.
    pub user_name: Option<String>,
    /// Actor email override.
    pub user_email: Option<String>,
    /// Which commits of each update are validated.
    pub scope: ChangesetScope,
}

impl ReceiveOptions {
    /// Load the configuration these options point at.
    pub fn load_config(&self) -> Result<GateConfig> {
        let mut config = match (&self.config_path, &self.repo) {
            (Some(path), _) => config::load_config_from(path)?,
            (None, Some(repo)) => match config::find_config_file_from(repo) {
                Some(path) => config::load_config_from(&path)?,
                None => config::load_config()?,
            },
            (None, None) => config::load_config()?,
        };

        if self.dry_run {
            config.dry_run = true;
        }
        Ok(config)
    }

    fn open_repository(&self) -> Result<Repository> {
        let repo = match &self.repo {
            Some(path) => Repository::open(path)?,
            None => Repository::open_from_env()?,
        };
        Ok(repo.with_scope(self.scope))
    }
}

/// Validate the updates git writes to stdin and print the report to `out`.
///
/// Returns the process exit code.
pub fn run_pre_receive(options: &ReceiveOptions, input: impl BufRead, out: &mut dyn Write) -> i32 {
    match git::read_updates(input) {
        Ok(updates) => run_updates(options, &updates, out),
        Err(e) => finish(options, &GateConfig::default(), None, Decision::fail_open(&e), out),
    }
}

/// Validate `updates` and print the report to `out`.
///
/// Returns the process exit code.
pub fn run_updates(options: &ReceiveOptions, updates: &[ReferenceUpdate], out: &mut dyn Write) -> i32 {
    let config = match options.load_config() {
        Ok(config) => config,
        Err(e) => {
            let decision = Decision::fail_open(&e);
            return finish(options, &GateConfig::default(), None, decision, out);
        }
    };

    let identity = EnvIdentity::new(&config.identity)
        .with_overrides(options.user_name.clone(), options.user_email.clone());

    if let Ok(name) = identity.name() {
        if config.is_skipped_user(&name) {
            tracing::info!("Skipping checks for {}", name);
            return EXIT_ALLOW;
        }
    }

    let repo = match options.open_repository() {
        Ok(repo) => repo,
        Err(e) => return finish(options, &config, None, Decision::fail_open(&e), out),
    };

    let decision = CommitGate::new(&config, &repo, &identity).run(updates);
    let actor = if config.requires_identity() {
        identity.current_identity().ok()
    } else {
        None
    };

    finish(options, &config, actor.as_ref(), decision, out)
}

fn finish(
    options: &ReceiveOptions,
    config: &GateConfig,
    actor: Option<&git::Identity>,
    decision: Decision,
    out: &mut dyn Write,
) -> i32 {
    let printer = ReportPrinter::new(config, actor);
    let (decision, report) = match printer.format(&decision, options.format) {
        Ok(report) => (decision, report),
        Err(e) => {
            let decision = Decision::fail_open(&e);
            let report = printer
                .format(&decision, options.format)
                .unwrap_or_else(|_| decision.diagnostic().unwrap_or_default().to_string());
            (decision, report)
        }
    };

    if let Err(e) = write!(out, "{}", report).and_then(|_| out.flush()) {
        tracing::warn!("Failed to write report: {}", e);
    }

    if decision.is_allowed() {
        EXIT_ALLOW
    } else {
        EXIT_REJECT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const ZERO: &str = "0000000000000000000000000000000000000000";

    const CONFIG: &str = r#"
hook_name = "Gate"

[messages]
reject = "Push rejected"

[[groups]]
accept = "accept"
match = "one"
message = "Reference a ticket"

[[groups.rules]]
pattern = "^JIRA-\\d+"
"#;

    fn repo_with_commit(message: &str) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let sig = Signature::now("Ada", "ada@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(None, &sig, &sig, message, &tree, &[])
            .unwrap();
        fs::write(dir.path().join("pushgate.toml"), CONFIG).unwrap();
        (dir, oid.to_string())
    }

    fn options(repo: &Path) -> ReceiveOptions {
        ReceiveOptions {
            config_path: Some(repo.join("pushgate.toml")),
            repo: Some(repo.to_path_buf()),
            ..ReceiveOptions::default()
        }
    }

    fn run(options: &ReceiveOptions, stdin: &str) -> (i32, String) {
        console::set_colors_enabled_stderr(false);
        let mut out = Vec::new();
        let code = run_pre_receive(options, stdin.as_bytes(), &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rejects_violating_push() {
        let (dir, oid) = repo_with_commit("fix bug");
        let (code, report) = run(
            &options(dir.path()),
            &format!("{} {} refs/heads/main\n", ZERO, oid),
        );

        assert_eq!(code, EXIT_REJECT);
        assert!(report.contains("Push rejected"));
        assert!(report.contains(">>> fix bug"));
        assert!(report.contains("Reference a ticket"));
    }

    #[test]
    fn test_accepts_matching_push() {
        let (dir, oid) = repo_with_commit("JIRA-7 fix bug");
        let (code, report) = run(
            &options(dir.path()),
            &format!("{} {} refs/heads/main\n", ZERO, oid),
        );

        assert_eq!(code, EXIT_ALLOW);
        assert!(!report.contains(">>>"));
    }

    #[test]
    fn test_dry_run_allows() {
        let (dir, oid) = repo_with_commit("fix bug");
        let mut options = options(dir.path());
        options.dry_run = true;

        let (code, report) = run(&options, &format!("{} {} refs/heads/main\n", ZERO, oid));
        assert_eq!(code, EXIT_ALLOW);
        assert!(report.contains(">>> fix bug"));
    }

    #[test]
    fn test_garbage_input_fails_open() {
        let (dir, _) = repo_with_commit("fix bug");
        let (code, report) = run(&options(dir.path()), "not a ref line\n");
        assert_eq!(code, EXIT_ALLOW);
        assert!(report.contains("Will allow all of them"));
    }

    #[test]
    fn test_broken_config_fails_open() {
        let (dir, oid) = repo_with_commit("fix bug");
        fs::write(dir.path().join("pushgate.toml"), "groups = 3").unwrap();

        let (code, report) = run(
            &options(dir.path()),
            &format!("{} {} refs/heads/main\n", ZERO, oid),
        );
        assert_eq!(code, EXIT_ALLOW);
        assert!(report.contains("Will allow all of them"));
    }

    #[test]
    fn test_skipped_user() {
        let (dir, oid) = repo_with_commit("fix bug");
        let config = format!("skip_for_users = [\"deploy-bot\"]\n{}", CONFIG);
        fs::write(dir.path().join("pushgate.toml"), config).unwrap();

        let mut options = options(dir.path());
        options.user_name = Some("deploy-bot".to_string());

        let (code, report) = run(&options, &format!("{} {} refs/heads/main\n", ZERO, oid));
        assert_eq!(code, EXIT_ALLOW);
        assert!(report.is_empty());
    }

    #[test]
    fn test_json_report() {
        let (dir, oid) = repo_with_commit("fix bug");
        let mut options = options(dir.path());
        options.format = OutputFormat::Json;

        let (code, report) = run(&options, &format!("{} {} refs/heads/main\n", ZERO, oid));
        assert_eq!(code, EXIT_REJECT);
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["decision"], "reject");
    }
}
