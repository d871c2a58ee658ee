// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::{example_config, minimal_config};
use crate::error::{ConfigError, GateError, Result, ResultExt};
use crate::git::{ChangesetScope, ReferenceUpdate};
use crate::hooks::{self, HookManager, HookStatus, EXIT_ALLOW};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::args::{CheckArgs, Cli, Commands, HooksAction, InitArgs, OutputFormat};

/// Run the CLI with the given arguments.
///
/// Returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::PreReceive => Ok(run_pre_receive(&cli)),
        Commands::Check(args) => Ok(run_check(&cli, args)),
        Commands::Hooks(args) => run_hooks(&cli, &args.action).map(|_| EXIT_ALLOW),
        Commands::Init(args) => run_init(&cli, args).map(|_| EXIT_ALLOW),
        Commands::Version => run_version().map(|_| EXIT_ALLOW),
    }
}

/// Reports go to stderr, which git relays to the pusher; JSON goes to stdout.
fn report_writer(format: OutputFormat) -> Box<dyn Write> {
    match format {
        OutputFormat::Text => Box::new(io::stderr()),
        OutputFormat::Json => Box::new(io::stdout()),
    }
}

/// Run the pre-receive command.
fn run_pre_receive(cli: &Cli) -> i32 {
    let options = cli.receive_options();
    tracing::debug!("Running pre-receive with options: {:?}", options);

    let stdin = io::stdin();
    let mut out = report_writer(options.format);
    hooks::run_pre_receive(&options, stdin.lock(), &mut out)
}

/// Run the check command.
///
/// Unlike `pre-receive`, `check` also validates commits that are already on
/// a ref, so it works on history that was pushed before.
fn run_check(cli: &Cli, args: &CheckArgs) -> i32 {
    let mut options = cli.receive_options();
    options.scope = ChangesetScope::SinceBase;
    tracing::debug!("Running check command with args: {:?}", args);

    let update = ReferenceUpdate::new(args.ref_id.as_str(), args.from.as_str(), args.to.as_str());
    let mut out = report_writer(options.format);
    hooks::run_updates(&options, &[update], &mut out)
}

/// Run the hooks command.
fn run_hooks(cli: &Cli, action: &HooksAction) -> Result<()> {
    let manager = HookManager::new(&working_dir(cli)?)?;

    match action {
        HooksAction::Install { force } => {
            let config = match &cli.config {
                Some(path) => Some(path.canonicalize().context("Failed to resolve configuration path")?),
                None => None,
            };
            manager.install(config.as_deref(), *force)?;
            println!("✓ Installed pre-receive hook at {}", manager.hook_path().display());
        }
        HooksAction::Uninstall => {
            manager.uninstall()?;
            println!("✓ Uninstalled pre-receive hook");
        }
        HooksAction::Status => {
            let status = manager.status()?;
            let icon = if status == HookStatus::Installed { "✓" } else { "✗" };
            println!("{} pre-receive: {}", icon, status.as_str());
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(cli: &Cli, args: &InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => working_dir(cli)?.join("pushgate.toml"),
    };

    if config_path.exists() && !args.force {
        return Err(GateError::Config(ConfigError::AlreadyExists { path: config_path }));
    }

    let content = if args.minimal {
        minimal_config()?
    } else {
        example_config().to_string()
    };

    std::fs::write(&config_path, content).context("Failed to write configuration")?;
    println!("✓ Created {}", display_name(&config_path));

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("pushgate {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

fn working_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.repo {
        Some(repo) => Ok(repo.clone()),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
