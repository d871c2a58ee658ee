// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::hooks::ReceiveOptions;
pub use crate::report::OutputFormat;

/// Pushgate - commit acceptance gate for git pushes
///
/// Checks the commits of every push against configured rule groups and
/// rejects pushes that violate them.
#[derive(Parser, Debug)]
#[command(name = "pushgate")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit acceptance gate for git pre-receive", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Report violations but never reject
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for reports
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PUSHGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository to work on (default: from the git environment)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Name of the pushing user, overriding the configured variable
    #[arg(long, global = true)]
    pub user_name: Option<String>,

    /// Email of the pushing user, overriding the configured variable
    #[arg(long, global = true)]
    pub user_email: Option<String>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the reference updates git writes to stdin
    PreReceive,

    /// Validate a single reference update
    Check(CheckArgs),

    /// Manage the pre-receive hook
    Hooks(HooksArgs),

    /// Initialize pushgate configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Full reference name, e.g. refs/heads/main
    #[arg(value_name = "REF")]
    pub ref_id: String,

    /// Old object id (all zeros for a new ref)
    #[arg(value_name = "FROM")]
    pub from: String,

    /// New object id (all zeros for a deleted ref)
    #[arg(value_name = "TO")]
    pub to: String,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install the pre-receive hook
    Install {
        /// Replace an existing hook (it is kept as a backup)
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall the pre-receive hook
    Uninstall,

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write a configuration without example rule groups
    #[arg(long)]
    pub minimal: bool,
}

impl Cli {
    /// Options for validating a push.
    pub fn receive_options(&self) -> ReceiveOptions {
        ReceiveOptions {
            config_path: self.config.clone(),
            repo: self.repo.clone(),
            dry_run: self.dry_run,
            format: self.format,
            user_name: self.user_name.clone(),
            user_email: self.user_email.clone(),
            ..ReceiveOptions::default()
        }
    }
}
