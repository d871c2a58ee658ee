// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Installs and removes the `pre-receive` hook of a repository.

use crate::error::{GateError, HookError, Result};
use crate::git::Repository;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use super::templates::{self, HOOK_FILENAME};

/// State of the `pre-receive` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStatus {
    /// Our script is installed.
    Installed,
    /// Some other script is installed.
    Foreign,
    /// No hook.
    Missing,
}

impl HookStatus {
    /// Short label for listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookStatus::Installed => "installed",
            HookStatus::Foreign => "foreign",
            HookStatus::Missing => "missing",
        }
    }
}

/// Manager for the server-side hook.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a manager for the repository at or above `path`.
    ///
    /// Works for bare repositories, where hooks live directly below the
    /// repository directory.
    pub fn new(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(Self::with_hooks_dir(repo.git_dir().join("hooks")))
    }

    /// Create a manager for an explicit hooks directory.
    pub fn with_hooks_dir(hooks_dir: impl Into<PathBuf>) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
        }
    }

    /// Path of the hook script.
    pub fn hook_path(&self) -> PathBuf {
        self.hooks_dir.join(HOOK_FILENAME)
    }

    fn backup_path(&self) -> PathBuf {
        self.hooks_dir.join(format!("{}.backup", HOOK_FILENAME))
    }

    /// Install the hook.
    ///
    /// A foreign hook is only replaced with `force`; it is kept as
    /// `pre-receive.backup` and restored on uninstall.
    pub fn install(&self, config: Option<&Path>, force: bool) -> Result<()> {
        let hook_path = self.hook_path();

        fs::create_dir_all(&self.hooks_dir)
            .map_err(|e| install_failed(format!("Failed to create hooks directory: {}", e)))?;

        if self.status()? == HookStatus::Foreign {
            if !force {
                return Err(GateError::Hook(HookError::AlreadyExists {
                    hook: HOOK_FILENAME.to_string(),
                }));
            }
            fs::rename(&hook_path, self.backup_path())
                .map_err(|e| install_failed(format!("Failed to backup existing hook: {}", e)))?;
            tracing::info!("Existing hook moved to {:?}", self.backup_path());
        }

        fs::write(&hook_path, templates::pre_receive_script(config))
            .map_err(|e| install_failed(format!("Failed to write hook: {}", e)))?;

        let mut perms = fs::metadata(&hook_path)
            .map_err(|e| install_failed(format!("Failed to get permissions: {}", e)))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&hook_path, perms)
            .map_err(|e| install_failed(format!("Failed to set permissions: {}", e)))?;

        tracing::debug!("Installed hook at {:?}", hook_path);
        Ok(())
    }

    /// Remove our hook and restore a previously backed up one.
    pub fn uninstall(&self) -> Result<()> {
        match self.status()? {
            HookStatus::Missing => Ok(()),
            HookStatus::Foreign => Err(GateError::Hook(HookError::RemoveFailed {
                hook: HOOK_FILENAME.to_string(),
                message: "Hook was not installed by pushgate".to_string(),
            })),
            HookStatus::Installed => {
                fs::remove_file(self.hook_path()).map_err(|e| {
                    GateError::Hook(HookError::RemoveFailed {
                        hook: HOOK_FILENAME.to_string(),
                        message: format!("Failed to remove hook: {}", e),
                    })
                })?;

                let backup = self.backup_path();
                if backup.exists() {
                    fs::rename(&backup, self.hook_path()).map_err(|e| {
                        GateError::Hook(HookError::RemoveFailed {
                            hook: HOOK_FILENAME.to_string(),
                            message: format!("Failed to restore backup: {}", e),
                        })
                    })?;
                }
                Ok(())
            }
        }
    }

    /// Current state of the hook.
    pub fn status(&self) -> Result<HookStatus> {
        let hook_path = self.hook_path();
        if !hook_path.exists() {
            return Ok(HookStatus::Missing);
        }

        let content = fs::read_to_string(&hook_path)?;
        if templates::is_pushgate_hook(&content) {
            Ok(HookStatus::Installed)
        } else {
            Ok(HookStatus::Foreign)
        }
    }
}

fn install_failed(message: String) -> GateError {
    GateError::Hook(HookError::InstallFailed {
        hook: HOOK_FILENAME.to_string(),
        message,
    })
}
