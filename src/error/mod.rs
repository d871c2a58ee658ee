// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for pushgate.
//!
//! Every component below the gate returns these errors unchanged. The only
//! place where they are intercepted is [`crate::verify::CommitGate::run`],
//! which turns them into an allowing decision.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pushgate operations.
#[derive(Error, Debug)]
pub enum GateError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Actor identity errors
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    // Message rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    // Hook errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

impl ConfigError {
    /// Build an [`ConfigError::InvalidPattern`] from a failed regex compilation.
    pub fn invalid_pattern(pattern: &str, err: &regex::Error) -> Self {
        ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid object id: {oid}")]
    InvalidObjectId { oid: String },

    #[error("Invalid reference update line: '{line}'")]
    InvalidRefLine { line: String },

    #[error("Failed to list changesets for {reference}: {message}")]
    ListFailed { reference: String, message: String },
}

/// Errors raised while resolving the authenticated actor.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Actor {field} is not available (expected in ${variable})")]
    Missing {
        field: &'static str,
        variable: String,
    },
}

/// Message template rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render message template: {message}")]
    TemplateFailed { message: String },
}

impl From<handlebars::RenderError> for RenderError {
    fn from(err: handlebars::RenderError) -> Self {
        RenderError::TemplateFailed {
            message: err.to_string(),
        }
    }
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook}")]
    AlreadyExists { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },
}

/// Result type alias for pushgate operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| GateError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
