// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The authenticated actor of a push.
//!
//! Git itself does not know who pushes. The hosting layer in front of it
//! (ssh forced command, http frontend) exports the actor through
//! environment variables, whose names are configurable.

use crate::config::IdentityConfig;
use crate::error::{IdentityError, Result};
use crate::git::Identity;
use crate::verify::ActorIdentityProvider;
use std::env;

/// Reads the pushing actor from environment variables.
#[derive(Debug, Clone)]
pub struct EnvIdentity {
    name_env: String,
    email_env: String,
    name: Option<String>,
    email: Option<String>,
}

impl EnvIdentity {
    /// Create a provider for the configured variables.
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            name_env: config.name_env.clone(),
            email_env: config.email_env.clone(),
            name: None,
            email: None,
        }
    }

    /// Use explicit values instead of the environment where given.
    pub fn with_overrides(mut self, name: Option<String>, email: Option<String>) -> Self {
        self.name = name;
        self.email = email;
        self
    }

    /// The actor's name alone.
    pub fn name(&self) -> Result<String> {
        resolve(self.name.as_deref(), &self.name_env, "name")
    }

    /// The actor's email alone.
    pub fn email(&self) -> Result<String> {
        resolve(self.email.as_deref(), &self.email_env, "email")
    }
}

impl ActorIdentityProvider for EnvIdentity {
    fn current_identity(&self) -> Result<Identity> {
        Ok(Identity::new(self.name()?, self.email()?))
    }
}

fn resolve(explicit: Option<&str>, variable: &str, field: &'static str) -> Result<String> {
    let value = match explicit {
        Some(value) => Some(value.to_string()),
        None => env::var(variable).ok(),
    };

    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(IdentityError::Missing {
            field,
            variable: variable.to_string(),
        }
        .into()),
    }
}
