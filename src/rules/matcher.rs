// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pattern matching of a single rule.

use crate::config::Rule;
use crate::error::{ConfigError, GateError, Result};
use regex::Regex;
use std::collections::HashMap;

/// Compile a configured pattern.
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| GateError::Config(ConfigError::invalid_pattern(pattern, &e)))
}

/// Patterns compiled during one validation pass.
///
/// A pattern is compiled the first time it is used and reused afterwards.
/// Malformed patterns are not stored, so every use reports the error.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: HashMap<String, Regex>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled form of `pattern`.
    pub fn get(&mut self, pattern: &str) -> Result<&Regex> {
        if !self.compiled.contains_key(pattern) {
            let regex = compile(pattern)?;
            self.compiled.insert(pattern.to_string(), regex);
        }
        Ok(&self.compiled[pattern])
    }

    /// Whether `rule` matches anywhere in `message`.
    ///
    /// Patterns are searched, not anchored; use `^`/`$` to anchor.
    pub fn matches(&mut self, rule: &Rule, message: &str) -> Result<bool> {
        Ok(self.get(&rule.pattern)?.is_match(message))
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether nothing was compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
