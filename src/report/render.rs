// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Message template rendering.

use crate::error::{RenderError, Result};
use crate::git::{ChangeSet, Identity};
use handlebars::Handlebars;
use serde::Serialize;

/// Variables available to message templates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageVars {
    /// Configured hook name shown in the report header.
    pub hook_name: String,
    /// Name of the pushing user, empty when unknown.
    pub user_name: String,
    /// Email of the pushing user, empty when unknown.
    pub user_email: String,
    /// Committer name of the current changeset.
    pub committer_name: String,
    /// Committer email of the current changeset.
    pub committer_email: String,
    /// Full id of the current changeset.
    pub changeset_id: String,
    /// Reference the current changeset was pushed to.
    pub ref_id: String,
    /// Pattern of the rule being reported.
    pub pattern: String,
}

impl MessageVars {
    /// Variables known before any changeset is looked at.
    pub fn new(hook_name: &str, actor: Option<&Identity>) -> Self {
        let (user_name, user_email) = actor
            .map(|actor| (actor.name.clone(), actor.email.clone()))
            .unwrap_or_default();
        Self {
            hook_name: hook_name.to_string(),
            user_name,
            user_email,
            ..Self::default()
        }
    }

    /// Scope to a ref update.
    pub fn for_ref(&self, ref_id: &str) -> Self {
        Self {
            ref_id: ref_id.to_string(),
            ..self.clone()
        }
    }

    /// Scope to a changeset.
    pub fn for_changeset(&self, changeset: &ChangeSet) -> Self {
        Self {
            committer_name: changeset.committer.name.clone(),
            committer_email: changeset.committer.email.clone(),
            changeset_id: changeset.id.clone(),
            ..self.clone()
        }
    }

    /// Scope to a rule.
    pub fn for_pattern(&self, pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            ..self.clone()
        }
    }
}

/// Renders configured messages as handlebars templates.
///
/// Output is plain text: nothing is HTML-escaped and unknown variables
/// render empty.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Create a renderer.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    /// Render `template` with `vars`.
    pub fn render(&self, template: &str, vars: &MessageVars) -> Result<String> {
        let rendered = self
            .registry
            .render_template(template, vars)
            .map_err(RenderError::from)?;
        Ok(rendered)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;

    #[test]
    fn test_render_actor_variables() {
        let actor = Identity::new("Ada", "ada@example.com");
        let vars = MessageVars::new("Gate", Some(&actor));
        let rendered = Renderer::new()
            .render("Hi {{user_name}} <{{user_email}}> from {{hook_name}}", &vars)
            .unwrap();
        assert_eq!(rendered, "Hi Ada <ada@example.com> from Gate");
    }

    #[test]
    fn test_render_scoped_variables() {
        let changeset = ChangeSet::new("abc123", "msg", Identity::new("Bob", "bob@example.com"));
        let vars = MessageVars::new("Gate", None)
            .for_ref("refs/heads/main")
            .for_changeset(&changeset)
            .for_pattern("^JIRA");
        let rendered = Renderer::new()
            .render("{{changeset_id}} on {{ref_id}} by {{committer_email}}: {{pattern}}", &vars)
            .unwrap();
        assert_eq!(rendered, "abc123 on refs/heads/main by bob@example.com: ^JIRA");
    }

    #[test]
    fn test_no_html_escaping_and_missing_vars() {
        let vars = MessageVars::new("Gate", None);
        let rendered = Renderer::new()
            .render("<b>{{hook_name}}</b> & {{unknown}}!", &vars)
            .unwrap();
        assert_eq!(rendered, "<b>Gate</b> & !");
    }

    #[test]
    fn test_malformed_template() {
        let vars = MessageVars::default();
        let result = Renderer::new().render("{{#if}}", &vars);
        assert!(matches!(result, Err(GateError::Render(_))));
    }

    #[test]
    fn test_unknown_actor_renders_empty() {
        let changeset = ChangeSet::new("abc123", "msg", Identity::new("Bob", "bob@example.com"));
        let vars = MessageVars::new("Gate", None).for_changeset(&changeset);
        let rendered = Renderer::new()
            .render("[{{user_name}}|{{user_email}}] {{committer_name}}", &vars)
            .unwrap();
        assert_eq!(rendered, "[|] Bob");
    }
}
