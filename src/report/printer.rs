// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Human and machine readable reports of a decision.

use crate::config::{AcceptMode, GateConfig};
use crate::error::{Result, ResultExt};
use crate::git::Identity;
use crate::rules::GroupOutcome;
use crate::verify::{ChangeSetOutcome, Decision, RefChangeOutcome, VerificationResult};
use console::style;
use std::fmt::Write;

use super::render::{MessageVars, Renderer};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Formats decisions for the pushing user.
pub struct ReportPrinter<'a> {
    config: &'a GateConfig,
    actor: Option<&'a Identity>,
    renderer: Renderer,
}

impl<'a> ReportPrinter<'a> {
    /// Create a printer; `actor` is shown next to identity mismatches.
    pub fn new(config: &'a GateConfig, actor: Option<&'a Identity>) -> Self {
        Self {
            config,
            actor,
            renderer: Renderer::new(),
        }
    }

    /// Format `decision` in the requested format.
    pub fn format(&self, decision: &Decision, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.json(decision),
            OutputFormat::Text => self.text(decision),
        }
    }

    /// JSON document with the decision and the full tree.
    pub fn json(&self, decision: &Decision) -> Result<String> {
        let json = serde_json::json!({
            "hook_name": self.config.hook_name,
            "decision": decision.as_str(),
            "allowed": decision.is_allowed(),
            "accepted": decision.result().map(VerificationResult::is_accepted),
            "dry_run": matches!(decision, Decision::Allow { dry_run: true, .. }),
            "diagnostic": decision.diagnostic(),
            "result": decision.result(),
        });

        serde_json::to_string_pretty(&json).context("Failed to serialize report")
    }

    /// Plain text report in the layout git relays to the pusher.
    pub fn text(&self, decision: &Decision) -> Result<String> {
        let vars = MessageVars::new(&self.config.hook_name, self.actor);
        let mut out = String::new();

        if !self.config.hook_name.is_empty() {
            let _ = writeln!(out, "{}\n", style(&self.config.hook_name).for_stderr().bold());
        }

        let (result, dry_run) = match decision {
            Decision::FailOpen { diagnostic } => {
                let _ = writeln!(out, "{}", style(diagnostic).for_stderr().yellow());
                return Ok(out);
            }
            Decision::Allow { result, dry_run } => (result, *dry_run),
            Decision::Reject { result } => (result, false),
        };

        let summary = if result.is_accepted() {
            &self.config.messages.accept
        } else {
            &self.config.messages.reject
        };
        if let Some(template) = summary {
            let _ = writeln!(out, "{}", self.renderer.render(template, &vars)?);
        }

        for ref_change in result.ref_changes() {
            if ref_change.has_reportables() {
                self.write_ref_change(&mut out, ref_change, &vars)?;
            }
        }
        out.push('\n');

        if dry_run {
            if let Some(template) = &self.config.messages.dry_run {
                let _ = writeln!(out, "{}", self.renderer.render(template, &vars)?);
            }
        }

        Ok(out)
    }

    fn write_ref_change(
        &self,
        out: &mut String,
        ref_change: &RefChangeOutcome,
        vars: &MessageVars,
    ) -> Result<()> {
        let update = &ref_change.ref_change;
        let vars = vars.for_ref(&update.ref_id);
        let _ = writeln!(
            out,
            "{} {} -> {}",
            style(&update.ref_id).for_stderr().cyan(),
            update.short_from(),
            update.short_to()
        );

        for outcome in ref_change.outcomes() {
            if outcome.has_reportables() {
                self.write_changeset(out, outcome, &vars)?;
            }
        }
        Ok(())
    }

    fn write_changeset(
        &self,
        out: &mut String,
        outcome: &ChangeSetOutcome,
        vars: &MessageVars,
    ) -> Result<()> {
        let changeset = &outcome.changeset;
        let vars = vars.for_changeset(changeset);

        let _ = writeln!(
            out,
            "\n{} {}",
            style(&changeset.id).for_stderr().yellow(),
            changeset.committer
        );
        let _ = writeln!(out, ">>> {}", changeset.message.trim_end());

        if !outcome.email_matched {
            let actor_email = self.actor.map(|a| a.email.as_str()).unwrap_or("?");
            let _ = writeln!(
                out,
                "* Actor: '{}' != Commit: '{}'",
                actor_email, changeset.committer.email
            );
            if let Some(template) = &self.config.messages.require_matching_author_email {
                let _ = writeln!(out, "{}", self.renderer.render(template, &vars)?);
            }
        }

        if !outcome.name_matched {
            let actor_name = self.actor.map(|a| a.name.as_str()).unwrap_or("?");
            let _ = writeln!(
                out,
                "* Actor: '{}' != Commit: '{}'",
                actor_name, changeset.committer.name
            );
            if let Some(template) = &self.config.messages.require_matching_author_name {
                let _ = writeln!(out, "{}", self.renderer.render(template, &vars)?);
            }
        }

        for group_outcome in &outcome.group_outcomes {
            self.write_group(out, group_outcome, &vars)?;
        }
        Ok(())
    }

    fn write_group(
        &self,
        out: &mut String,
        outcome: &GroupOutcome,
        vars: &MessageVars,
    ) -> Result<()> {
        let group = &outcome.group;
        let label = match &group.name {
            Some(name) => name.clone(),
            None => format!("group {}", outcome.group_index + 1),
        };
        let marker = if outcome.is_violation() {
            style("✗").for_stderr().red().bold()
        } else {
            style("ℹ").for_stderr().blue()
        };
        let _ = writeln!(out, "{} {}: {}", marker, label, outcome.description());

        if let Some(template) = &group.message {
            let _ = writeln!(out, "{}", self.renderer.render(template, vars)?);
        }

        // Blocking groups list every rule that explains what is expected.
        if group.accept == AcceptMode::Accept {
            for rule in &group.rules {
                if let Some(template) = &rule.message {
                    let rule_vars = vars.for_pattern(&rule.pattern);
                    let _ = writeln!(
                        out,
                        "* {}\n  {}",
                        rule.pattern,
                        self.renderer.render(template, &rule_vars)?
                    );
                }
            }
        }
        Ok(())
    }
}
