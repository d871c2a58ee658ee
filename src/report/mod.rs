// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Reporting of gate decisions.
//!
//! This module renders the configured message templates and formats the
//! verification tree as text for the pusher or as JSON for tooling.

mod printer;
mod render;

pub use printer::{OutputFormat, ReportPrinter};
pub use render::{MessageVars, Renderer};
