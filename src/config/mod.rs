// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for pushgate.
//!
//! This module handles discovering, loading and parsing the TOML settings
//! that drive the gate.

pub mod default;
mod loader;
mod schema;

pub use default::{default_config, example_config, minimal_config};
pub use loader::{find_config_file, find_config_file_from, load_config, load_config_from, parse_config};
pub use schema::*;
