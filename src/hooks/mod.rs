// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Server-side git hook integration.
//!
//! [`run_pre_receive`] is what git executes for every push; [`HookManager`]
//! puts the script calling it in place.

mod identity;
mod manager;
mod receive;
mod templates;

pub use identity::EnvIdentity;
pub use manager::{HookManager, HookStatus};
pub use receive::{run_pre_receive, run_updates, ReceiveOptions, EXIT_ALLOW, EXIT_REJECT};
pub use templates::{is_pushgate_hook, pre_receive_script, HOOK_FILENAME};
