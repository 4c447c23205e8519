//! Live Client
//!
//! - **App**: owned client state and every page operation
//! - **View**: what gets shown, with a terminal implementation
//! - **Command**: the line commands the live client accepts

mod command;
mod state;
pub mod view;

pub use command::{Command, CommandError, HELP};
pub use state::App;
pub use view::{TerminalView, View};
