//! FormDesign App Library
//!
//! Command dispatch, keyboard shortcuts and pointer routing on top of the
//! editing session, shared by the CLI and embedding hosts.

pub mod commands;
pub mod event_handler;
pub mod shortcuts;

pub use commands::{Command, CommandDispatcher, CommandError, CommandResult, Outcome};
pub use event_handler::{EventHandler, Modifiers, PointerOutcome};
pub use shortcuts::{Key, KeyPress, Shortcut, ShortcutRegistry};
