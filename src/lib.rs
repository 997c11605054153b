// src/lib.rs

//! `consola` builds themed command-line applications.
//!
//! Commands implement [`Command`] and are registered on an [`Application`],
//! which parses argv, prints help and runs the matching handler. Handlers get a
//! [`Context`] with the styled writer, prompts, progress bars, ASCII art and
//! the small alert/badge/logger components, and can call other commands,
//! optionally capturing their output.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Shared flag a long-running task polls to know it should stop.
pub type CancellationToken = Arc<AtomicBool>;

pub mod cli;
pub mod components;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
pub mod ui;

pub use cli::Application;
pub use core::command::{Command, Context};
pub use core::console::Console;
pub use core::errors::{ConsoleError, ConsoleResult};
pub use core::invocation::Container;
pub use models::{ArgumentDef, CommandDefinition, Flag, Hook, OptionDef, ParamMap, Value};
