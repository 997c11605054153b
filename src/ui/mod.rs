// src/ui/mod.rs

//! # User Interface Layer
//!
//! Everything a handler uses to talk to the terminal.
//!
//! - **`writer`**: the themed output sink with capture buffers and inline markup.
//! - **`reader`**: prompts, behind a `Prompter` so runs can be scripted.
//! - **`formats`**: line, status, list, table and layout helpers on `Context`.
//! - **`progress`**: the in-place progress bar.
//! - **`advanced`**: spinners, charts, menus, animations and notifications.
//! - **`ascii_art`**: per-console bitmap fonts and banners.
//! - **`cursor`**: ANSI cursor sequences.

pub mod advanced;
pub mod ascii_art;
pub mod cursor;
pub mod formats;
pub mod progress;
pub mod reader;
pub mod writer;

pub use advanced::ChartKind;
pub use ascii_art::{Font, FontRegistry};
pub use cursor::Cursor;
pub use progress::ProgressBar;
pub use reader::{Prompter, Reader, ScriptedPrompter};
pub use writer::{MemorySink, Writer};
