// src/system/terminal.rs

//! Terminal size.

use crate::constants::DEFAULT_TERMINAL_WIDTH;
use dialoguer::console::Term;

/// Width of the attached terminal in columns, or [`DEFAULT_TERMINAL_WIDTH`]
/// when stdout is not a terminal.
pub fn width() -> usize {
    Term::stdout()
        .size_checked()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(_, cols)| usize::from(cols))
}

