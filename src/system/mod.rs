// src/system/mod.rs

//! # System Interaction Layer
//!
//! Thin boundary between the console and the operating system.
//!
//! - **`terminal`**: terminal size queries.
//! - **`notify`**: desktop notifications through the platform's notifier
//!   (`osascript`, `notify-send` or PowerShell), spawned without a shell.

pub mod notify;
pub mod terminal;
