// src/components/mod.rs

//! # Console Components
//!
//! Reusable output widgets that render through a console's themed writer.
//!
//! - **`alert`**: bordered boxes with a title line and a wrapped message.
//! - **`badge`**: inline coloured labels followed by a message.
//! - **`logger`**: records forwarded to the `log` facade and echoed with a level badge.
//! - **`icon`**: icon characters and the per-console default-icon switch.

pub mod alert;
pub mod badge;
pub mod icon;
pub mod logger;

use crate::core::command::Context;
use crate::core::errors::ConsoleResult;

pub use alert::Alert;
pub use badge::Badge;
pub use icon::{ComponentSettings, Icon, IconChoice};
pub use logger::{LogLevel, Logger};

impl<'a> Context<'a> {
    /// Bordered alert boxes.
    pub fn alert(&self) -> Alert<'a> {
        Alert::new(self.console())
    }

    /// Inline badges.
    pub fn badge(&self) -> Badge<'a> {
        Badge::new(self.console())
    }

    /// The console's logger, enabled with `Application::logger`.
    ///
    /// # Errors
    /// Returns `ConsoleError::LoggerNotConfigured` when the console has no logger.
    pub fn logger(&self) -> ConsoleResult<Logger<'a>> {
        Logger::new(self.console())
    }
}
