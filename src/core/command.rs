// src/core/command.rs

//! The `Command` trait and the `Context` handlers run with.

use crate::constants::DEFAULT_FONT;
use crate::core::console::Console;
use crate::core::theme::Theme;
use crate::models::{CommandDefinition, ParamMap, Parameters, Value};
use crate::ui::reader::Reader;
use crate::ui::writer::Writer;
use std::cell::{Ref, RefMut};

/// A command that can be registered on a [`Console`].
///
/// `definition` declares the command's name, alias, help text and parameters;
/// `handle` runs it. The returned value is handed back verbatim to callers of
/// [`Console::call`]; integers become the process exit code when run from argv.
pub trait Command {
    /// Name, alias, help text and parameters. Called once at registration
    /// and again by hooks and help.
    fn definition(&self) -> CommandDefinition;

    /// Executes the command.
    ///
    /// # Errors
    /// Any error is propagated to the caller unchanged.
    fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value>;
}

/// What a running handler sees: its parameters and the console it runs on.
///
/// Output helpers live in `ui::formats`, interactive helpers in `ui::reader`
/// and `ui::advanced`, ASCII art in `ui::ascii_art`.
#[derive(Debug)]
pub struct Context<'a> {
    console: &'a Console,
    definition: &'a CommandDefinition,
    parameters: Parameters,
    pub(crate) font: String,
}

impl<'a> Context<'a> {
    /// A context for one run of `definition`. The banner font starts as
    /// `standard`.
    pub fn new(
        console: &'a Console,
        definition: &'a CommandDefinition,
        parameters: Parameters,
    ) -> Self {
        Self {
            console,
            definition,
            parameters,
            font: DEFAULT_FONT.to_string(),
        }
    }

    /// The console running this command.
    pub fn console(&self) -> &'a Console {
        self.console
    }

    /// The running command's definition.
    pub fn definition(&self) -> &'a CommandDefinition {
        self.definition
    }

    /// The console's writer. Do not hold it across calls to other commands.
    pub fn writer(&self) -> RefMut<'a, Writer> {
        self.console.writer()
    }

    /// The console's reader.
    pub fn reader(&self) -> RefMut<'a, Reader> {
        self.console.reader()
    }

    /// The active theme.
    pub fn theme(&self) -> Ref<'a, Theme> {
        self.console.theme()
    }

    // --- Parameters ---

    /// A positional argument.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.parameters.arguments.get(name)
    }

    /// Every positional argument.
    pub fn arguments(&self) -> &ParamMap {
        &self.parameters.arguments
    }

    /// Whether the argument was given or has a default.
    pub fn has_argument(&self, name: &str) -> bool {
        self.parameters.arguments.contains_key(name)
    }

    /// An option, keyed without dashes.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.parameters.options.get(name)
    }

    /// Every option.
    pub fn options(&self) -> &ParamMap {
        &self.parameters.options
    }

    /// Whether the option was given or has a default.
    pub fn has_option(&self, name: &str) -> bool {
        self.parameters.options.contains_key(name)
    }

    /// An argument or, failing that, an option of the same name.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.argument(name).or_else(|| self.option(name))
    }

    /// A parameter rendered as text. Strings are returned without quotes.
    pub fn parameter_str(&self, name: &str) -> Option<String> {
        self.parameter(name).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// A boolean parameter. Missing values and `null` are `false`.
    pub fn flag(&self, name: &str) -> bool {
        match self.parameter(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Null) | None => false,
            Some(Value::String(s)) => !s.is_empty() && s != "0" && s != "false",
            Some(_) => true,
        }
    }

    // --- Calling other commands ---

    /// Calls another command on the same console.
    ///
    /// # Errors
    /// See [`Console::call`].
    pub fn call(&self, key: &str, arguments: ParamMap, options: ParamMap) -> anyhow::Result<Value> {
        self.console.call(key, arguments, options)
    }

    /// Calls another command with its output captured.
    ///
    /// # Errors
    /// See [`Console::call_silent`].
    pub fn call_silent(
        &self,
        key: &str,
        arguments: ParamMap,
        options: ParamMap,
    ) -> anyhow::Result<Value> {
        self.console.call_silent(key, arguments, options)
    }

    /// Output of another command, cached per parameters.
    ///
    /// # Errors
    /// See [`Console::capture_output`].
    pub fn capture_output(
        &self,
        key: &str,
        arguments: ParamMap,
        options: ParamMap,
    ) -> anyhow::Result<String> {
        self.console.capture_output(key, arguments, options)
    }

    /// Whether `key` names a registered command.
    pub fn command_exists(&self, key: &str) -> bool {
        self.console.exists(key)
    }

    /// Pads `item` to `max + extra` columns, prefixed by `indent` spaces.
    pub fn pad(&self, item: &str, max: usize, extra: usize, indent: usize) -> String {
        pad(item, max, extra, indent)
    }
}

/// Left-aligns `item` in `max + extra` columns after `indent` spaces. Longer
/// items are not truncated.
pub fn pad(item: &str, max: usize, extra: usize, indent: usize) -> String {
    format!("{}{:<width$}", " ".repeat(indent), item, width = max + extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4, 2, 0), "ab    ");
        assert_eq!(pad("ab", 4, 1, 2), "  ab   ");
        assert_eq!(pad("toolong", 3, 0, 0), "toolong");
    }

    #[test]
    fn test_parameter_prefers_arguments() {
        let console = Console::new("t", "1.0");
        let definition = CommandDefinition::new("x");
        let mut arguments = ParamMap::new();
        arguments.insert("name".into(), json!("arg"));
        let mut options = ParamMap::new();
        options.insert("name".into(), json!("opt"));
        options.insert("loud".into(), json!(true));
        options.insert("quiet".into(), json!("false"));

        let ctx = Context::new(&console, &definition, Parameters::new(arguments, options));
        assert_eq!(ctx.parameter("name"), Some(&json!("arg")));
        assert_eq!(ctx.parameter_str("name").as_deref(), Some("arg"));
        assert!(ctx.flag("loud"));
        assert!(!ctx.flag("quiet"));
        assert!(!ctx.flag("missing"));
        assert!(ctx.has_option("loud") && !ctx.has_argument("loud"));
    }
}
