// src/models.rs

//! Plain data shared across the crate: command declarations, parsed
//! parameters and console switches.

use crate::core::errors::ConsoleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dynamic value used for parameters and handler results.
pub type Value = serde_json::Value;

/// Parameter map keyed by name. Ordered so that serialization is stable.
pub type ParamMap = BTreeMap<String, Value>;

// --- COMMAND DECLARATION MODELS ---

/// A positional argument declared by a command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArgumentDef {
    /// Key the value is stored under.
    pub name: String,
    /// Shown in the command's help.
    pub description: String,
    /// Used when the argument is not given; `None` makes it optional without a value.
    pub default: Option<Value>,
}

impl ArgumentDef {
    /// An argument without a default.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: None,
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// An option declared by a command.
///
/// `flags` follows the usual notation: `-f, --force`, `--level=`,
/// `-o, --output <path>` or `--name [name]`. An option takes a value when its
/// flags carry a placeholder or a trailing `=`; otherwise it is a boolean switch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OptionDef {
    /// Flag notation, e.g. `-o, --output <path>`.
    pub flags: String,
    /// Shown in the command's help.
    pub description: String,
    /// Used when the option is absent.
    pub default: Option<Value>,
}

impl OptionDef {
    /// An option without a default.
    pub fn new(flags: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            flags: flags.into(),
            description: description.into(),
            default: None,
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn tokens(&self) -> impl Iterator<Item = &str> {
        self.flags
            .split([',', ' ', '|'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Long name without dashes or value marker (`--level=` gives `level`).
    pub fn long_name(&self) -> Option<String> {
        self.tokens()
            .find_map(|t| t.strip_prefix("--"))
            .map(|t| t.split(['=', '<', '[']).next().unwrap_or(t).to_string())
            .filter(|t| !t.is_empty())
    }

    /// Single-character short name (`-f` gives `f`).
    pub fn short_name(&self) -> Option<char> {
        self.tokens()
            .filter(|t| !t.starts_with("--"))
            .find_map(|t| t.strip_prefix('-'))
            .and_then(|t| t.chars().next())
    }

    /// Whether the flags carry a placeholder or a trailing `=`.
    pub fn takes_value(&self) -> bool {
        self.flags.contains('<') || self.flags.contains('[') || self.flags.contains('=')
    }

    /// The key under which the option's value is stored.
    pub fn key(&self) -> String {
        self.long_name()
            .or_else(|| self.short_name().map(String::from))
            .unwrap_or_else(|| self.flags.trim().to_string())
    }

    /// Value used when the option is absent from the command line.
    /// Switches without an explicit default are `false`.
    pub fn default_value(&self) -> Option<Value> {
        match &self.default {
            Some(v) => Some(v.clone()),
            None if !self.takes_value() => Some(Value::Bool(false)),
            None => None,
        }
    }
}

/// Static description of a command: identity on the command line, help text and
/// declared parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CommandDefinition {
    /// Heading the command is listed under in the application help.
    pub group: String,
    /// Name typed on the command line. Must not be empty.
    pub name: String,
    /// One-line summary.
    pub description: String,
    /// Usage line; derived from the arguments when empty.
    pub usage: String,
    /// Alternative name, empty for none.
    pub alias: String,
    /// Free-form version of the command.
    pub version: String,
    /// Positional arguments, in order.
    pub arguments: Vec<ArgumentDef>,
    /// Options and switches.
    pub options: Vec<OptionDef>,
}

impl CommandDefinition {
    /// A definition with only a name; the other setters chain from here.
    ///
    /// ```
    /// use consola::{ArgumentDef, CommandDefinition};
    ///
    /// let def = CommandDefinition::new("greet")
    ///     .alias("g")
    ///     .argument(ArgumentDef::new("name", "Who to greet").with_default("world"));
    /// assert_eq!(def.arguments.len(), 1);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the help heading.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the one-line summary.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Overrides the derived usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the alternative name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Sets the command's version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Appends a positional argument.
    pub fn argument(mut self, argument: ArgumentDef) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Appends an option.
    pub fn option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Reads a declared property by name.
    ///
    /// # Errors
    /// Returns `ConsoleError::UndefinedMethod` for names that are not properties
    /// of a command definition.
    pub fn property(&self, name: &str) -> Result<&str, ConsoleError> {
        match name {
            "group" => Ok(&self.group),
            "name" => Ok(&self.name),
            "description" => Ok(&self.description),
            "usage" => Ok(&self.usage),
            "alias" => Ok(&self.alias),
            "version" => Ok(&self.version),
            other => Err(ConsoleError::UndefinedMethod(other.to_string())),
        }
    }

    /// Finds an option by its key, long name or short name.
    pub fn find_option(&self, key: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| {
            o.key() == key
                || o.long_name().as_deref() == Some(key)
                || o.short_name().map(String::from).as_deref() == Some(key)
        })
    }
}

// --- RUNTIME PARAMETER MODELS ---

/// The last values parsed for a command: positional arguments, and every value
/// (arguments and options) keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValues {
    /// Positional arguments by name.
    pub arguments: ParamMap,
    /// Arguments and options together.
    pub values: ParamMap,
}

impl ParsedValues {
    /// Values a command exposes before it has ever been parsed from argv.
    /// Null and missing defaults are omitted.
    pub fn defaults(definition: &CommandDefinition) -> Self {
        let mut parsed = Self::default();
        for arg in &definition.arguments {
            if let Some(v) = arg.default.clone().filter(|v| !v.is_null()) {
                parsed.arguments.insert(arg.name.clone(), v.clone());
                parsed.values.insert(arg.name.clone(), v);
            }
        }
        for opt in &definition.options {
            if let Some(v) = opt.default_value().filter(|v| !v.is_null()) {
                parsed.values.insert(opt.key(), v);
            }
        }
        parsed
    }
}

/// The parameters a handler sees for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    /// Positional arguments.
    pub arguments: ParamMap,
    /// Options, keyed without dashes.
    pub options: ParamMap,
}

impl Parameters {
    /// Bundles arguments and options.
    pub fn new(arguments: ParamMap, options: ParamMap) -> Self {
        Self { arguments, options }
    }
}

// --- CONSOLE STATE MODELS ---

/// Console-wide switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Error traces and debug output. Set by `--debug`.
    Debug,
    /// Header line on the application help. On by default.
    Header,
    /// Footer line on the application help.
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Flags {
    debug: bool,
    header: bool,
    footer: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            debug: false,
            header: true,
            footer: false,
        }
    }
}

impl Flags {
    pub(crate) fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Debug => self.debug,
            Flag::Header => self.header,
            Flag::Footer => self.footer,
        }
    }

    pub(crate) fn set(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Debug => self.debug = value,
            Flag::Header => self.header = value,
            Flag::Footer => self.footer = value,
        }
    }
}

/// Points around a handler where a hook may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Runs before the handler.
    Before,
    /// Runs after the handler returns successfully.
    After,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_flag_parsing() {
        let force = OptionDef::new("-f, --force", "Force it");
        assert_eq!(force.long_name().as_deref(), Some("force"));
        assert_eq!(force.short_name(), Some('f'));
        assert!(!force.takes_value());
        assert_eq!(force.key(), "force");
        assert_eq!(force.default_value(), Some(json!(false)));

        let level = OptionDef::new("--level=", "Level");
        assert_eq!(level.long_name().as_deref(), Some("level"));
        assert_eq!(level.short_name(), None);
        assert!(level.takes_value());
        assert_eq!(level.default_value(), None);

        let output = OptionDef::new("-o, --output <path>", "Output").with_default("out.txt");
        assert_eq!(output.key(), "output");
        assert!(output.takes_value());
        assert_eq!(output.default_value(), Some(json!("out.txt")));

        let short_only = OptionDef::new("-v", "Verbose");
        assert_eq!(short_only.key(), "v");
    }

    #[test]
    fn test_definition_property_access() {
        let def = CommandDefinition::new("greet").alias("g").group("demo");
        assert_eq!(def.property("name").unwrap(), "greet");
        assert_eq!(def.property("alias").unwrap(), "g");
        assert_eq!(def.property("group").unwrap(), "demo");

        let err = def.property("colour").unwrap_err();
        assert!(matches!(err, ConsoleError::UndefinedMethod(ref m) if m == "colour"));
    }

    #[test]
    fn test_parsed_defaults_omit_nulls() {
        let def = CommandDefinition::new("greet")
            .argument(ArgumentDef::new("name", "Who").with_default("world"))
            .argument(ArgumentDef::new("title", "Title").with_default(Value::Null))
            .option(OptionDef::new("-l, --loud", "Shout"))
            .option(OptionDef::new("--times=", "Repeat"));

        let parsed = ParsedValues::defaults(&def);
        assert_eq!(parsed.arguments.len(), 1);
        assert_eq!(parsed.arguments["name"], json!("world"));
        assert_eq!(parsed.values["loud"], json!(false));
        assert!(!parsed.values.contains_key("times"));
        assert!(!parsed.values.contains_key("title"));
    }

    #[test]
    fn test_flags_defaults() {
        let mut flags = Flags::default();
        assert!(!flags.get(Flag::Debug));
        assert!(flags.get(Flag::Header));
        assert!(!flags.get(Flag::Footer));
        flags.set(Flag::Footer, true);
        assert!(flags.get(Flag::Footer));
    }
}
