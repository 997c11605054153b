// src/cli/args.rs

//! Argument parsing with `clap`, built from a command definition at run time.

use crate::constants::{GLOBAL_FLAG_DEBUG, GLOBAL_FLAG_NO_COLORS};
use crate::models::{CommandDefinition, ParsedValues, Value};
use clap::{Arg, ArgAction, Command as ClapCommand};

/// Switches accepted anywhere on the command line, before any routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    /// `--debug` was given.
    pub debug: bool,
    /// `--no-colors` was given.
    pub no_colors: bool,
}

/// Removes `--debug` and `--no-colors` from `argv` wherever they appear.
pub fn strip_global_flags(argv: Vec<String>) -> (GlobalFlags, Vec<String>) {
    let mut flags = GlobalFlags::default();
    let rest = argv
        .into_iter()
        .filter(|arg| match arg.as_str() {
            GLOBAL_FLAG_DEBUG => {
                flags.debug = true;
                false
            }
            GLOBAL_FLAG_NO_COLORS => {
                flags.no_colors = true;
                false
            }
            _ => true,
        })
        .collect();
    (flags, rest)
}

/// `-h` or `--help`.
pub fn is_help_flag(arg: &str) -> bool {
    arg == "--help" || arg == "-h"
}

/// `-V` or `--version`.
pub fn is_version_flag(arg: &str) -> bool {
    arg == "--version" || arg == "-V"
}

/// A `clap` parser for one command definition.
///
/// Help and version handling stay with the application, so clap's own flags
/// are disabled.
pub fn build_command(definition: &CommandDefinition) -> ClapCommand {
    let mut command = ClapCommand::new(definition.name.clone())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true);

    for (position, argument) in definition.arguments.iter().enumerate() {
        command = command.arg(
            Arg::new(argument.name.clone())
                .index(position + 1)
                .required(false)
                .help(argument.description.clone()),
        );
    }

    for option in &definition.options {
        let mut arg = Arg::new(option.key()).help(option.description.clone());
        if let Some(long) = option.long_name() {
            arg = arg.long(long);
        }
        if let Some(short) = option.short_name() {
            arg = arg.short(short);
        }
        arg = if option.takes_value() {
            arg.action(ArgAction::Set)
        } else {
            arg.action(ArgAction::SetTrue)
        };
        command = command.arg(arg);
    }
    command
}

/// Parses `args` against `definition`. Values given on the command line are
/// laid over the declared defaults.
///
/// # Errors
/// Returns clap's error for unknown options, missing option values and
/// surplus positional arguments.
pub fn parse(definition: &CommandDefinition, args: &[String]) -> Result<ParsedValues, clap::Error> {
    let matches = build_command(definition).try_get_matches_from(args)?;
    let mut parsed = ParsedValues::defaults(definition);

    for argument in &definition.arguments {
        if let Some(value) = matches.get_one::<String>(&argument.name) {
            let value = Value::String(value.clone());
            parsed.arguments.insert(argument.name.clone(), value.clone());
            parsed.values.insert(argument.name.clone(), value);
        }
    }

    for option in &definition.options {
        let key = option.key();
        if option.takes_value() {
            if let Some(value) = matches.get_one::<String>(&key) {
                parsed.values.insert(key, Value::String(value.clone()));
            }
        } else if matches.get_flag(&key) {
            parsed.values.insert(key, Value::Bool(true));
        }
    }

    log::debug!("Parsed '{}' arguments: {:?}", definition.name, parsed);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArgumentDef, OptionDef};
    use serde_json::json;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn greet() -> CommandDefinition {
        CommandDefinition::new("greet")
            .argument(ArgumentDef::new("name", "Who").with_default("world"))
            .argument(ArgumentDef::new("title", "Honorific"))
            .option(OptionDef::new("-l, --loud", "Shout"))
            .option(OptionDef::new("--times <n>", "Repeat").with_default(1))
    }

    #[test]
    fn test_strip_global_flags() {
        let (flags, rest) = strip_global_flags(argv(&["greet", "--debug", "Ada", "--no-colors"]));
        assert!(flags.debug && flags.no_colors);
        assert_eq!(rest, argv(&["greet", "Ada"]));
    }

    #[test]
    fn test_parse_defaults_only() {
        let parsed = parse(&greet(), &[]).unwrap();
        assert_eq!(parsed.arguments.get("name"), Some(&json!("world")));
        assert!(!parsed.arguments.contains_key("title"));
        assert_eq!(parsed.values.get("loud"), Some(&json!(false)));
        assert_eq!(parsed.values.get("times"), Some(&json!(1)));
    }

    #[test]
    fn test_parse_given_values() {
        let parsed = parse(&greet(), &argv(&["Ada", "Dr", "-l", "--times", "3"])).unwrap();
        assert_eq!(parsed.arguments.get("name"), Some(&json!("Ada")));
        assert_eq!(parsed.arguments.get("title"), Some(&json!("Dr")));
        assert_eq!(parsed.values.get("loud"), Some(&json!(true)));
        assert_eq!(parsed.values.get("times"), Some(&json!("3")));
    }

    #[test]
    fn test_unknown_option_is_an_error() {
        assert!(parse(&greet(), &argv(&["--nope"])).is_err());
        assert!(parse(&greet(), &argv(&["a", "b", "c"])).is_err());
    }
}
