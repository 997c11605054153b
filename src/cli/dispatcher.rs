// src/cli/dispatcher.rs

//! Routing argv to help, version or a command.

use crate::cli::args::{self, GlobalFlags};
use crate::cli::help;
use crate::constants::{EXIT_COMMAND_NOT_FOUND, EXIT_FAILURE};
use crate::core::console::Console;
use crate::core::errors::ConsoleError;
use crate::models::{Flag, ParamMap, Value};
use log::debug;

/// Routes `argv` (without the binary name) to a command and returns the
/// process exit code.
///
/// Routing order:
/// 1. No arguments: the default command when one is set, else the help screen.
/// 2. `--help` / `--version` as the first argument.
/// 3. `<command> --help`: that command's help.
/// 4. `<command> [args...]`: parse with clap, then run with `suppress = false`.
pub fn handle(console: &Console, argv: Vec<String>) -> i32 {
    let (flags, argv) = args::strip_global_flags(argv);
    apply_global_flags(console, flags);
    debug!("Dispatching args: {:?}", argv);

    let Some((first, rest)) = argv.split_first() else {
        return match console.default_command() {
            Some(identity) => run(console, identity, &[]),
            None => {
                help::show_application_help(console);
                0
            }
        };
    };

    if args::is_help_flag(first) {
        help::show_application_help(console);
        return 0;
    }
    if args::is_version_flag(first) {
        help::show_version(console);
        return 0;
    }
    run(console, first, rest)
}

fn apply_global_flags(console: &Console, flags: GlobalFlags) {
    if flags.debug {
        console.set_flag(Flag::Debug, true);
    }
    if flags.no_colors {
        console.writer().set_colors(false);
    }
}

fn run(console: &Console, key: &str, rest: &[String]) -> i32 {
    let Some(entry) = console.find(key) else {
        report_unknown(console, key);
        return EXIT_COMMAND_NOT_FOUND;
    };

    if rest.iter().any(|arg| args::is_help_flag(arg)) {
        help::show_command_help(console, &entry.definition);
        return 0;
    }

    let parsed = match args::parse(&entry.definition, rest) {
        Ok(parsed) => parsed,
        Err(err) => {
            let mut writer = console.writer();
            writer.styled("error", err.to_string().trim_end());
            writer.eol(1);
            return EXIT_FAILURE;
        }
    };
    entry.set_parsed(parsed);

    match entry.invoke(console, ParamMap::new(), ParamMap::new(), false) {
        Ok(value) => exit_code_of(&value),
        Err(err) => report_failure(console, &err),
    }
}

/// Integer results that fit an `i32` become the exit code; anything else is success.
fn exit_code_of(value: &Value) -> i32 {
    value
        .as_i64()
        .and_then(|code| i32::try_from(code).ok())
        .unwrap_or(0)
}

fn report_unknown(console: &Console, key: &str) {
    let mut writer = console.writer();
    writer.styled("error", &format!(t!("cli.error.command_not_found"), name = key));
    writer.eol(2);
    writer.styled("comment", t!("cli.error.available_commands"));
    writer.eol(1);
    for entry in console.commands() {
        writer.writeln(&format!("  {}", entry.name));
    }
}

fn report_failure(console: &Console, err: &anyhow::Error) -> i32 {
    let mut writer = console.writer();
    writer.styled("error", &format!("{}: {}", t!("cli.error.label"), err));
    writer.eol(1);
    if console.flag(Flag::Debug) {
        for cause in err.chain().skip(1) {
            writer.styled("comment", &format!("  {} {}", t!("cli.error.debug_trace"), cause));
            writer.eol(1);
        }
    }
    err.downcast_ref::<ConsoleError>()
        .map_or(EXIT_FAILURE, ConsoleError::exit_code)
}
