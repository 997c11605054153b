// src/cli/help.rs

//! Help and version screens.

use crate::constants::{GLOBAL_FLAG_DEBUG, GLOBAL_FLAG_NO_COLORS};
use crate::core::command::pad;
use crate::core::console::Console;
use crate::core::registry::CommandEntry;
use crate::models::{CommandDefinition, Flag, Value};
use crate::ui::writer::Writer;
use std::collections::BTreeMap;

fn display_default(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn with_default(description: &str, default: Option<&Value>) -> String {
    match default.filter(|v| !v.is_null()) {
        Some(value) => format!("{} [{}: {}]", description, t!("cli.help.default"), display_default(value)),
        None => description.to_string(),
    }
}

/// Writes `(label, description)` rows aligned on the widest label, alternating
/// the even and odd styles.
fn write_rows(writer: &mut Writer, rows: &[(String, String)]) {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (index, (label, description)) in rows.iter().enumerate() {
        let parity = if index % 2 == 0 { "even" } else { "odd" };
        writer.styled(&format!("help_item_{}", parity), &pad(label, width, 2, 2));
        writer.styled(&format!("help_description_{}", parity), description);
        writer.eol(1);
    }
}

fn command_label(definition: &CommandDefinition) -> String {
    if definition.alias.is_empty() {
        definition.name.clone()
    } else {
        format!("{}, {}", definition.name, definition.alias)
    }
}

/// The application help screen: logo, header, usage, global options, commands
/// by group and footer.
pub fn show_application_help(console: &Console) {
    let mut writer = console.writer();

    if let Some(logo) = console.logo() {
        writer.styled("logo", logo);
        writer.eol(1);
    }
    if console.flag(Flag::Header) {
        let header = console.headtitle().map_or_else(
            || format!(t!("cli.help.header_version"), name = console.name(), version = console.version()),
            str::to_string,
        );
        writer.eol(1);
        writer.styled("help_header", &header);
        writer.eol(2);
    }

    writer.styled("help_category", t!("cli.help.usage"));
    writer.eol(1);
    writer.styled("help_usage", &format!("  {} {}", console.name(), t!("cli.help.usage_line")));
    writer.eol(2);

    writer.styled("help_category", t!("cli.help.global_options"));
    writer.eol(1);
    write_rows(
        &mut writer,
        &[
            ("-h, --help".to_string(), t!("cli.help.opt_help").to_string()),
            ("-V, --version".to_string(), t!("cli.help.opt_version").to_string()),
            (GLOBAL_FLAG_DEBUG.to_string(), t!("cli.help.opt_debug").to_string()),
            (GLOBAL_FLAG_NO_COLORS.to_string(), t!("cli.help.opt_no_colors").to_string()),
        ],
    );
    writer.eol(1);

    let mut groups: BTreeMap<&str, Vec<&CommandEntry>> = BTreeMap::new();
    for entry in console.commands() {
        groups.entry(entry.definition.group.as_str()).or_default().push(entry);
    }

    writer.styled("help_category", t!("cli.help.commands"));
    writer.eol(1);
    for (group, entries) in groups {
        let title = if group.is_empty() { t!("cli.help.ungrouped") } else { group };
        writer.styled("help_group", &format!(" {}", title));
        writer.eol(1);
        let mut rows: Vec<(String, String)> = entries
            .iter()
            .map(|e| (command_label(&e.definition), e.definition.description.clone()))
            .collect();
        rows.sort();
        write_rows(&mut writer, &rows);
    }

    if console.flag(Flag::Footer) {
        writer.eol(1);
        writer.styled("help_footer", t!("cli.help.footer"));
        writer.eol(1);
    }
}

/// Help for one command: description, usage, alias, arguments and options.
pub fn show_command_help(console: &Console, definition: &CommandDefinition) {
    let mut writer = console.writer();

    if !definition.description.is_empty() {
        writer.styled("help_category", t!("cli.help.description"));
        writer.eol(1);
        writer.styled("help_text", &format!("  {}", definition.description));
        writer.eol(2);
    }

    writer.styled("help_category", t!("cli.help.usage"));
    writer.eol(1);
    let usage = if definition.usage.is_empty() {
        let arguments: String = definition
            .arguments
            .iter()
            .map(|a| format!(" [<{}>]", a.name))
            .collect();
        format!("{} [options]{}", definition.name, arguments)
    } else {
        definition.usage.clone()
    };
    writer.styled("help_usage", &format!("  {}", usage));
    writer.eol(2);

    if !definition.alias.is_empty() {
        writer.styled("help_category", t!("cli.help.aliases"));
        writer.eol(1);
        writer.styled("help_summary", &format!("  {}", definition.alias));
        writer.eol(2);
    }

    if !definition.arguments.is_empty() {
        writer.styled("help_category", t!("cli.help.arguments"));
        writer.eol(1);
        let rows: Vec<(String, String)> = definition
            .arguments
            .iter()
            .map(|a| (a.name.clone(), with_default(&a.description, a.default.as_ref())))
            .collect();
        write_rows(&mut writer, &rows);
        writer.eol(1);
    }

    if !definition.options.is_empty() {
        writer.styled("help_category", t!("cli.help.options"));
        writer.eol(1);
        let rows: Vec<(String, String)> = definition
            .options
            .iter()
            .map(|o| (o.flags.clone(), with_default(&o.description, o.default.as_ref())))
            .collect();
        write_rows(&mut writer, &rows);
    }
}

/// The `<name> version <version>` line.
pub fn show_version(console: &Console) {
    let line = format!(t!("cli.version.line"), name = console.name(), version = console.version());
    console.writer().styled("version", &line);
    console.writer().eol(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::{Command, Context};
    use crate::models::{ArgumentDef, OptionDef};
    use crate::ui::writer::MemorySink;

    // --- Setup ---
    struct Deploy;

    impl Command for Deploy {
        fn definition(&self) -> CommandDefinition {
            CommandDefinition::new("deploy")
                .group("Ops")
                .alias("d")
                .description("Ship it")
                .argument(ArgumentDef::new("target", "Where").with_default("prod"))
                .option(OptionDef::new("-f, --force", "No questions"))
        }

        fn handle(&mut self, _: &mut Context<'_>) -> anyhow::Result<Value> {
            Ok(Value::Null)
        }
    }

    fn setup() -> (Console, MemorySink) {
        let sink = MemorySink::new();
        let mut console = Console::with_writer("app", "2.0", Writer::with_sink(Box::new(sink.clone())));
        console.register_instance("ops.deploy", Box::new(Deploy)).unwrap();
        (console, sink)
    }

    #[test]
    fn test_application_help() {
        let (mut console, sink) = setup();
        console.set_flag(Flag::Footer, true);
        show_application_help(&console);
        let out = sink.contents();
        assert!(out.starts_with("\napp, version 2.0\n\n"));
        assert!(out.contains(" Ops\n  deploy, d  Ship it\n"));
        assert!(out.contains("--no-colors"));
        assert!(out.ends_with("Run `<command> --help` for specific help\n"));

        sink.clear();
        console.set_headtitle("My App");
        console.set_flag(Flag::Header, false);
        show_application_help(&console);
        assert!(!sink.contents().contains("My App"));
    }

    #[test]
    fn test_command_help() {
        let (console, sink) = setup();
        let definition = Deploy.definition();
        show_command_help(&console, &definition);
        let out = sink.contents();
        assert!(out.contains("  deploy [options] [<target>]\n"));
        assert!(out.contains("  target  Where [default: prod]\n"));
        assert!(out.contains("  -f, --force  No questions\n"));
        assert!(out.contains("Alias:\n  d\n"));
    }

    #[test]
    fn test_version_line() {
        let (console, sink) = setup();
        show_version(&console);
        assert_eq!(sink.contents(), "app version 2.0\n");
    }
}
