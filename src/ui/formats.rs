// src/ui/formats.rs

//! Output helpers on [`Context`]: status lines, styled text, lists, tables and layout.

use crate::components::icon::IconChoice;
use crate::core::command::Context;
use crate::system::terminal;
use crate::ui::cursor::Cursor;
use crate::ui::progress::ProgressBar;
use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use dialoguer::console::measure_text_width;
use serde_json::Value;
use std::thread;
use std::time::Duration;

const COUNTER_TICK: Duration = Duration::from_millis(50);
const TAB: &str = "    ";

/// Greedy word wrap. Existing line breaks are kept and words longer than
/// `width` are cut.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while measure_text_width(&word) > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let cut = word
                    .char_indices()
                    .nth(width)
                    .map_or(word.len(), |(i, _)| i);
                let rest = word.split_off(cut);
                lines.push(word);
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            if current.is_empty() {
                current = word;
            } else if measure_text_width(&current) + 1 + measure_text_width(&word) <= width {
                current.push(' ');
                current.push_str(&word);
            } else {
                lines.push(std::mem::replace(&mut current, word));
            }
        }
        lines.push(current);
    }
    lines
}

/// `first ..... second`, filling `width` columns with dots.
pub fn justify_line(first: &str, second: &str, width: usize) -> String {
    let used = measure_text_width(first) + measure_text_width(second) + 2;
    let dots = width.saturating_sub(used).max(1);
    format!("{} {} {}", first, ".".repeat(dots), second)
}

/// `text` framed by `sep` on both sides so the whole line spans `width`.
pub fn center_line(text: &str, sep: char, width: usize) -> String {
    let side = width.saturating_sub(measure_text_width(text) + 2) / 2;
    let repeater = sep.to_string().repeat(side);
    format!("{} {} {}", repeater, text, repeater)
}

// --- Output helpers ---

impl<'a> Context<'a> {
    /// Writes text as-is, without a line break.
    pub fn write(&self, text: &str) -> &Self {
        self.writer().write(text);
        self
    }

    /// Writes a line.
    pub fn line(&self, message: &str) -> &Self {
        self.writer().writeln(message);
        self
    }

    /// Writes `count` line breaks.
    pub fn eol(&self, count: usize) -> &Self {
        self.writer().eol(count);
        self
    }

    /// Writes one line break.
    pub fn new_line(&self) -> &Self {
        self.eol(1)
    }

    /// Writes `count` tab stops of four spaces.
    pub fn tab(&self, count: usize) -> &Self {
        self.write(&TAB.repeat(count))
    }

    /// Clears the terminal.
    pub fn clear_screen(&self) -> &Self {
        self.writer().raw(Cursor.clear());
        self
    }

    // --- Status lines ---

    /// An `INFO` status line.
    pub fn info(&self, message: &str) -> &Self {
        self.status("info", message, true, None)
    }

    /// A `SUCCESS` status line.
    pub fn success(&self, message: &str) -> &Self {
        self.status("success", message, true, None)
    }

    /// A `WARNING` status line.
    pub fn warning(&self, message: &str) -> &Self {
        self.status("warning", message, true, None)
    }

    /// Alias of [`Context::warning`].
    pub fn warn(&self, message: &str) -> &Self {
        self.warning(message)
    }

    /// An `ERROR` status line.
    pub fn error(&self, message: &str) -> &Self {
        self.status("error", message, true, None)
    }

    /// A status line for `kind` (`info`, `success`, `warning` or `error`).
    ///
    /// With `badge` the label is drawn as a filled badge, otherwise as bold
    /// text in the kind's colour.
    pub fn status(&self, kind: &str, message: &str, badge: bool, label: Option<&str>) -> &Self {
        if badge {
            let badges = self.badge();
            match kind {
                "success" => badges.success(message, label, IconChoice::None),
                "warning" | "warn" => badges.warning(message, label, IconChoice::None),
                "error" => badges.error(message, label, IconChoice::None),
                _ => badges.info(message, label, IconChoice::None),
            };
            return self;
        }

        let (style, default_label) = match kind {
            "success" => ("okBold", "SUCCESS"),
            "warning" | "warn" => ("warnBold", "WARNING"),
            "error" => ("errorBold", "ERROR"),
            _ => ("infoBold", "INFO"),
        };
        let mut writer = self.writer();
        writer.styled(style, label.unwrap_or(default_label));
        writer.writeln(&format!(" {}", message));
        drop(writer);
        self
    }

    /// A line in the `comment` style.
    pub fn comment(&self, message: &str) -> &Self {
        self.colorize(message, "comment", true)
    }

    /// A line in the `question` style.
    pub fn question(&self, message: &str) -> &Self {
        self.colorize(message, "question", true)
    }

    /// A line in the `ok` style.
    pub fn ok(&self, message: &str) -> &Self {
        self.colorize(message, "ok", true)
    }

    /// `FAIL: message` in the `error` style.
    pub fn fail(&self, message: &str) -> &Self {
        self.colorize(&format!("FAIL: {}", message), "error", true)
    }

    /// `NOTE: message`, dimmed.
    pub fn note(&self, message: &str) -> &Self {
        self.colorize(&format!("NOTE: {}", message), "comment", true)
    }

    /// `NOTICE: message` in the `info` style.
    pub fn notice(&self, message: &str) -> &Self {
        self.colorize(&format!("NOTICE: {}", message), "info", true)
    }

    /// `CAUTION: message` in the `warn` style.
    pub fn caution(&self, message: &str) -> &Self {
        self.colorize(&format!("CAUTION: {}", message), "warn", true)
    }

    /// `DEBUG: message`, dimmed.
    pub fn debug(&self, message: &str) -> &Self {
        self.colorize(&format!("DEBUG: {}", message), "comment", true)
    }

    // --- Styling ---

    /// Writes `message` in any style the theme resolves, including composite
    /// names such as `boldWhiteBgRed`.
    pub fn colorize(&self, message: &str, style: &str, eol: bool) -> &Self {
        let mut writer = self.writer();
        writer.styled(style, message);
        if eol {
            writer.eol(1);
        }
        drop(writer);
        self
    }

    /// Writes `message` in bold, with a line break when `eol` is set.
    pub fn bold(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "bold", eol)
    }

    /// Writes `message` in italic, with a line break when `eol` is set.
    pub fn italic(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "italic", eol)
    }

    /// Writes `message` in underline, with a line break when `eol` is set.
    pub fn underline(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "underline", eol)
    }

    /// Writes `message` in strikethrough, with a line break when `eol` is set.
    pub fn strike(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "strike", eol)
    }

    /// Writes `message` in red.
    pub fn red(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "red", eol)
    }

    /// Writes `message` in green.
    pub fn green(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "green", eol)
    }

    /// Writes `message` in blue.
    pub fn blue(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "blue", eol)
    }

    /// Writes `message` in yellow.
    pub fn yellow(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "yellow", eol)
    }

    /// Writes `message` in magenta.
    pub fn magenta(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "magenta", eol)
    }

    /// Writes `message` in cyan.
    pub fn cyan(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "cyan", eol)
    }

    /// Writes `message` in gray.
    pub fn gray(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "gray", eol)
    }

    /// Writes `message` in black.
    pub fn black(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "black", eol)
    }

    /// Writes `message` in white.
    pub fn white(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "white", eol)
    }

    /// Writes `message` in purple.
    pub fn purple(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "purple", eol)
    }

    /// Writes `message` in indigo.
    pub fn indigo(&self, message: &str, eol: bool) -> &Self {
        self.colorize(message, "indigo", eol)
    }

    // --- Blocks ---

    /// Items prefixed with `•`, under an optional title in `color`.
    pub fn bullet_list<S: AsRef<str>>(&self, items: &[S], title: Option<&str>, color: &str) -> &Self {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.colorize(title, color, true);
        }
        let mut writer = self.writer();
        for item in items {
            writer.writeln(&format!("  • {}", item.as_ref()));
        }
        drop(writer);
        self
    }

    /// Items numbered from 1, under an optional title in `color`.
    pub fn numbered_list<S: AsRef<str>>(&self, items: &[S], title: Option<&str>, color: &str) -> &Self {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.colorize(title, color, true);
        }
        let mut writer = self.writer();
        for (index, item) in items.iter().enumerate() {
            writer.markup(&format!("  <green>{}.</end> {}", index + 1, item.as_ref()));
            writer.eol(1);
        }
        drop(writer);
        self
    }

    /// A single-line message framed by stars.
    pub fn alert_message(&self, message: &str, color: &str) -> &Self {
        let border = "*".repeat(measure_text_width(message) + 12);
        self.new_line()
            .colorize(&border, color, true)
            .colorize(&format!("*     {}     *", message), color, true)
            .colorize(&border, color, true)
            .new_line()
    }

    /// Announces the task being run, then optionally pauses.
    pub fn task(&self, task: &str, pause: Option<Duration>) -> &Self {
        self.line(&format!(">> {}", task));
        if let Some(pause) = pause {
            thread::sleep(pause);
        }
        self
    }

    /// Renders rows under a header row.
    pub fn table<H, C>(&self, headers: &[H], rows: &[Vec<C>]) -> &Self
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        if !headers.is_empty() {
            table.set_header(headers.iter().map(|h| h.as_ref()));
        }
        for row in rows {
            table.add_row(row.iter().map(|c| c.as_ref()));
        }
        self.line(&format!("{table}"))
    }

    /// Pretty-prints a JSON value.
    pub fn json(&self, value: &Value) -> &Self {
        let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        self.line(&rendered)
    }

    /// A horizontal rule, as wide as the terminal unless `length` is given.
    pub fn border(&self, length: Option<usize>, ch: char) -> &Self {
        let length = length.filter(|l| *l > 0).unwrap_or_else(terminal::width);
        self.comment(&ch.to_string().repeat(length))
    }

    /// `text` centred between runs of `sep` across the terminal.
    pub fn center(&self, text: &str, sep: char) -> &Self {
        self.line(&center_line(text, sep, terminal::width()))
    }

    /// `first` and `second` at either end of the terminal, joined by dots.
    pub fn justify(&self, first: &str, second: &str) -> &Self {
        self.line(&justify_line(first, second, terminal::width()))
    }

    /// Animates a percentage from `start` to `end` in place.
    pub fn counter(&self, start: u32, end: u32, step: u32) -> &Self {
        let step = usize::try_from(step.max(1)).unwrap_or(1);
        for value in (start..=end).step_by(step) {
            self.write(&format!("{}{:>3}%", Cursor.col(-4), value));
            thread::sleep(COUNTER_TICK);
        }
        self.new_line()
    }

    /// A progress bar over `total` steps on this console.
    pub fn progress(&self, total: u64) -> ProgressBar<'a> {
        ProgressBar::new(self.console(), total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::Console;
    use crate::models::{CommandDefinition, Parameters};
    use crate::ui::writer::{MemorySink, Writer};
    use serde_json::json;

    // --- Setup ---
    fn setup() -> (Console, MemorySink) {
        let sink = MemorySink::new();
        let console = Console::with_writer("t", "1", Writer::with_sink(Box::new(sink.clone())));
        (console, sink)
    }

    fn run(check: impl FnOnce(&Context<'_>)) -> String {
        let (console, sink) = setup();
        let definition = CommandDefinition::new("fmt");
        let ctx = Context::new(&console, &definition, Parameters::default());
        check(&ctx);
        sink.contents()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("one\ntwo", 60), vec!["one", "two"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_justify_and_center() {
        assert_eq!(justify_line("a", "b", 10), "a ...... b");
        assert_eq!(justify_line("long", "text", 4), "long . text");
        assert_eq!(center_line("hi", '=', 10), "=== hi ===");
    }

    #[test]
    fn test_status_lines() {
        let out = run(|ctx| {
            ctx.info("ready").status("error", "broken", false, Some("E"));
        });
        assert_eq!(out, " INFO  ready\nE broken\n");
    }

    #[test]
    fn test_prefixed_lines() {
        let out = run(|ctx| {
            ctx.fail("x").note("y").caution("z");
        });
        assert_eq!(out, "FAIL: x\nNOTE: y\nCAUTION: z\n");
    }

    #[test]
    fn test_lists() {
        let out = run(|ctx| {
            ctx.bullet_list(&["a", "b"], Some("Items"), "yellow")
                .numbered_list(&["c"], None, "yellow");
        });
        assert_eq!(out, "Items\n  • a\n  • b\n  1. c\n");
    }

    #[test]
    fn test_alert_message() {
        let out = run(|ctx| {
            ctx.alert_message("Hey", "yellow");
        });
        let stars = "*".repeat(15);
        assert_eq!(out, format!("\n{stars}\n*     Hey     *\n{stars}\n\n"));
    }

    #[test]
    fn test_table_and_json() {
        let out = run(|ctx| {
            ctx.table(&["Name", "Age"], &[vec!["Ada", "36"]]).json(&json!({"a": 1}));
        });
        assert!(out.contains("Name"));
        assert!(out.contains("Ada"));
        assert!(out.ends_with("{\n  \"a\": 1\n}\n"));
    }

    #[test]
    fn test_fixed_border_and_task() {
        let out = run(|ctx| {
            ctx.border(Some(5), '=').task("build", None).tab(1).write("x");
        });
        assert_eq!(out, "=====\n>> build\n    x");
    }

    #[test]
    fn test_colorize_with_colours() {
        let (console, sink) = setup();
        console.writer().set_colors(true);
        let definition = CommandDefinition::new("fmt");
        let ctx = Context::new(&console, &definition, Parameters::default());
        ctx.red("r", false);
        assert_eq!(sink.contents(), "\x1b[31mr\x1b[0m");
    }
}
