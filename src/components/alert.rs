// src/components/alert.rs

//! Bordered alert boxes.

use crate::components::icon::{Icon, IconChoice, icon_prefix};
use crate::constants::{ALERT_PADDING, ALERT_WRAP_WIDTH};
use crate::core::console::Console;
use crate::ui::formats::wrap_text;
use dialoguer::console::measure_text_width;

/// Boxed, bordered messages.
#[derive(Debug, Clone, Copy)]
pub struct Alert<'a> {
    console: &'a Console,
}

fn border_style(kind: &str) -> &'static str {
    match kind {
        "info" => "cyan",
        "success" => "green",
        "warning" => "yellow",
        "error" | "danger" => "red",
        "primary" => "blue",
        "secondary" => "gray",
        "dark" => "black",
        _ => "white",
    }
}

fn title_style(kind: &str) -> &'static str {
    match kind {
        "info" => "boldCyan",
        "success" => "boldGreen",
        "warning" => "boldYellow",
        "error" | "danger" => "boldRed",
        "primary" => "boldBlue",
        "secondary" => "boldGray",
        "light" => "boldBlack",
        _ => "boldWhite",
    }
}

fn message_style(kind: &str) -> &'static str {
    match kind {
        "light" => "black",
        "dark" => "white",
        other => border_style(other),
    }
}

impl<'a> Alert<'a> {
    /// Alerts written through `console`.
    pub fn new(console: &'a Console) -> Self {
        Self { console }
    }

    /// A cyan box titled `INFO`.
    ///
    /// `title` replaces the default title. The message wraps at 60 columns and the
    /// box grows to fit the widest line.
    pub fn info(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("info", "INFO", message, title, icon)
    }

    /// A green box titled `SUCCESS`.
    pub fn success(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("success", "SUCCESS", message, title, icon)
    }

    /// A yellow box titled `WARNING`.
    pub fn warning(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("warning", "WARNING", message, title, icon)
    }

    /// A red box titled `ERROR`.
    pub fn error(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("error", "ERROR", message, title, icon)
    }

    /// Same rendering as [`Alert::error`].
    pub fn danger(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.error(message, title, icon)
    }

    /// A blue box titled `ALERT`.
    pub fn primary(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("primary", "ALERT", message, title, icon)
    }

    /// A gray box titled `NOTE`.
    pub fn secondary(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("secondary", "NOTE", message, title, icon)
    }

    /// A black box titled `ALERT` with white text.
    pub fn dark(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("dark", "ALERT", message, title, icon)
    }

    /// A white box titled `NOTE` with black text.
    pub fn light(&self, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        self.builtin("light", "NOTE", message, title, icon)
    }

    /// An alert with the colours of `kind` (unknown kinds are white) and no default icon.
    pub fn custom(&self, message: &str, kind: &str, title: &str, icon: IconChoice) -> &Self {
        let icon = self.console.components().resolve_icon(&icon, None);
        self.render(message, kind, title, icon.as_deref());
        self
    }

    fn builtin(&self, kind: &str, default_title: &str, message: &str, title: Option<&str>, icon: IconChoice) -> &Self {
        let icon = self.console.components().resolve_icon(&icon, Icon::for_kind(kind));
        self.render(message, kind, title.unwrap_or(default_title), icon.as_deref());
        self
    }

    fn render(&self, message: &str, kind: &str, title: &str, icon: Option<&str>) {
        let display_title = format!("{}{}", icon_prefix(icon), title);
        let title_width = measure_text_width(title) + if icon.is_some() { 2 } else { 0 };
        let width = measure_text_width(message).max(title_width + 2) + ALERT_PADDING;
        let border = "*".repeat(width);

        let mut writer = self.console.writer();
        writer.eol(1);
        writer.styled(border_style(kind), &border);
        writer.eol(1);

        let title_line = format!("{pad}*  {display_title}  *{pad}", pad = " ".repeat(5));
        writer.styled(title_style(kind), &title_line);
        writer.eol(1);

        for line in wrap_text(message, ALERT_WRAP_WIDTH) {
            writer.styled(message_style(kind), &format!("*  {}  *    ", line));
            writer.eol(1);
        }

        writer.styled(border_style(kind), &border);
        writer.eol(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::writer::{MemorySink, Writer};

    fn console() -> (Console, MemorySink) {
        let sink = MemorySink::new();
        let console = Console::with_writer("t", "1", Writer::with_sink(Box::new(sink.clone())));
        (console, sink)
    }

    #[test]
    fn test_alert_layout() {
        let (console, sink) = console();
        Alert::new(&console).info("Disk almost full", None, IconChoice::Default);

        let out = sink.contents();
        let lines: Vec<&str> = out.lines().collect();
        // "Disk almost full" is 16 wide; the title "INFO" needs 6; plus 12.
        assert_eq!(lines[1], "*".repeat(28));
        assert_eq!(lines[2], "     *  INFO  *     ");
        assert_eq!(lines[3], "*  Disk almost full  *    ");
        assert_eq!(lines[4], "*".repeat(28));
    }

    #[test]
    fn test_alert_icons_and_titles() {
        let (console, sink) = console();
        console.components().show_default_icons(true);
        Alert::new(&console).danger("x", None, IconChoice::Default);
        assert!(sink.contents().contains("*  ✗ ERROR  *"));

        sink.clear();
        Alert::new(&console).secondary("x", Some("FYI"), IconChoice::None);
        assert!(sink.contents().contains("*  FYI  *"));

        sink.clear();
        Alert::new(&console).custom("x", "teal", "CUSTOM", IconChoice::Default);
        assert!(sink.contents().contains("*  CUSTOM  *"));
    }

    #[test]
    fn test_long_messages_wrap() {
        let (console, sink) = console();
        let message = "word ".repeat(30);
        Alert::new(&console).light(message.trim(), None, IconChoice::Default);
        let body: Vec<String> = sink
            .contents()
            .lines()
            .filter(|l| l.starts_with("*  word"))
            .map(String::from)
            .collect();
        assert_eq!(body.len(), 3);
    }
}
