// src/ui/writer.rs

//! Themed output with capture buffers and inline markup.

use crate::core::color::Style;
use crate::core::theme::Theme;
use lazy_static::lazy_static;
use log::warn;
use regex::{Captures, Regex};
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

lazy_static! {
    // `<style>text</end>`; the style name is resolved against the theme.
    static ref MARKUP_RE: Regex = Regex::new(r"(?s)<([A-Za-z][A-Za-z0-9_]*)>(.*?)</end>").unwrap();
}

/// Themed output sink with a stack of capture buffers.
///
/// While at least one buffer is pushed, everything written lands in the
/// innermost buffer instead of the sink.
pub struct Writer {
    sink: Box<dyn Write>,
    buffers: Vec<String>,
    theme: Theme,
    use_colors: bool,
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("buffers", &self.buffers.len())
            .field("theme", &self.theme.name())
            .field("use_colors", &self.use_colors)
            .finish()
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Writer {
    /// A writer on standard output. Colours follow `colored`'s detection
    /// (`NO_COLOR`, `CLICOLOR_FORCE`, TTY).
    pub fn stdout() -> Self {
        Self {
            sink: Box::new(io::stdout()),
            buffers: Vec::new(),
            theme: Theme::default(),
            use_colors: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    /// A writer on an arbitrary sink, colours off.
    pub fn with_sink(sink: Box<dyn Write>) -> Self {
        Self {
            sink,
            buffers: Vec::new(),
            theme: Theme::default(),
            use_colors: false,
        }
    }

    /// The theme styles are resolved against.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Mutable access to the theme, e.g. to define styles.
    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    /// Replaces the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Whether styles emit escape sequences.
    pub fn colors_enabled(&self) -> bool {
        self.use_colors
    }

    /// Turns escape sequences on or off. Text is written either way.
    pub fn set_colors(&mut self, enabled: bool) {
        self.use_colors = enabled;
    }

    // --- Capture buffers ---

    /// Starts capturing into a new innermost buffer.
    pub fn push_buffer(&mut self) {
        self.buffers.push(String::new());
    }

    /// Removes the innermost buffer and returns what was written into it.
    pub fn pop_buffer(&mut self) -> Option<String> {
        self.buffers.pop()
    }

    /// Whether output is being captured.
    pub fn is_buffering(&self) -> bool {
        !self.buffers.is_empty()
    }

    /// Number of nested capture buffers.
    pub fn buffer_depth(&self) -> usize {
        self.buffers.len()
    }

    // --- Writing ---

    /// Writes text as-is.
    pub fn write(&mut self, text: &str) {
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.push_str(text);
            return;
        }
        let result = self
            .sink
            .write_all(text.as_bytes())
            .and_then(|()| self.sink.flush());
        if let Err(e) = result {
            warn!("Failed to write to console output: {}", e);
        }
    }

    /// Writes text and a newline.
    pub fn writeln(&mut self, text: &str) {
        self.write(text);
        self.eol(1);
    }

    /// Writes `count` newlines.
    pub fn eol(&mut self, count: usize) {
        self.write(&"\n".repeat(count));
    }

    /// Writes text without styling or markup processing.
    pub fn raw(&mut self, text: &str) {
        self.write(text);
    }

    /// Writes text painted with a named style.
    pub fn styled(&mut self, style_name: &str, text: &str) {
        let painted = self.paint(style_name, text);
        self.write(&painted);
    }

    /// Writes markup after rendering it with [`Writer::colors`].
    pub fn markup(&mut self, markup: &str) {
        let rendered = self.colors(markup);
        self.write(&rendered);
    }

    // --- Rendering ---

    /// Paints text with a named style from the theme. Unknown names are bold.
    pub fn paint(&self, style_name: &str, text: &str) -> String {
        let style = self.theme.resolve(style_name);
        self.paint_style(&style, text)
    }

    /// Paints text with an explicit style, honouring the colour switch.
    pub fn paint_style(&self, style: &Style, text: &str) -> String {
        if self.use_colors {
            style.paint(text)
        } else {
            text.to_string()
        }
    }

    /// Renders inline markup: `<style>text</end>` spans and `<eol>` line breaks.
    /// Tags whose name is not a known style are left untouched.
    pub fn colors(&self, markup: &str) -> String {
        let with_breaks = markup.replace("<eol>", "\n");
        MARKUP_RE
            .replace_all(&with_breaks, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let name = caps.get(1).map_or("", |m| m.as_str());
                let text = caps.get(2).map_or("", |m| m.as_str());
                match self.theme.try_resolve(name) {
                    Some(style) => self.paint_style(&style, text),
                    None => whole.to_string(),
                }
            })
            .into_owned()
    }
}

/// In-memory sink, shared through `Rc` so the owner can read what was written.
#[derive(Debug, Clone, Default)]
pub struct MemorySink(Rc<RefCell<Vec<u8>>>);

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Forgets what was written.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_writer() -> (Writer, MemorySink) {
        let sink = MemorySink::new();
        (Writer::with_sink(Box::new(sink.clone())), sink)
    }

    #[test]
    fn test_write_goes_to_sink() {
        let (mut writer, sink) = memory_writer();
        writer.write("hello");
        writer.eol(2);
        assert_eq!(sink.contents(), "hello\n\n");
    }

    #[test]
    fn test_buffer_stack_isolates_captures() {
        let (mut writer, sink) = memory_writer();
        writer.push_buffer();
        writer.write("outer ");
        writer.push_buffer();
        writer.write("inner");
        assert_eq!(writer.buffer_depth(), 2);
        assert_eq!(writer.pop_buffer().as_deref(), Some("inner"));
        writer.write("again");
        assert_eq!(writer.pop_buffer().as_deref(), Some("outer again"));
        assert!(!writer.is_buffering());
        assert_eq!(sink.contents(), "");
    }

    #[test]
    fn test_colors_markup_without_colour() {
        let (writer, _) = memory_writer();
        assert_eq!(writer.colors("<info>Note</end>:<eol>done"), "Note:\ndone");
        assert_eq!(writer.colors("<sparkly>x</end>"), "<sparkly>x</end>");
    }

    #[test]
    fn test_colors_markup_with_colour() {
        let (mut writer, _) = memory_writer();
        writer.set_colors(true);
        assert_eq!(writer.colors("<red>x</end>"), "\x1b[31mx\x1b[0m");
        assert_eq!(
            writer.colors("a <boldWhiteBgRed>b</end> c"),
            "a \x1b[1;37;41mb\x1b[0m c"
        );
    }

    #[test]
    fn test_styled_respects_colour_switch() {
        let (mut writer, sink) = memory_writer();
        writer.styled("error", "boom");
        writer.set_colors(true);
        writer.styled("error", "boom");
        assert_eq!(sink.contents(), "boom\x1b[31mboom\x1b[0m");
    }
}
