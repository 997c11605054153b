// src/core/color.rs

//! ANSI colours and text styles.

use anyhow::{Result, anyhow};
use serde::Deserialize;

/// A terminal colour: the eight ANSI colours, gray, their bright variants, or
/// an index into the 256-colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub enum AnsiColor {
    /// SGR 30.
    Black,
    /// SGR 31.
    Red,
    /// SGR 32.
    Green,
    /// SGR 33.
    Yellow,
    /// SGR 34.
    Blue,
    /// SGR 35.
    Magenta,
    /// SGR 36.
    Cyan,
    /// SGR 37.
    White,
    /// Bright black, SGR 90.
    Gray,
    /// SGR 91.
    BrightRed,
    /// SGR 92.
    BrightGreen,
    /// SGR 93.
    BrightYellow,
    /// SGR 94.
    BrightBlue,
    /// SGR 95.
    BrightMagenta,
    /// SGR 96.
    BrightCyan,
    /// SGR 97.
    BrightWhite,
    /// Entry of the 256-colour palette.
    Fixed(u8),
}

/// How a colour is written in TOML: a palette index or a name.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Index(u8),
    Name(String),
}

impl TryFrom<ColorSpec> for AnsiColor {
    type Error = String;

    fn try_from(spec: ColorSpec) -> std::result::Result<Self, Self::Error> {
        match spec {
            ColorSpec::Index(i) => Ok(Self::Fixed(i)),
            ColorSpec::Name(name) => parse_color_name(&name).map_err(|e| e.to_string()),
        }
    }
}

/// Parses a color name string (e.g., "red", "bright_green", "208") into an `AnsiColor`.
///
/// # Errors
/// Fails for names that are neither a colour nor a palette index.
pub fn parse_color_name(name: &str) -> Result<AnsiColor> {
    let normalized = name.to_lowercase().replace(['_', '-', ' '], "");
    if let Ok(index) = normalized.parse::<u8>() {
        return Ok(AnsiColor::Fixed(index));
    }
    match normalized.as_str() {
        "black" => Ok(AnsiColor::Black),
        "red" => Ok(AnsiColor::Red),
        "green" => Ok(AnsiColor::Green),
        "yellow" => Ok(AnsiColor::Yellow),
        "blue" => Ok(AnsiColor::Blue),
        "magenta" => Ok(AnsiColor::Magenta),
        "cyan" => Ok(AnsiColor::Cyan),
        "white" => Ok(AnsiColor::White),
        "gray" | "grey" => Ok(AnsiColor::Gray),
        "brightred" => Ok(AnsiColor::BrightRed),
        "brightgreen" => Ok(AnsiColor::BrightGreen),
        "brightyellow" => Ok(AnsiColor::BrightYellow),
        "brightblue" => Ok(AnsiColor::BrightBlue),
        "brightmagenta" => Ok(AnsiColor::BrightMagenta),
        "brightcyan" => Ok(AnsiColor::BrightCyan),
        "brightwhite" => Ok(AnsiColor::BrightWhite),
        _ => Err(anyhow!("Unknown color name: '{}'", name)),
    }
}

impl AnsiColor {
    /// The bright variant of a base colour. Other colours are returned unchanged.
    pub fn brighten(self) -> Self {
        match self {
            Self::Black => Self::Gray,
            Self::Red => Self::BrightRed,
            Self::Green => Self::BrightGreen,
            Self::Yellow => Self::BrightYellow,
            Self::Blue => Self::BrightBlue,
            Self::Magenta => Self::BrightMagenta,
            Self::Cyan => Self::BrightCyan,
            Self::White => Self::BrightWhite,
            other => other,
        }
    }

    /// SGR parameter selecting this colour as foreground.
    pub fn fg_code(self) -> String {
        match self {
            Self::Fixed(i) => format!("38;5;{}", i),
            basic => basic.basic_code().to_string(),
        }
    }

    /// SGR parameter selecting this colour as background.
    pub fn bg_code(self) -> String {
        match self {
            Self::Fixed(i) => format!("48;5;{}", i),
            basic => (basic.basic_code() + 10).to_string(),
        }
    }

    fn basic_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Gray => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
            Self::Fixed(_) => 39,
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Foreground, background and text attributes applied to a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// Text colour.
    pub fg: Option<AnsiColor>,
    /// Background colour.
    pub bg: Option<AnsiColor>,
    /// Bold, SGR 1.
    pub bold: bool,
    /// Faint, SGR 2.
    pub dim: bool,
    /// Italic, SGR 3.
    pub italic: bool,
    /// Underline, SGR 4.
    pub underline: bool,
    /// Strikethrough, SGR 9.
    pub strike: bool,
}

impl Style {
    /// The plain style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text colour.
    pub fn fg(mut self, color: AnsiColor) -> Self {
        self.fg = Some(color);
        self
    }

    /// Sets the background colour.
    pub fn on(mut self, color: AnsiColor) -> Self {
        self.bg = Some(color);
        self
    }

    /// Adds bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Adds dim.
    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Adds italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Adds underline.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Adds strikethrough.
    pub fn strike(mut self) -> Self {
        self.strike = true;
        self
    }

    /// Whether the style changes nothing.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Layers `other` on top of `self`: colours set in `other` win, attributes add up.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strike: self.strike || other.strike,
        }
    }

    /// The SGR sequence that switches this style on, or an empty string for a plain style.
    pub fn prefix(&self) -> String {
        let mut codes: Vec<String> = Vec::new();
        if self.bold {
            codes.push("1".into());
        }
        if self.dim {
            codes.push("2".into());
        }
        if self.italic {
            codes.push("3".into());
        }
        if self.underline {
            codes.push("4".into());
        }
        if self.strike {
            codes.push("9".into());
        }
        if let Some(fg) = self.fg {
            codes.push(fg.fg_code());
        }
        if let Some(bg) = self.bg {
            codes.push(bg.bg_code());
        }
        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }

    /// Wraps `text` in this style's escape sequences.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        format!("{}{}{}", self.prefix(), text, RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_name() {
        assert_eq!(parse_color_name("Red").unwrap(), AnsiColor::Red);
        assert_eq!(parse_color_name("grey").unwrap(), AnsiColor::Gray);
        assert_eq!(parse_color_name("bright_green").unwrap(), AnsiColor::BrightGreen);
        assert_eq!(parse_color_name("208").unwrap(), AnsiColor::Fixed(208));
        assert!(parse_color_name("chartreuse").is_err());
    }

    #[test]
    fn test_paint_sequences() {
        let style = Style::new().fg(AnsiColor::White).on(AnsiColor::Red).bold();
        assert_eq!(style.paint("hi"), "\x1b[1;37;41mhi\x1b[0m");

        let fixed = Style::new().fg(AnsiColor::Fixed(208));
        assert_eq!(fixed.paint("x"), "\x1b[38;5;208mx\x1b[0m");

        assert_eq!(Style::new().paint("plain"), "plain");
    }

    #[test]
    fn test_merge_layers_colours_and_attributes() {
        let base = Style::new().fg(AnsiColor::Green).italic();
        let top = Style::new().fg(AnsiColor::Red).bold();
        let merged = base.merge(&top);
        assert_eq!(merged.fg, Some(AnsiColor::Red));
        assert!(merged.bold && merged.italic);
    }

    #[test]
    fn test_style_from_toml() {
        let style: Style = toml::from_str("fg = 201\nbg = \"black\"\nbold = true").unwrap();
        assert_eq!(style.fg, Some(AnsiColor::Fixed(201)));
        assert_eq!(style.bg, Some(AnsiColor::Black));
        assert!(style.bold);
    }
}
