// src/core/theme.rs

//! Named styles, the built-in themes and theme files.

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_THEME, THEMES_DIR_NAME};
use crate::core::color::{AnsiColor, Style, parse_color_name};
use crate::core::errors::{ConsoleError, ConsoleResult};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("default", include_str!("../../themes/default.toml")),
    ("dark", include_str!("../../themes/dark.toml")),
    ("light", include_str!("../../themes/light.toml")),
    ("nord", include_str!("../../themes/nord.toml")),
    ("monokai", include_str!("../../themes/monokai.toml")),
    ("github", include_str!("../../themes/github.toml")),
    ("solarized", include_str!("../../themes/solarized.toml")),
    ("dracula", include_str!("../../themes/dracula.toml")),
];

/// On-disk shape of a theme file.
///
/// ```toml
/// name = "ocean"
/// extends = "dark"
///
/// [styles]
/// info = { fg = 39 }
/// error = { fg = "red", bold = true }
/// ```
#[derive(Deserialize, Debug)]
struct ThemeFile {
    name: Option<String>,
    extends: Option<String>,
    #[serde(default)]
    styles: HashMap<String, Style>,
}

/// A named table of styles.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    styles: HashMap<String, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(DEFAULT_THEME).unwrap_or_else(|_| Self::empty(DEFAULT_THEME))
    }
}

impl Theme {
    /// A theme without styles.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            styles: HashMap::new(),
        }
    }

    /// Names of the themes shipped with the crate.
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_THEMES.iter().map(|(name, _)| *name).collect()
    }

    /// Loads one of the themes shipped with the crate.
    ///
    /// # Errors
    /// Returns `ConsoleError::ThemeNotFound` for unknown names.
    pub fn builtin(name: &str) -> ConsoleResult<Self> {
        let (_, content) = BUILTIN_THEMES
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| ConsoleError::ThemeNotFound(name.to_string()))?;
        Self::parse(content, Path::new(name))
    }

    /// Parses a theme from TOML text.
    ///
    /// # Errors
    /// Returns `ConsoleError::ThemeParse` on malformed TOML and
    /// `ConsoleError::ThemeNotFound` when `extends` names an unknown built-in.
    pub fn from_toml_str(content: &str) -> ConsoleResult<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    /// Reads a theme file. `~` and environment variables in the path are expanded.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a parse error as in
    /// [`Theme::from_toml_str`].
    pub fn load(path: &Path) -> ConsoleResult<Self> {
        let raw = path.to_string_lossy();
        let expanded = PathBuf::from(
            shellexpand::full(&raw)
                .map(|p| p.into_owned())
                .unwrap_or_else(|_| raw.to_string()),
        );
        debug!("Loading theme from '{}'", expanded.display());
        let content = fs::read_to_string(&expanded)?;
        let mut theme = Self::parse(&content, &expanded)?;
        if theme.name.is_empty() {
            theme.name = expanded
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(theme)
    }

    /// Directory holding user themes: `<config_dir>/consola/themes`.
    pub fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(THEMES_DIR_NAME))
    }

    /// Finds a theme by path, built-in name, or name of a file in [`Theme::user_dir`].
    ///
    /// # Errors
    /// Returns `ConsoleError::ThemeNotFound` when nothing matches.
    pub fn find(name: &str) -> ConsoleResult<Self> {
        if name.ends_with(".toml") || name.contains(std::path::MAIN_SEPARATOR) {
            return Self::load(Path::new(name));
        }
        if let Ok(theme) = Self::builtin(name) {
            return Ok(theme);
        }
        let candidate = Self::user_dir().map(|d| d.join(format!("{}.toml", name)));
        match candidate {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Err(ConsoleError::ThemeNotFound(name.to_string())),
        }
    }

    fn parse(content: &str, origin: &Path) -> ConsoleResult<Self> {
        let file: ThemeFile = toml::from_str(content).map_err(|source| ConsoleError::ThemeParse {
            path: origin.to_path_buf(),
            source,
        })?;

        let mut theme = match file.extends.as_deref() {
            Some(parent) => Self::builtin(parent)?,
            None => Self::empty(""),
        };
        theme.name = file.name.unwrap_or_default();
        theme.styles.extend(file.styles);
        Ok(theme)
    }

    /// The theme's name; empty for inline themes without one.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defines (or replaces) one or more styles. Several names may be given
    /// separated by `|`.
    pub fn define(&mut self, names: &str, style: Style) {
        for name in names.split('|').map(str::trim).filter(|n| !n.is_empty()) {
            self.styles.insert(name.to_string(), style);
        }
    }

    /// The style defined under exactly `name`.
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Whether `name` is defined on this theme.
    pub fn has_style(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// A colour as this theme sees it: a style of that name overrides the ANSI colour.
    pub fn color(&self, name: &str) -> Option<AnsiColor> {
        self.styles
            .get(name)
            .and_then(|s| s.fg)
            .or_else(|| parse_color_name(name).ok())
    }

    /// Resolves a style name: exact theme entries first, then composite names
    /// such as `boldWhiteBgRed`, `brightCyan` or `infoBold`.
    pub fn try_resolve(&self, name: &str) -> Option<Style> {
        if let Some(style) = self.styles.get(name) {
            return Some(*style);
        }
        if let Ok(color) = parse_color_name(name) {
            return Some(Style::new().fg(color));
        }

        let words = split_camel_case(name);
        if words.len() < 2 {
            return None;
        }

        let mut style = Style::new();
        let mut iter = words.iter().map(String::as_str);
        while let Some(word) = iter.next() {
            match word {
                "bold" => style.bold = true,
                "dim" => style.dim = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "strike" => style.strike = true,
                "bg" => {
                    let color = self.next_color(&mut iter)?;
                    style.bg = Some(color);
                }
                "bright" => {
                    let color = self.next_color(&mut iter)?;
                    style.fg = Some(color.brighten());
                }
                other => {
                    if let Some(named) = self.styles.get(other) {
                        style = style.merge(named);
                    } else {
                        style.fg = Some(parse_color_name(other).ok()?);
                    }
                }
            }
        }
        Some(style)
    }

    fn next_color<'a>(&self, iter: &mut impl Iterator<Item = &'a str>) -> Option<AnsiColor> {
        iter.next().and_then(|w| self.color(w))
    }

    /// Like [`Theme::try_resolve`] but unknown names fall back to bold.
    pub fn resolve(&self, name: &str) -> Style {
        self.try_resolve(name).unwrap_or_else(|| {
            debug!("Unknown style '{}', falling back to bold", name);
            Style::new().bold()
        })
    }
}

/// `boldWhiteBgRed` -> `["bold", "white", "bg", "red"]`.
fn split_camel_case(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_all_builtin_themes_parse() {
        for name in Theme::builtin_names() {
            let theme = Theme::builtin(name).unwrap();
            assert_eq!(theme.name(), name);
            assert!(theme.has_style("error"), "theme '{}' lacks 'error'", name);
            assert!(theme.has_style("help_header"));
        }
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("boldWhiteBgRed"), vec!["bold", "white", "bg", "red"]);
        assert_eq!(split_camel_case("infoBold"), vec!["info", "bold"]);
        assert_eq!(split_camel_case("help_header"), vec!["help", "header"]);
    }

    #[test]
    fn test_composite_resolution() {
        let theme = Theme::default();

        let style = theme.resolve("boldWhiteBgRed");
        assert!(style.bold);
        assert_eq!(style.fg, Some(AnsiColor::White));
        assert_eq!(style.bg, Some(AnsiColor::Red));

        let info_bold = theme.resolve("infoBold");
        assert!(info_bold.bold);
        assert_eq!(info_bold.fg, Some(AnsiColor::Blue));

        assert_eq!(theme.resolve("brightCyan").fg, Some(AnsiColor::BrightCyan));
        assert_eq!(theme.resolve("magenta").fg, Some(AnsiColor::Fixed(201)));
    }

    #[test]
    fn test_unknown_style_falls_back_to_bold() {
        let theme = Theme::default();
        assert!(theme.try_resolve("sparkly").is_none());
        assert_eq!(theme.resolve("sparkly"), Style::new().bold());
        assert_eq!(theme.resolve("boldSparkly"), Style::new().bold());
    }

    #[test]
    fn test_theme_colour_overrides_apply_to_composites() {
        let theme = Theme::builtin("solarized").unwrap();
        let style = theme.resolve("boldRed");
        assert_eq!(style.fg, Some(AnsiColor::Fixed(160)));
        assert_eq!(theme.resolve("whiteBgBlue").bg, Some(AnsiColor::Fixed(33)));
    }

    #[test]
    fn test_define_multiple_names() {
        let mut theme = Theme::empty("custom");
        theme.define("alpha|beta", Style::new().fg(AnsiColor::Cyan));
        assert_eq!(theme.style("alpha"), theme.style("beta"));
        assert!(theme.has_style("beta"));
    }

    #[test]
    fn test_load_theme_file_with_extends() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "extends = \"dark\"\n\n[styles]\ninfo = {{ fg = 39 }}").unwrap();

        let theme = Theme::load(file.path()).unwrap();
        assert_eq!(theme.resolve("info").fg, Some(AnsiColor::Fixed(39)));
        assert!(theme.resolve("error").bold);
        assert!(!theme.name().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        let result = Theme::from_toml_str("[styles]\ninfo = { fg = \"chartreuse\" }");
        assert!(matches!(result, Err(ConsoleError::ThemeParse { .. })));

        let missing_parent = Theme::from_toml_str("extends = \"vapor\"");
        assert!(matches!(missing_parent, Err(ConsoleError::ThemeNotFound(_))));

        assert!(matches!(
            Theme::find("no-such-theme-anywhere"),
            Err(ConsoleError::ThemeNotFound(_))
        ));
    }
}
