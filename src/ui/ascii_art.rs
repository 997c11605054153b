// src/ui/ascii_art.rs

//! Bitmap fonts for ASCII art.
//!
//! A font is a TOML file with a `[glyphs]` table mapping single characters to
//! one row (`"A" = "▲"`) or several rows (`"A" = [" /\\ ", "/--\\"]`). An
//! optional `name` and `letter_spacing` may be given at the top level:
//!
//! ```toml
//! name = "dots"
//! letter_spacing = 0
//!
//! [glyphs]
//! "A" = "."
//! ```
//!
//! Every console owns a [`FontRegistry`] seeded with the built-in `standard`
//! and `minimal` fonts. More fonts are loaded from a directory, by default the
//! user's `<config_dir>/consola/fonts`.

use crate::constants::{CONFIG_DIR_NAME, FONTS_DIR_NAME};
use crate::core::command::Context;
use crate::core::errors::{ConsoleError, ConsoleResult};
use dialoguer::console::measure_text_width;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUILTIN_FONTS: &[(&str, &str)] = &[
    ("standard", include_str!("../../fonts/standard.toml")),
    ("minimal", include_str!("../../fonts/minimal.toml")),
];

const PREVIEW_SAMPLE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn default_letter_spacing() -> usize {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GlyphSpec {
    Row(String),
    Rows(Vec<String>),
}

#[derive(Deserialize)]
struct FontFile {
    name: Option<String>,
    #[serde(default = "default_letter_spacing")]
    letter_spacing: usize,
    glyphs: BTreeMap<String, GlyphSpec>,
}

/// A bitmap font: each character maps to one or more rows of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    name: String,
    letter_spacing: usize,
    glyphs: HashMap<char, Vec<String>>,
}

impl Font {
    /// An empty font with one column between letters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            letter_spacing: default_letter_spacing(),
            glyphs: HashMap::new(),
        }
    }

    /// Adds or replaces the rows drawn for `ch`.
    pub fn glyph(mut self, ch: char, rows: &[&str]) -> Self {
        self.glyphs
            .insert(ch, rows.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Columns of space between letters.
    pub fn letter_spacing(mut self, spacing: usize) -> Self {
        self.letter_spacing = spacing;
        self
    }

    /// Parses a font file. `fallback_name` is used when the file has no `name`.
    ///
    /// Glyph keys must be exactly one character; other keys are skipped.
    ///
    /// # Errors
    /// Returns the TOML error when the content is not a valid font file.
    pub fn from_toml_str(content: &str, fallback_name: &str) -> Result<Self, toml::de::Error> {
        let file: FontFile = toml::from_str(content)?;
        let mut font = Self::new(file.name.unwrap_or_else(|| fallback_name.to_string()))
            .letter_spacing(file.letter_spacing);

        for (key, spec) in file.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                warn!("Font '{}': ignoring glyph key '{}'", font.name, key);
                continue;
            };
            let rows = match spec {
                GlyphSpec::Row(row) => vec![row],
                GlyphSpec::Rows(rows) => rows,
            };
            font.glyphs.insert(ch, rows);
        }
        Ok(font)
    }

    /// Loads a font file; the file stem names fonts that do not name themselves.
    ///
    /// # Errors
    /// `ConsoleError::Io` when the file cannot be read, `ConsoleError::FontParse`
    /// when it is not a valid font.
    pub fn load(path: &Path) -> ConsoleResult<Self> {
        let content = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_toml_str(&content, &stem).map_err(|source| ConsoleError::FontParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The font's own name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `ch` has a glyph of its own, without case folding.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// The glyph for `ch`, trying the other letter case and then the space
    /// glyph before giving up.
    fn lookup(&self, ch: char) -> Option<&Vec<String>> {
        self.glyphs
            .get(&ch)
            .or_else(|| ch.to_uppercase().next().and_then(|c| self.glyphs.get(&c)))
            .or_else(|| ch.to_lowercase().next().and_then(|c| self.glyphs.get(&c)))
            .or_else(|| self.glyphs.get(&' '))
    }

    /// Lays the glyphs of `text` side by side. Short glyphs are padded so
    /// every column keeps its width; trailing blanks are trimmed.
    pub fn render(&self, text: &str) -> Vec<String> {
        let glyphs: Vec<&Vec<String>> = text.chars().filter_map(|c| self.lookup(c)).collect();
        let height = glyphs.iter().map(|g| g.len()).max().unwrap_or(0);
        let spacing = " ".repeat(self.letter_spacing);

        (0..height)
            .map(|row| {
                let line = glyphs
                    .iter()
                    .map(|glyph| {
                        let width = glyph.iter().map(|r| measure_text_width(r)).max().unwrap_or(0);
                        let cell = glyph.get(row).map_or("", String::as_str);
                        let pad = width.saturating_sub(measure_text_width(cell));
                        format!("{}{}", cell, " ".repeat(pad))
                    })
                    .collect::<Vec<_>>()
                    .join(&spacing);
                line.trim_end().to_string()
            })
            .collect()
    }
}

/// The fonts known to one console.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: BTreeMap<String, Font>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        let mut fonts = BTreeMap::new();
        for (name, content) in BUILTIN_FONTS {
            match Font::from_toml_str(content, name) {
                Ok(font) => {
                    fonts.insert((*name).to_string(), font);
                }
                Err(e) => warn!("Built-in font '{}' is invalid: {}", name, e),
            }
        }
        Self { fonts }
    }
}

impl FontRegistry {
    /// Directory holding the user's fonts: `<config_dir>/consola/fonts`.
    pub fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(FONTS_DIR_NAME))
    }

    /// Loads the fonts in [`FontRegistry::user_dir`], if there is one.
    ///
    /// Returns how many fonts were loaded.
    pub fn load_user_fonts(&mut self) -> usize {
        Self::user_dir().map_or(0, |dir| self.load_dir(&dir))
    }

    /// A registry without the built-in fonts.
    pub fn empty() -> Self {
        Self { fonts: BTreeMap::new() }
    }

    /// Adds or replaces a font under `name`.
    pub fn register(&mut self, name: &str, font: Font) {
        debug!("Registered font '{}'", name);
        self.fonts.insert(name.to_string(), font);
    }

    /// Removes a font and returns it.
    pub fn unregister(&mut self, name: &str) -> Option<Font> {
        self.fonts.remove(name)
    }

    /// The font registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Font names in alphabetical order.
    pub fn names(&self) -> Vec<String> {
        self.fonts.keys().cloned().collect()
    }

    /// Fails with `ConsoleError::FontNotFound` unless `name` is registered.
    ///
    /// # Errors
    /// See above.
    pub fn require(&self, name: &str) -> ConsoleResult<&Font> {
        self.fonts.get(name).ok_or_else(|| ConsoleError::FontNotFound {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Registers every `*.toml` font directly inside `dir`.
    /// A missing directory loads nothing; unreadable files are skipped.
    ///
    /// Returns how many fonts were loaded.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        if !dir.is_dir() {
            debug!("Font directory '{}' does not exist", dir.display());
            return 0;
        }

        let mut count = 0;
        for entry in WalkDir::new(dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }
            match Font::load(path) {
                Ok(font) => {
                    let name = font.name().to_string();
                    self.register(&name, font);
                    count += 1;
                }
                Err(e) => warn!("Skipping font '{}': {}", path.display(), e),
            }
        }
        count
    }
}

// --- Handler-facing helpers ---

impl Context<'_> {
    /// Selects the font used by later [`Context::ascii_art`] calls.
    ///
    /// # Errors
    /// Returns `ConsoleError::FontNotFound` for unknown fonts.
    pub fn with_font(&mut self, name: &str) -> ConsoleResult<&mut Self> {
        self.console().fonts().require(name)?;
        self.font = name.to_string();
        Ok(self)
    }

    /// The font banners use unless told otherwise.
    pub fn current_font(&self) -> &str {
        &self.font
    }

    /// Adds a font to the console's registry.
    pub fn register_font(&self, name: &str, font: Font) -> &Self {
        self.console().fonts().register(name, font);
        self
    }

    /// Removes a font from the console's registry.
    pub fn unregister_font(&self, name: &str) -> &Self {
        self.console().fonts().unregister(name);
        self
    }

    /// Loads every TOML font in `dir`; see [`FontRegistry::load_dir`].
    pub fn load_fonts(&self, dir: &Path) -> usize {
        let dir = shellexpand::full(&dir.to_string_lossy())
            .map(|expanded| Path::new(expanded.as_ref()).to_path_buf())
            .unwrap_or_else(|_| dir.to_path_buf());
        self.console().fonts().load_dir(&dir)
    }

    /// Registered font names in alphabetical order.
    pub fn available_fonts(&self) -> Vec<String> {
        self.console().fonts().names()
    }

    /// Whether the console knows the font.
    pub fn has_font(&self, name: &str) -> bool {
        self.console().fonts().contains(name)
    }

    /// Renders `text` with `font`, or with the current font.
    ///
    /// # Errors
    /// Returns `ConsoleError::FontNotFound` for unknown fonts.
    pub fn render_ascii(&self, text: &str, font: Option<&str>) -> ConsoleResult<Vec<String>> {
        let name = font.unwrap_or(&self.font);
        let fonts = self.console().fonts();
        Ok(fonts.require(name)?.render(text))
    }

    /// # Errors
    /// Returns `ConsoleError::FontNotFound` for unknown fonts.
    pub fn ascii_art(&self, text: &str, font: Option<&str>) -> ConsoleResult<&Self> {
        let lines = self.render_ascii(text, font)?;
        let mut writer = self.writer();
        for line in lines {
            writer.writeln(&line);
        }
        drop(writer);
        Ok(self)
    }

    /// # Errors
    /// Returns `ConsoleError::FontNotFound` for unknown fonts.
    pub fn preview_font(&self, font: &str, sample: Option<&str>) -> ConsoleResult<&Self> {
        let lines = self.render_ascii(sample.unwrap_or(PREVIEW_SAMPLE), Some(font))?;
        self.colorize(&format!(t!("ui.font.preview"), name = font), "yellow", true);
        let mut writer = self.writer();
        for line in lines {
            writer.writeln(&line);
        }
        writer.eol(1);
        drop(writer);
        Ok(self)
    }

    /// The rendered text inside a frame of `border` characters.
    ///
    /// # Errors
    /// Returns `ConsoleError::FontNotFound` for unknown fonts.
    pub fn banner(&self, text: &str, border: char, font: Option<&str>) -> ConsoleResult<&Self> {
        let lines = self.render_ascii(text, font)?;
        let width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
        let edge = border.to_string().repeat(width + 4);

        let mut writer = self.writer();
        writer.writeln(&edge);
        for line in &lines {
            let pad = " ".repeat(width - measure_text_width(line));
            writer.writeln(&format!("{} {}{} {}", border, line, pad, border));
        }
        writer.writeln(&edge);
        drop(writer);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::Console;
    use crate::models::{CommandDefinition, Parameters};
    use crate::ui::writer::{MemorySink, Writer};
    use std::io::Write;
    use tempfile::tempdir;

    // --- Setup ---
    fn tiny() -> Font {
        Font::new("tiny")
            .glyph('A', &["/\\", "||"])
            .glyph('B', &["B"])
            .glyph(' ', &[" "])
    }

    fn setup() -> (Console, MemorySink) {
        let sink = MemorySink::new();
        let console = Console::with_writer("t", "1", Writer::with_sink(Box::new(sink.clone())));
        (console, sink)
    }

    #[test]
    fn test_render_multi_row_glyphs() {
        assert_eq!(tiny().render("AB"), vec!["/\\ B", "||"]);
        // Lowercase falls back to uppercase, unknown characters to space.
        assert_eq!(tiny().render("a?b"), vec!["/\\   B", "||"]);
        assert!(tiny().render("").is_empty());
    }

    #[test]
    fn test_builtin_fonts() {
        let registry = FontRegistry::default();
        assert_eq!(registry.names(), vec!["minimal", "standard"]);
        assert_eq!(registry.get("standard").unwrap().render("I").len(), 5);
        assert_eq!(registry.get("minimal").unwrap().render("AB"), vec!["▲■"]);
    }

    #[test]
    fn test_unknown_font() {
        let registry = FontRegistry::default();
        let err = registry.require("gothic").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Font 'gothic' not found. Available fonts: minimal, standard"
        );
    }

    #[test]
    fn test_load_dir() {
        let dir = tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("dots.toml")).unwrap();
        writeln!(file, "[glyphs]\nA = \".\"\nlong = \"x\"").unwrap();
        fs::write(dir.path().join("broken.toml"), "glyphs = 3").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = FontRegistry::empty();
        assert_eq!(registry.load_dir(dir.path()), 1);
        let dots = registry.get("dots").unwrap();
        assert!(dots.has_glyph('A'));
        assert_eq!(registry.load_dir(&dir.path().join("missing")), 0);
    }

    #[test]
    fn test_user_dir_is_under_config_dir() {
        if let Some(dir) = FontRegistry::user_dir() {
            assert!(dir.ends_with(Path::new(CONFIG_DIR_NAME).join(FONTS_DIR_NAME)));
        }
        let mut registry = FontRegistry::empty();
        let loaded = registry.load_user_fonts();
        assert!(registry.names().len() <= loaded);
    }

    #[test]
    fn test_context_font_selection_and_banner() {
        let (console, sink) = setup();
        let definition = CommandDefinition::new("art");
        let mut ctx = Context::new(&console, &definition, Parameters::default());

        assert!(ctx.with_font("nope").is_err());
        ctx.register_font("tiny", tiny());
        ctx.with_font("tiny").unwrap();
        assert_eq!(ctx.current_font(), "tiny");

        ctx.banner("AB", '#', None).unwrap();
        assert_eq!(sink.contents(), "########\n# /\\ B #\n# ||   #\n########\n");

        ctx.unregister_font("tiny");
        assert!(!ctx.has_font("tiny"));
        assert!(ctx.ascii_art("A", None).is_err());
    }
}
