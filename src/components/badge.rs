// src/components/badge.rs

//! Inline badges.

use crate::components::icon::{Icon, IconChoice, icon_prefix};
use crate::core::console::Console;

/// Inline labels: ` LABEL ` in a coloured block followed by the message.
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    console: &'a Console,
}

fn filled_style(kind: &str) -> &'static str {
    match kind {
        "info" => "boldWhiteBgCyan",
        "success" => "boldWhiteBgGreen",
        "warning" => "boldWhiteBgYellow",
        "error" | "danger" => "boldWhiteBgRed",
        "secondary" => "boldWhiteBgGray",
        "dark" => "boldWhiteBgBlack",
        "light" => "boldBlackBgWhite",
        _ => "boldWhiteBgBlue",
    }
}

fn outline_style(kind: &str) -> String {
    match kind {
        "info" => "boldCyan".into(),
        "success" => "boldGreen".into(),
        "warning" => "boldYellow".into(),
        "error" | "danger" => "boldRed".into(),
        "primary" => "boldBlue".into(),
        "secondary" => "boldGray".into(),
        "dark" => "boldBlack".into(),
        "light" => "boldWhite".into(),
        other => {
            let mut chars = other.chars();
            let capitalized: String = chars
                .next()
                .map(|c| c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
                .unwrap_or_default();
            format!("bold{}", capitalized)
        }
    }
}

impl<'a> Badge<'a> {
    /// Badges written through `console`.
    pub fn new(console: &'a Console) -> Self {
        Self { console }
    }

    /// ` INFO ` on cyan, then the message. `label` replaces the default label.
    pub fn info(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("info", message, label.unwrap_or("INFO"), icon)
    }

    /// ` SUCCESS ` on green.
    pub fn success(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("success", message, label.unwrap_or("SUCCESS"), icon)
    }

    /// ` WARNING ` on yellow.
    pub fn warning(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("warning", message, label.unwrap_or("WARNING"), icon)
    }

    /// ` ERROR ` on red.
    pub fn error(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("error", message, label.unwrap_or("ERROR"), icon)
    }

    /// Rendered like [`Badge::error`] with a `DANGER` label.
    pub fn danger(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("error", message, label.unwrap_or("DANGER"), icon)
    }

    /// ` PRIMARY ` on blue.
    pub fn primary(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("primary", message, label.unwrap_or("PRIMARY"), icon)
    }

    /// ` SECONDARY ` on gray.
    pub fn secondary(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("secondary", message, label.unwrap_or("SECONDARY"), icon)
    }

    /// ` DARK ` on black.
    pub fn dark(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("dark", message, label.unwrap_or("DARK"), icon)
    }

    /// ` LIGHT ` in black on white.
    pub fn light(&self, message: &str, label: Option<&str>, icon: IconChoice) -> &Self {
        self.filled("light", message, label.unwrap_or("LIGHT"), icon)
    }

    /// Coloured label text without a background. `color` is a variant name
    /// (`info`, `success`, ...) or a plain colour.
    pub fn outline(&self, message: &str, label: &str, color: &str, icon: IconChoice) -> &Self {
        let icon = self.resolve(&icon, Icon::for_kind(color));
        self.render(&outline_style(color), &format!(" {}{} ", icon_prefix(icon.as_deref()), label), message);
        self
    }

    /// Label wrapped in parentheses: `( LABEL )`.
    pub fn pill(&self, message: &str, label: &str, color: &str, icon: IconChoice) -> &Self {
        let icon = self.resolve(&icon, Icon::for_kind(color));
        self.render(filled_style(color), &format!("( {}{} )", icon_prefix(icon.as_deref()), label), message);
        self
    }

    /// A badge painted with any style name the theme can resolve.
    pub fn custom(&self, message: &str, label: &str, style: &str, icon: IconChoice) -> &Self {
        let icon = self.resolve(&icon, None);
        self.render(style, &format!(" {}{} ", icon_prefix(icon.as_deref()), label), message);
        self
    }

    fn filled(&self, kind: &str, message: &str, label: &str, icon: IconChoice) -> &Self {
        let icon = self.resolve(&icon, Icon::for_kind(kind));
        self.render(filled_style(kind), &format!(" {}{} ", icon_prefix(icon.as_deref()), label), message);
        self
    }

    fn resolve(&self, icon: &IconChoice, default: Option<&str>) -> Option<String> {
        self.console.components().resolve_icon(icon, default)
    }

    fn render(&self, style: &str, label: &str, message: &str) {
        let mut writer = self.console.writer();
        writer.styled(style, label);
        writer.writeln(&format!(" {}", message));
    }
}
