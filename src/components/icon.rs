// src/components/icon.rs

//! Icon characters and the per-console default-icon switch.

use std::cell::Cell;

/// Icon characters shared by alerts, badges and the logger.
#[derive(Debug)]
pub struct Icon;

impl Icon {
    /// Info alerts and badges.
    pub const INFO: &'static str = "ℹ";
    /// Success alerts and badges.
    pub const SUCCESS: &'static str = "✓";
    /// Warning alerts and badges.
    pub const WARNING: &'static str = "⚠";
    /// Error alerts and badges.
    pub const ERROR: &'static str = "✗";
    /// Danger alerts.
    pub const DANGER: &'static str = "✘";
    /// Primary alerts and badges.
    pub const PRIMARY: &'static str = "★";
    /// Secondary alerts and badges.
    pub const SECONDARY: &'static str = "●";
    /// Dark alerts and badges.
    pub const DARK: &'static str = "⬤";
    /// Light alerts and badges.
    pub const LIGHT: &'static str = "○";
    /// Star.
    pub const STAR: &'static str = "★";
    /// Check mark.
    pub const CHECK: &'static str = "✓";
    /// Cross mark.
    pub const CROSS: &'static str = "✗";
    /// List bullet.
    pub const BULLET: &'static str = "•";
    /// Right arrow.
    pub const ARROW: &'static str = "→";
    /// Padlock.
    pub const LOCK: &'static str = "🔒";
    /// Key.
    pub const KEY: &'static str = "🔑";
    /// Stopwatch.
    pub const TIME: &'static str = "⏱";
    /// Filing cabinet.
    pub const DATABASE: &'static str = "🗄";
    /// Lightning bolt.
    pub const CACHE: &'static str = "⚡";
    /// Single user.
    pub const USER: &'static str = "👤";
    /// Several users.
    pub const GROUP: &'static str = "👥";
    /// Document.
    pub const FILE: &'static str = "📄";
    /// Folder.
    pub const FOLDER: &'static str = "📁";
    /// Down arrow.
    pub const DOWNLOAD: &'static str = "⬇";
    /// Up arrow.
    pub const UPLOAD: &'static str = "⬆";
    /// Clockwise arrow.
    pub const REFRESH: &'static str = "↻";
    /// Magnifier.
    pub const SEARCH: &'static str = "🔍";
    /// Heart.
    pub const HEART: &'static str = "❤";
    /// Gear.
    pub const GEAR: &'static str = "⚙";
    /// Waste basket.
    pub const TRASH: &'static str = "🗑";
    /// Envelope.
    pub const MAIL: &'static str = "✉";
    /// Bell.
    pub const BELL: &'static str = "🔔";
    /// Chain link.
    pub const LINK: &'static str = "🔗";

    /// Default icon of a component variant (`info`, `success`, ...).
    pub fn for_kind(kind: &str) -> Option<&'static str> {
        match kind {
            "info" => Some(Self::INFO),
            "success" => Some(Self::SUCCESS),
            "warning" => Some(Self::WARNING),
            "error" => Some(Self::ERROR),
            "danger" => Some(Self::DANGER),
            "primary" => Some(Self::PRIMARY),
            "secondary" => Some(Self::SECONDARY),
            "dark" => Some(Self::DARK),
            "light" => Some(Self::LIGHT),
            _ => None,
        }
    }
}

/// The icon a caller asks a component to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IconChoice {
    /// The component's own icon, when default icons are enabled.
    #[default]
    Default,
    /// No icon at all.
    None,
    /// This exact text.
    Custom(String),
}

impl From<&str> for IconChoice {
    fn from(icon: &str) -> Self {
        Self::Custom(icon.to_string())
    }
}

/// Component switches owned by a console.
#[derive(Debug, Default)]
pub struct ComponentSettings {
    show_default_icons: Cell<bool>,
}

impl ComponentSettings {
    /// Turns the components' default icons on or off. Off by default.
    pub fn show_default_icons(&self, enabled: bool) {
        self.show_default_icons.set(enabled);
    }

    /// Whether default icons are shown.
    pub fn default_icons_enabled(&self) -> bool {
        self.show_default_icons.get()
    }

    /// Picks the icon to display: an explicit icon wins, `None` suppresses, and
    /// the default only shows while default icons are enabled.
    pub fn resolve_icon(&self, choice: &IconChoice, default: Option<&str>) -> Option<String> {
        match choice {
            IconChoice::Custom(icon) => Some(icon.clone()),
            IconChoice::None => None,
            IconChoice::Default if self.default_icons_enabled() => default.map(str::to_string),
            IconChoice::Default => None,
        }
    }
}

/// `"<icon> "` or an empty string.
pub(crate) fn icon_prefix(icon: Option<&str>) -> String {
    icon.map(|i| format!("{} ", i)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_resolution() {
        let settings = ComponentSettings::default();
        assert_eq!(settings.resolve_icon(&IconChoice::Default, Some(Icon::INFO)), None);
        assert_eq!(
            settings.resolve_icon(&IconChoice::from("★"), Some(Icon::INFO)).as_deref(),
            Some("★")
        );

        settings.show_default_icons(true);
        assert_eq!(
            settings.resolve_icon(&IconChoice::Default, Some(Icon::INFO)).as_deref(),
            Some(Icon::INFO)
        );
        assert_eq!(settings.resolve_icon(&IconChoice::None, Some(Icon::INFO)), None);
        assert_eq!(settings.resolve_icon(&IconChoice::Default, None), None);
    }

    #[test]
    fn test_kind_icons() {
        assert_eq!(Icon::for_kind("danger"), Some(Icon::DANGER));
        assert_eq!(Icon::for_kind("purple"), None);
    }
}
