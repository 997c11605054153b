// src/constants.rs

//! Exit codes, environment variables, directory names and rendering constants.

/// Exit code returned when the requested command cannot be resolved.
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;
/// Exit code for handler failures and invalid registrations.
pub const EXIT_FAILURE: i32 = 1;

/// Overrides the theme used by the demo binary.
pub const ENV_THEME: &str = "CONSOLA_THEME";
/// Extra directory scanned for TOML fonts by the demo binary.
pub const ENV_FONTS_DIR: &str = "CONSOLA_FONTS_DIR";

/// Name of the per-user configuration directory (under `dirs::config_dir()`).
pub const CONFIG_DIR_NAME: &str = "consola";
/// User themes live in `<config_dir>/consola/themes`.
pub const THEMES_DIR_NAME: &str = "themes";
/// User fonts live in `<config_dir>/consola/fonts`.
pub const FONTS_DIR_NAME: &str = "fonts";

/// Theme every console starts with.
pub const DEFAULT_THEME: &str = "default";
/// Font used by banners when none is selected.
pub const DEFAULT_FONT: &str = "standard";

/// Global flag turning on debug output and error traces.
pub const GLOBAL_FLAG_DEBUG: &str = "--debug";
/// Global flag disabling ANSI styling.
pub const GLOBAL_FLAG_NO_COLORS: &str = "--no-colors";

/// Braille spinner animation.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Delay between spinner frames.
pub const SPINNER_INTERVAL_MS: u64 = 100;

/// Cells in a progress bar.
pub const PROGRESS_BAR_WIDTH: usize = 50;
/// Completed progress cell.
pub const PROGRESS_FILLED: char = '█';
/// Pending progress cell.
pub const PROGRESS_EMPTY: char = '░';

/// Column at which alert messages wrap.
pub const ALERT_WRAP_WIDTH: usize = 60;
/// Horizontal padding added around the widest alert line.
pub const ALERT_PADDING: usize = 12;

/// Heatmap cells from coldest to hottest.
pub const HEATMAP_SHADES: &[char] = &['░', '▒', '▓', '█'];
/// Width of the longest bar in a bar chart.
pub const CHART_BAR_WIDTH: usize = 40;

/// Fallback width when the terminal size cannot be queried.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;
