// src/ui/advanced.rs

//! Spinners, charts, menus, animations and notifications.

use crate::CancellationToken;
use crate::constants::{CHART_BAR_WIDTH, HEATMAP_SHADES, SPINNER_FRAMES, SPINNER_INTERVAL_MS};
use crate::core::command::Context;
use crate::core::errors::ConsoleResult;
use crate::system::notify;
use crate::ui::cursor::Cursor;
use crate::ui::progress::ProgressBar;
use dialoguer::console::{Term, measure_text_width};
use log::{debug, warn};
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const BEEP_INTERVAL: Duration = Duration::from_millis(200);
const CHART_LABEL_WIDTH: usize = 20;

/// How [`Context::chart`] draws its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    /// Horizontal bars scaled to the largest value.
    Bar,
    /// Shares of the total as percentages.
    Pie,
}

/// Largest `i` in `0..=limit` with `i <= value`; negative and NaN values give 0.
fn floor_index(value: f64, limit: usize) -> usize {
    (0..=limit).rev().find(|i| (*i as f64) <= value).unwrap_or(0)
}

/// One shade per value, scaled between the smallest and largest value.
pub fn heatmap_row(data: &[f64], shades: &[char]) -> String {
    let (Some(min), Some(max)) = (
        data.iter().copied().reduce(f64::min),
        data.iter().copied().reduce(f64::max),
    ) else {
        return String::new();
    };
    let Some(top) = shades.len().checked_sub(1) else {
        return String::new();
    };
    let range = max - min;

    data.iter()
        .filter_map(|value| {
            let ratio = if range > 0.0 { (value - min) / range } else { 0.5 };
            let index = floor_index(ratio * top as f64, top);
            shades.get(index)
        })
        .collect()
}

/// `label  ████ value`, bars scaled so the largest spans `width` cells.
pub fn bar_lines(data: &[(&str, f64)], width: usize) -> Vec<String> {
    let max = data.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    data.iter()
        .map(|(label, value)| {
            let cells = if max > 0.0 {
                floor_index(value / max * width as f64, width)
            } else {
                0
            };
            format!(
                "{:<label_width$} {} {}",
                label,
                "█".repeat(cells),
                value,
                label_width = CHART_LABEL_WIDTH
            )
        })
        .collect()
}

/// `  label: 12.5%` for each slice. Empty when the values sum to zero.
pub fn pie_lines(data: &[(&str, f64)]) -> Vec<String> {
    let total: f64 = data.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    data.iter()
        .map(|(label, value)| format!("  {}: {:.1}%", label, value / total * 100.0))
        .collect()
}

/// Draws spinner frames on stderr until `token` is set.
fn spin(message: String, token: CancellationToken) {
    let term = Term::stderr();
    let mut frames = SPINNER_FRAMES.iter().cycle();
    while !token.load(Ordering::Relaxed) {
        if let Some(frame) = frames.next() {
            let drawn = term
                .clear_line()
                .and_then(|()| term.write_str(&format!("{} {}", frame, message)));
            if let Err(e) = drawn {
                debug!("Spinner stopped drawing: {}", e);
                break;
            }
        }
        thread::sleep(Duration::from_millis(SPINNER_INTERVAL_MS));
    }
    if let Err(e) = term.clear_line() {
        debug!("Could not clear spinner line: {}", e);
    }
}

impl<'a> Context<'a> {
    // --- Waiting ---

    /// Sleeps for `seconds`, optionally printing a countdown. Zero seconds
    /// waits for the user instead.
    ///
    /// # Errors
    /// Returns the prompt error when waiting for the user fails.
    pub fn wait(&self, seconds: u64, countdown: bool) -> ConsoleResult<&Self> {
        if seconds == 0 {
            return self.pause(None);
        }
        if countdown {
            for remaining in (1..=seconds).rev() {
                self.write(&format!("{}... ", remaining));
                thread::sleep(Duration::from_secs(1));
            }
            self.new_line();
        } else {
            thread::sleep(Duration::from_secs(seconds));
        }
        Ok(self)
    }

    /// Waits until the user presses Enter.
    ///
    /// # Errors
    /// Returns the prompt error when reading fails.
    pub fn pause(&self, message: Option<&str>) -> ConsoleResult<&Self> {
        let message = message.unwrap_or(t!("ui.pause.message"));
        self.reader().prompt(message, Some(""))?;
        Ok(self)
    }

    // --- Progress ---

    /// Runs `callback` on this thread while a spinner turns on stderr, then
    /// returns its result.
    pub fn with_spinner<T>(&self, message: &str, callback: impl FnOnce() -> T) -> T {
        let token: CancellationToken = Arc::new(AtomicBool::new(false));
        let spinner = Term::stderr().is_term().then(|| {
            let token = Arc::clone(&token);
            let message = message.to_string();
            thread::spawn(move || spin(message, token))
        });

        let result = callback();

        token.store(true, Ordering::Relaxed);
        if let Some(handle) = spinner {
            if handle.join().is_err() {
                warn!("Spinner thread panicked");
            }
        }
        self.write(&format!("{} ", message)).ok("✓");
        result
    }

    /// Feeds every item to `callback`, advancing a progress bar after each.
    pub fn with_progress_bar<I, F>(&self, items: I, mut callback: F) -> &Self
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        F: FnMut(I::Item, &mut ProgressBar<'a>),
    {
        let items = items.into_iter();
        let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let mut bar = self.progress(total);
        for item in items {
            callback(item, &mut bar);
            bar.advance(1);
        }
        bar.finish();
        self
    }

    /// Redraws `label: value` in place once per step.
    pub fn live_counter<V, F>(&self, mut updater: F, steps: usize, label: &str, interval: Duration) -> &Self
    where
        V: Display,
        F: FnMut(usize) -> V,
    {
        self.write(Cursor.hide());
        for step in 0..steps {
            let value = updater(step);
            self.write(&format!("{}{}: {:<10}", Cursor.erase_line(), label, value));
            thread::sleep(interval);
        }
        self.write(Cursor.show()).new_line()
    }

    // --- Visualisations ---

    /// Lists `(status, description)` events with a status icon. Statuses are
    /// `completed`, `failed`, `processing` or anything else for pending.
    pub fn timeline<S, D>(&self, events: &[(S, D)]) -> &Self
    where
        S: AsRef<str>,
        D: AsRef<str>,
    {
        self.colorize(t!("ui.timeline.title"), "yellow", true);
        let mut writer = self.writer();
        for (index, (status, description)) in events.iter().enumerate() {
            let (icon, color) = match status.as_ref() {
                "completed" => ("✓", "green"),
                "failed" => ("✗", "red"),
                "processing" => ("↻", "yellow"),
                _ => ("○", "gray"),
            };
            let description = match description.as_ref() {
                "" => format!("Event {}", index + 1),
                text => text.to_string(),
            };
            writer.markup(&format!("  <{}>{}</end> {}", color, icon, description));
            writer.eol(1);
        }
        drop(writer);
        self
    }

    /// One shaded cell per value; `shades` defaults to `░▒▓█`.
    pub fn heatmap(&self, data: &[f64], shades: Option<&[char]>) -> &Self {
        self.line(&heatmap_row(data, shades.unwrap_or(HEATMAP_SHADES)))
    }

    /// Rows aligned into columns, each cell rendered by `formatter`.
    pub fn grid<T, F>(&self, rows: &[Vec<T>], formatter: F) -> &Self
    where
        F: Fn(&T) -> String,
    {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(&formatter).collect())
            .collect();

        let mut widths: Vec<usize> = Vec::new();
        for row in &cells {
            for (col, cell) in row.iter().enumerate() {
                let width = measure_text_width(cell);
                match widths.get_mut(col) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }

        let mut writer = self.writer();
        for row in &cells {
            let line: String = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width + 2 - measure_text_width(cell))))
                .collect();
            writer.writeln(line.trim_end());
        }
        drop(writer);
        self
    }

    /// Draws labelled data as bars or as percentage shares.
    pub fn chart(&self, data: &[(&str, f64)], kind: ChartKind) -> &Self {
        let lines = match kind {
            ChartKind::Bar => bar_lines(data, CHART_BAR_WIDTH),
            ChartKind::Pie => pie_lines(data),
        };
        if lines.is_empty() {
            return self.comment(t!("ui.chart.empty"));
        }
        if kind == ChartKind::Pie {
            self.colorize(t!("ui.chart.pie_title"), "yellow", true);
        }
        let mut writer = self.writer();
        for line in lines {
            writer.writeln(&line);
        }
        drop(writer);
        self
    }

    /// Shows keyed options and asks for one. Returns the key when the answer
    /// matches a key or label, otherwise the answer as typed.
    ///
    /// # Errors
    /// Returns the prompt error when reading fails.
    pub fn menu(&self, title: &str, options: &[(&str, &str)], default: Option<&str>) -> ConsoleResult<String> {
        self.colorize(title, "yellow", true);
        {
            let mut writer = self.writer();
            for (key, label) in options {
                writer.markup(&format!("  <green>{}</end> {}", key, label));
                writer.eol(1);
            }
        }

        let answer = self.ask(&format!("{} :", t!("ui.menu.prompt")), default)?;
        let chosen = options
            .iter()
            .find(|(key, label)| *key == answer || label.eq_ignore_ascii_case(&answer))
            .map_or(answer.clone(), |(key, _)| (*key).to_string());
        Ok(chosen)
    }

    // --- Animation and system ---

    /// Plays `frames` in place `iterations` times.
    pub fn animation<S: AsRef<str>>(&self, frames: &[S], iterations: usize, delay: Duration) -> &Self {
        self.write(Cursor.hide());
        for _ in 0..iterations {
            for frame in frames {
                self.write(&format!("{}{}", Cursor.erase_line(), frame.as_ref()));
                thread::sleep(delay);
            }
        }
        self.write(Cursor.show())
    }

    /// Rings the terminal bell `count` times.
    pub fn beep(&self, count: usize) -> &Self {
        for ring in 0..count {
            if ring > 0 {
                thread::sleep(BEEP_INTERVAL);
            }
            self.writer().raw("\x07");
        }
        self
    }

    /// Shows a desktop notification. Failures are logged, never returned.
    pub fn notify(&self, title: &str, message: &str) -> &Self {
        if let Err(e) = notify::send(title, message) {
            warn!("Desktop notification failed: {}", e);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::Console;
    use crate::models::{CommandDefinition, Parameters};
    use crate::ui::reader::Reader;
    use crate::ui::writer::{MemorySink, Writer};

    // --- Setup ---
    fn setup(answers: &[&str]) -> (Console, MemorySink) {
        let sink = MemorySink::new();
        let mut console = Console::with_writer("t", "1", Writer::with_sink(Box::new(sink.clone())));
        console.set_reader(Reader::scripted(answers.iter().copied()));
        (console, sink)
    }

    fn with_ctx(console: &Console, check: impl FnOnce(&Context<'_>)) {
        let definition = CommandDefinition::new("adv");
        let ctx = Context::new(console, &definition, Parameters::default());
        check(&ctx);
    }

    #[test]
    fn test_floor_index() {
        assert_eq!(floor_index(2.7, 3), 2);
        assert_eq!(floor_index(9.0, 3), 3);
        assert_eq!(floor_index(-1.0, 3), 0);
        assert_eq!(floor_index(f64::NAN, 3), 0);
    }

    #[test]
    fn test_heatmap_row() {
        assert_eq!(heatmap_row(&[0.0, 5.0, 10.0], HEATMAP_SHADES), "░▒█");
        assert_eq!(heatmap_row(&[3.0, 3.0], HEATMAP_SHADES), "▒▒");
        assert_eq!(heatmap_row(&[], HEATMAP_SHADES), "");
    }

    #[test]
    fn test_charts() {
        let data = [("a", 2.0), ("b", 4.0)];
        let bars = bar_lines(&data, 4);
        assert_eq!(bars[0], format!("{:<20} ██ 2", "a"));
        assert_eq!(bars[1], format!("{:<20} ████ 4", "b"));
        assert_eq!(pie_lines(&data), vec!["  a: 33.3%", "  b: 66.7%"]);
        assert!(pie_lines(&[("z", 0.0)]).is_empty());
    }

    #[test]
    fn test_empty_chart_prints_notice() {
        let (console, sink) = setup(&[]);
        with_ctx(&console, |ctx| {
            ctx.chart(&[], ChartKind::Pie);
        });
        assert_eq!(sink.contents(), "No data to display\n");
    }

    #[test]
    fn test_timeline_and_grid() {
        let (console, sink) = setup(&[]);
        with_ctx(&console, |ctx| {
            ctx.timeline(&[("completed", "Build"), ("queued", "")])
                .grid(&[vec![1, 200], vec![30, 4]], |n| n.to_string());
        });
        assert_eq!(
            sink.contents(),
            "Timeline:\n  ✓ Build\n  ○ Event 2\n1   200\n30  4\n"
        );
    }

    #[test]
    fn test_menu_returns_key() {
        let (console, sink) = setup(&["Deploy", "x"]);
        with_ctx(&console, |ctx| {
            let options = [("1", "Build"), ("2", "Deploy")];
            assert_eq!(ctx.menu("Pick", &options, None).unwrap(), "2");
            assert_eq!(ctx.menu("Pick", &options, None).unwrap(), "x");
        });
        assert!(sink.contents().starts_with("Pick\n  1 Build\n  2 Deploy\n"));
    }

    #[test]
    fn test_spinner_returns_callback_result() {
        let (console, sink) = setup(&[""]);
        with_ctx(&console, |ctx| {
            assert_eq!(ctx.with_spinner("Working", || 21 * 2), 42);
            ctx.pause(None).unwrap();
        });
        assert_eq!(sink.contents(), "Working ✓\n");
    }

    #[test]
    fn test_with_progress_bar_visits_every_item() {
        let (console, sink) = setup(&[]);
        let mut seen = Vec::new();
        with_ctx(&console, |ctx| {
            ctx.with_progress_bar(["a", "b"], |item, bar| {
                seen.push((item, bar.current()));
            });
        });
        assert_eq!(seen, vec![("a", 0), ("b", 1)]);
        assert!(sink.contents().ends_with("100%\n"));
    }

    #[test]
    fn test_beep_and_live_counter() {
        let (console, sink) = setup(&[]);
        with_ctx(&console, |ctx| {
            ctx.beep(1).live_counter(|i| i * 10, 2, "n", Duration::ZERO);
        });
        let out = sink.contents();
        assert!(out.starts_with('\x07'));
        assert!(out.contains("n: 10"));
    }
}
