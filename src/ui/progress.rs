// src/ui/progress.rs

//! In-place progress bars.

use crate::constants::{PROGRESS_BAR_WIDTH, PROGRESS_EMPTY, PROGRESS_FILLED};
use crate::core::console::Console;
use std::time::Instant;

/// A fixed-width text progress bar redrawn in place on the console.
#[derive(Debug)]
pub struct ProgressBar<'a> {
    console: &'a Console,
    total: u64,
    current: u64,
    started: Instant,
    messages: Vec<String>,
}

/// `[█████░░░░░] 50%` for the given progress.
pub fn render_bar(current: u64, total: u64, width: usize) -> String {
    let percent = if total == 0 {
        100
    } else {
        u128::from(current.min(total)) * 100 / u128::from(total)
    };
    let percent_cells = usize::try_from(percent).unwrap_or(100);
    let filled = width * percent_cells / 100;
    format!(
        "[{}{}] {:>3}%",
        PROGRESS_FILLED.to_string().repeat(filled),
        PROGRESS_EMPTY.to_string().repeat(width - filled),
        percent
    )
}

impl<'a> ProgressBar<'a> {
    /// A bar at zero. A `total` of zero renders as complete.
    pub fn new(console: &'a Console, total: u64) -> Self {
        Self {
            console,
            total,
            current: 0,
            started: Instant::now(),
            messages: Vec::new(),
        }
    }

    /// Number of steps to completion.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Steps done so far.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Messages collected by [`ProgressBar::advance_with_message`].
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Moves forward by `step`, never past the total, and redraws.
    pub fn advance(&mut self, step: u64) {
        self.current = self.current.saturating_add(step).min(self.total);
        self.display();
    }

    /// Like [`ProgressBar::advance`], keeping `message` for the statistics.
    pub fn advance_with_message(&mut self, step: u64, message: &str) {
        if !message.is_empty() {
            self.messages.push(message.to_string());
        }
        self.advance(step);
    }

    /// Completes the bar and ends its line.
    pub fn finish(&mut self) {
        self.current = self.total;
        self.display();
        self.console.writer().eol(1);
    }

    /// Redraws the bar over the current line.
    pub fn display(&self) {
        let bar = render_bar(self.current, self.total, PROGRESS_BAR_WIDTH);
        self.console.writer().write(&format!("\r{}", bar));
    }

    /// Items processed, elapsed time, throughput and the collected messages.
    pub fn show_stats(&self) {
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate = if self.current > 0 && elapsed > 0.0 {
            self.current as f64 / elapsed
        } else {
            0.0
        };

        let mut writer = self.console.writer();
        writer.eol(1);
        writer.styled(
            "comment",
            &format!(t!("ui.progress.items"), current = self.current, total = self.total),
        );
        writer.eol(1);
        writer.writeln(&format!(t!("ui.progress.elapsed"), seconds = elapsed));
        writer.writeln(&format!(t!("ui.progress.rate"), rate = rate));

        if !self.messages.is_empty() {
            writer.styled("comment", t!("ui.progress.messages"));
            writer.eol(1);
            for message in &self.messages {
                writer.writeln(&format!("  • {}", message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::writer::{MemorySink, Writer};

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(0, 4, 4), "[░░░░]   0%");
        assert_eq!(render_bar(2, 4, 4), "[██░░]  50%");
        assert_eq!(render_bar(9, 4, 4), "[████] 100%");
        assert_eq!(render_bar(0, 0, 2), "[██] 100%");
    }

    #[test]
    fn test_render_bar_near_u64_max() {
        assert_eq!(render_bar(u64::MAX / 2, u64::MAX, 4), "[█░░░]  49%");
        assert_eq!(render_bar(u64::MAX, u64::MAX, 2), "[██] 100%");
    }

    #[test]
    fn test_advance_is_clamped_and_messages_kept() {
        let sink = MemorySink::new();
        let console = Console::with_writer("t", "1", Writer::with_sink(Box::new(sink.clone())));
        let mut bar = ProgressBar::new(&console, 3);
        bar.advance_with_message(2, "first");
        bar.advance_with_message(5, "");
        assert_eq!(bar.current(), 3);
        assert_eq!(bar.messages(), ["first".to_string()]);

        bar.finish();
        bar.show_stats();
        let out = sink.contents();
        assert!(out.contains(" 100%\n"));
        assert!(out.contains("3/3"));
        assert!(out.ends_with("  • first\n"));
    }
}
