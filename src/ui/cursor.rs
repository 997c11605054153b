// src/ui/cursor.rs

//! ANSI cursor sequences.

/// ANSI escape sequences for cursor movement and screen clearing.
///
/// Every method returns the sequence; nothing is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor;

impl Cursor {
    /// Hides the cursor.
    pub fn hide(self) -> &'static str {
        "\x1b[?25l"
    }

    /// Shows the cursor again.
    pub fn show(self) -> &'static str {
        "\x1b[?25h"
    }

    /// Moves up `n` rows.
    pub fn up(self, n: usize) -> String {
        format!("\x1b[{}A", n)
    }

    /// Moves down `n` rows.
    pub fn down(self, n: usize) -> String {
        format!("\x1b[{}B", n)
    }

    /// Moves right `n` columns.
    pub fn right(self, n: usize) -> String {
        format!("\x1b[{}C", n)
    }

    /// Moves left `n` columns.
    pub fn left(self, n: usize) -> String {
        format!("\x1b[{}D", n)
    }

    /// Moves right for positive offsets and left for negative ones.
    pub fn col(self, offset: i64) -> String {
        let distance = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
        if offset >= 0 {
            self.right(distance)
        } else {
            self.left(distance)
        }
    }

    /// Moves to an absolute 1-based position.
    pub fn position(self, row: usize, col: usize) -> String {
        format!("\x1b[{};{}H", row, col)
    }

    /// Saves the cursor position.
    pub fn save(self) -> &'static str {
        "\x1b[s"
    }

    /// Returns to the saved position.
    pub fn restore(self) -> &'static str {
        "\x1b[u"
    }

    /// Clears the current line and returns to its first column.
    pub fn erase_line(self) -> &'static str {
        "\x1b[2K\r"
    }

    /// Clears the screen and moves home.
    pub fn clear(self) -> &'static str {
        "\x1b[H\x1b[2J"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences() {
        let cursor = Cursor;
        assert_eq!(cursor.up(2), "\x1b[2A");
        assert_eq!(cursor.col(3), "\x1b[3C");
        assert_eq!(cursor.col(-4), "\x1b[4D");
        assert_eq!(cursor.position(5, 10), "\x1b[5;10H");
        assert_eq!(cursor.hide(), "\x1b[?25l");
    }
}
