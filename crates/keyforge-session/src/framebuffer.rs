// ===== keyforge-session/src/framebuffer.rs =====
//! Fixed-grid character canvas with a cursor and optional per-cell ANSI
//! styling. The sole rendering target for interactive and multi-line
//! analysis output: writes accumulate here and are flushed as one coherent
//! text frame rather than interleaved directly onto the outbound channel.

use keyforge_core::consts::{FRAMEBUFFER_HEIGHT_PLAIN, FRAMEBUFFER_HEIGHT_STYLED, FRAMEBUFFER_WIDTH};

#[derive(Debug, Clone)]
struct Cell {
    ch: char,
    style: Option<String>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', style: None }
    }
}

pub struct Framebuffer {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
    cursor_row: usize,
    cursor_col: usize,
}

impl Framebuffer {
    pub fn new(styled: bool) -> Self {
        let height = if styled { FRAMEBUFFER_HEIGHT_STYLED } else { FRAMEBUFFER_HEIGHT_PLAIN };
        Self::with_dims(FRAMEBUFFER_WIDTH, height)
    }

    pub fn with_dims(width: usize, height: usize) -> Self {
        let grid = vec![vec![Cell::default(); width]; height];
        Self { width, height, grid, cursor_row: 0, cursor_col: 0 }
    }

    /// Writes `s`, advancing the cursor. `\n`/`\r` move to the next row at
    /// column 0; writes past the last column wrap to the next row.
    pub fn print(&mut self, s: &str) {
        self.print_styled(s, None);
    }

    /// `style`, when given, is stored verbatim as the cell's rendered form
    /// (escape sequence and character already combined) and written in
    /// place of `ch` at flush time — callers wanting per-character color
    /// should call this once per character, as `printlayout`-style heatmap
    /// rendering does.
    pub fn print_styled(&mut self, s: &str, style: Option<&str>) {
        for c in s.chars() {
            if c == '\n' || c == '\r' {
                self.cursor_row += 1;
                self.cursor_col = 0;
                continue;
            }
            if self.cursor_col >= self.width {
                self.cursor_row += 1;
                self.cursor_col = 0;
            }
            if self.cursor_row >= self.height {
                // Grid is a fixed canvas; further writes fall off it rather
                // than growing the buffer or panicking.
                continue;
            }
            self.grid[self.cursor_row][self.cursor_col] = Cell {
                ch: c,
                style: style.map(|s| s.to_string()),
            };
            self.cursor_col += 1;
        }
    }

    pub fn move_cursor(&mut self, x: usize, y: usize) {
        self.cursor_row = y;
        self.cursor_col = x;
    }

    pub fn move_cursor_up(&mut self, bias: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(bias);
    }

    pub fn move_cursor_down(&mut self, bias: usize) {
        self.cursor_row += bias;
    }

    pub fn move_cursor_forward(&mut self, bias: usize) {
        self.cursor_col += bias;
    }

    pub fn move_cursor_backward(&mut self, bias: usize) {
        self.cursor_col = self.cursor_col.saturating_sub(bias);
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Serializes the grid row-by-row (styling prefixes inlined) and clears
    /// it for the next frame.
    pub fn flush(&mut self) -> String {
        let mut out = String::with_capacity(self.width * self.height + self.height);
        for row in &self.grid {
            for cell in row {
                if let Some(style) = &cell.style {
                    out.push_str(style);
                } else {
                    out.push(cell.ch);
                }
            }
            out.push('\n');
        }
        self.clear();
        out
    }

    /// `flush()` with trailing whitespace stripped.
    pub fn flush_and_trim(&mut self) -> String {
        let s = self.flush();
        s.trim_end().to_string()
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![Cell::default(); self.width]; self.height];
        self.cursor_row = 0;
        self.cursor_col = 0;
    }
}
