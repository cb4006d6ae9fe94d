//! Values editor
//!
//! A minimal multi-line text buffer for the chart values YAML. The install
//! dialog does not own it; it reads the buffer once, at submit time, through
//! [`ValuesSource`].

use crate::dialogs::ValuesSource;

#[derive(Debug, Clone, Default)]
pub struct ValuesEditor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
    loaded: bool,
}

impl ValuesEditor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            ..Default::default()
        }
    }

    /// Fill with `text` the first time content becomes available
    pub fn load(&mut self, text: &str) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.lines = text.lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Byte offset of the cursor column in the current line
    fn byte_col(&self) -> usize {
        self.lines[self.row]
            .char_indices()
            .nth(self.col)
            .map(|(i, _)| i)
            .unwrap_or(self.lines[self.row].len())
    }

    fn line_chars(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_col();
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    pub fn newline(&mut self) {
        let at = self.byte_col();
        let rest = self.lines[self.row].split_off(at);
        // keep the indentation of the line being split
        let indent: String = self.lines[self.row]
            .chars()
            .take_while(|c| *c == ' ')
            .collect();
        self.col = indent.chars().count();
        self.row += 1;
        self.lines.insert(self.row, format!("{}{}", indent, rest));
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_col();
            self.lines[self.row].remove(at);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_chars(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_chars(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_chars(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    /// First visible line for a viewport of `height` rows that keeps the cursor in view
    pub fn scroll_for(&mut self, height: usize) -> usize {
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if height > 0 && self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
        self.scroll
    }
}

impl ValuesSource for ValuesEditor {
    fn current_values(&self) -> Option<String> {
        self.loaded.then(|| self.text())
    }
}
