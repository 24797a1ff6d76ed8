//! Box-drawing table renderer for fact listings.
//!
//! Column widths are measured in terminal cells, so CJK text (two cells per
//! character) lines up with ASCII.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// A table builder that collects headers and rows, then renders to a
/// box-drawing string.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Extra cells are dropped; missing cells are filled with "".
    pub fn add_row(&mut self, cells: &[&str]) {
        let row = (0..self.headers.len())
            .map(|i| cells.get(i).copied().unwrap_or_default().to_string())
            .collect();
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(cell));
            }
        }
        widths
    }

    fn pad(text: &str, width: usize) -> String {
        let fill = width.saturating_sub(display_width(text));
        format!("{text}{}", " ".repeat(fill))
    }

    fn border(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
        let segments: Vec<String> = widths.iter().map(|w| "\u{2500}".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    }

    /// Render the table:
    ///
    /// ```text
    /// ┌─────────┬─────────┐
    /// │ Subject │ Object  │
    /// ├─────────┼─────────┤
    /// │ Python  │ Guido   │
    /// └─────────┴─────────┘
    /// ```
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = vec![Self::border(&widths, "\u{250c}", "\u{252c}", "\u{2510}")];

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!(" {} ", Self::pad(h, *w).bold()))
            .collect();
        lines.push(format!("\u{2502}{}\u{2502}", header.join("\u{2502}")));
        lines.push(Self::border(&widths, "\u{251c}", "\u{253c}", "\u{2524}"));

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!(" {} ", Self::pad(cell, *w)))
                .collect();
            lines.push(format!("\u{2502}{}\u{2502}", cells.join("\u{2502}")));
        }

        lines.push(Self::border(&widths, "\u{2514}", "\u{2534}", "\u{2518}"));
        lines.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}
