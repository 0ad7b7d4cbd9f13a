//! Aligned plain-text tables for console output.

use unicode_width::UnicodeWidthStr;

use adoption_data::summary::Tabular;

/// Header plus rows, rendered with every column right-aligned.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from summary rows.
    pub fn from_rows<R: Tabular>(rows: &[R]) -> Self {
        Self {
            headers: R::headers().into_iter().map(str::to_string).collect(),
            rows: rows.iter().map(Tabular::cells).collect(),
        }
    }

    /// Keep only the last `n` rows.
    pub fn tail(mut self, n: usize) -> Self {
        let skip = self.rows.len().saturating_sub(n);
        self.rows.drain(..skip);
        self
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                match widths.get_mut(idx) {
                    Some(w) => *w = (*w).max(cell.width()),
                    None => widths.push(cell.width()),
                }
            }
        }
        widths
    }

    /// Render header and rows, columns separated by two spaces.
    pub fn render(&self) -> String {
        if self.headers.is_empty() && self.rows.is_empty() {
            return String::new();
        }

        let widths = self.column_widths();
        let mut out = String::new();
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(idx, width)| {
                    let cell = line.get(idx).map(String::as_str).unwrap_or("");
                    let pad = width.saturating_sub(cell.width());
                    format!("{}{}", " ".repeat(pad), cell)
                })
                .collect();
            out.push_str(&cells.join("  "));
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for TextTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
