//! Markdown table builder

use console::measure_text_width;

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Left aligned (text)
    Left,
    /// Right aligned (numbers)
    Right,
}

/// A markdown table with padded columns
///
/// # Examples
///
/// ```
/// use bundle_diff::report::table::{Align, MarkdownTable};
///
/// let mut table = MarkdownTable::new(&[("Name", Align::Left), ("Size", Align::Right)]);
/// table.push_row(vec!["main.js".to_string(), "1 kB".to_string()]);
///
/// assert_eq!(
///     table.render(),
///     "| Name    | Size |\n| ------- | ---: |\n| main.js | 1 kB |\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownTable {
    headers: Vec<String>,
    alignments: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Create a table from `(header, alignment)` pairs
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Self {
            headers: columns.iter().map(|(h, _)| escape_cell(h)).collect(),
            alignments: columns.iter().map(|(_, a)| *a).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells are left empty, extra cells are dropped
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row: Vec<String> = cells
            .iter()
            .take(self.headers.len())
            .map(|c| escape_cell(c))
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Whether the table has no body rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with every column padded to its widest cell
    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                std::iter::once(&self.headers[col])
                    .chain(self.rows.iter().map(|row| &row[col]))
                    .map(|cell| measure_text_width(cell))
                    .max()
                    .unwrap_or(0)
                    // delimiter rows need at least three characters
                    .max(3)
            })
            .collect();

        let mut output = String::new();
        output.push_str(&self.render_row(&self.headers, &widths));

        let delimiters: Vec<String> = widths
            .iter()
            .zip(&self.alignments)
            .map(|(width, align)| match align {
                Align::Left => "-".repeat(*width),
                Align::Right => format!("{}:", "-".repeat(width - 1)),
            })
            .collect();
        output.push_str(&format!("| {} |\n", delimiters.join(" | ")));

        for row in &self.rows {
            output.push_str(&self.render_row(row, &widths));
        }

        output
    }

    fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.alignments)
            .map(|((cell, width), align)| {
                let fill = " ".repeat(width.saturating_sub(measure_text_width(cell)));
                match align {
                    Align::Left => format!("{}{}", cell, fill),
                    Align::Right => format!("{}{}", fill, cell),
                }
            })
            .collect();
        format!("| {} |\n", padded.join(" | "))
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}
