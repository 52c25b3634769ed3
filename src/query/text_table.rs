//! Plain text rendering of tabular results

use std::fmt;

/// A table rendered with right-aligned columns and no row index
///
/// Cells are printed as given: float columns are not padded to a common
/// number of decimals, and SQL NULL shows as `NULL`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let render = |cells: &[String]| -> String {
            widths
                .iter()
                .enumerate()
                .map(|(i, &width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{:>width$}", cell, width = width)
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        write!(f, "{}", render(&self.headers))?;
        for row in &self.rows {
            write!(f, "\n{}", render(row))?;
        }
        Ok(())
    }
}
