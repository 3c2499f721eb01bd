//! Tabular results
//!
//! A [`Table`] is what every list operation returns: typed rows in the
//! order the API sent them, the column headings, and the paging metadata
//! of the single response they came from.

use super::rows::TabularRow;
use super::types::ChList;
use serde::Serialize;
use serde_json::{Map, Value};

/// Paging metadata of one list response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub items_per_page: Option<u32>,
    pub start_index: u32,
    /// Total across all pages, if the endpoint reports it
    pub total: Option<u64>,
    /// Items actually returned in this response
    pub returned: usize,
}

impl PageInfo {
    pub fn from_list<T>(list: &ChList<T>) -> Self {
        Self {
            items_per_page: list.items_per_page,
            start_index: list.start_index.unwrap_or(0),
            total: list.total(),
            returned: list.items.len(),
        }
    }

    /// `start_index` for the following page, or `None` when this was the last
    pub fn next_start_index(&self) -> Option<u32> {
        if self.returned == 0 {
            return None;
        }
        let next = u64::from(self.start_index) + self.returned as u64;
        match self.total {
            Some(total) if next < total => u32::try_from(next).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table<R> {
    pub columns: &'static [&'static str],
    pub rows: Vec<R>,
    pub page: PageInfo,
}

impl<R: TabularRow> Table<R> {
    pub fn new(rows: Vec<R>, page: PageInfo) -> Self {
        Self {
            columns: R::COLUMNS,
            rows,
            page,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// All cells of the named column, top to bottom
    pub fn column(&self, column: &str) -> Option<Vec<String>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.cells().swap_remove(idx))
                .collect(),
        )
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<String> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r.cells().swap_remove(idx))
    }

    /// Keep only rows matching `keep`; paging metadata is left as returned
    pub fn retain(&mut self, keep: impl FnMut(&R) -> bool) {
        self.rows.retain(keep);
    }

    /// Rows as JSON objects keyed by column heading
    pub fn to_records(&self) -> Value {
        let records = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row.cells())
                    .map(|(column, cell)| (column.to_string(), Value::String(cell)))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(records)
    }

    /// Plain text layout with space-padded columns
    pub fn render_text(&self) -> String {
        let cells: Vec<Vec<String>> = self.rows.iter().map(|r| r.cells()).collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = Vec::with_capacity(cells.len() + 2);
        lines.push(pad_line(self.columns.iter().copied(), &widths));
        lines.push(pad_line(rule.iter().map(String::as_str), &widths));
        for row in &cells {
            lines.push(pad_line(row.iter().map(String::as_str), &widths));
        }

        lines.join("\n")
    }
}

fn pad_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
