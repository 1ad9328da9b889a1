//! Reader for basic whitespace-separated tables.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{TableError, TableResult};

/// A table held column-wise, every value parsed as f64.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl AsciiTable {
    /// Read a table from disk.
    pub fn read<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let table = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            columns = table.names.len(),
            "Read table"
        );
        Ok(table)
    }

    /// Parse table text. Blank lines and lines starting with `#` are
    /// skipped; the first remaining line is the header.
    pub fn parse(text: &str) -> TableResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
        let names: Vec<String> = header.split_whitespace().map(str::to_string).collect();
        let mut columns = vec![Vec::new(); names.len()];

        for (line_no, line) in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != names.len() {
                return Err(TableError::RowLength {
                    line: line_no,
                    expected: names.len(),
                    found: tokens.len(),
                });
            }
            for (column, token) in columns.iter_mut().zip(tokens) {
                let value = token.parse::<f64>().map_err(|_| TableError::Parse {
                    line: line_no,
                    token: token.to_string(),
                })?;
                column.push(value);
            }
        }

        Ok(Self { names, columns })
    }

    /// Column names in header order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values of the named column.
    pub fn column(&self, name: &str) -> TableResult<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|k| self.columns[k].as_slice())
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}
