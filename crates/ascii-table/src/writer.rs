//! Table writer with comment preamble and atomic replace.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::format::Column;

/// Accumulates rows and writes them as a text table.
#[derive(Debug, Clone)]
pub struct TableWriter {
    comments: Vec<String>,
    columns: Vec<Column>,
    rows: Vec<Vec<f64>>,
}

impl TableWriter {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            comments: Vec::new(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a comment line. The `# ` prefix is added on output.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one row; it must have one value per column.
    pub fn push_row(&mut self, row: Vec<f64>) -> TableResult<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowLength {
                line: self.rows.len() + 1,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Write the table to any sink.
    pub fn write_to<W: Write>(&self, out: &mut W) -> TableResult<()> {
        for comment in &self.comments {
            writeln!(out, "# {}", comment)?;
        }

        let header: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        writeln!(out, "{}", header.join(" "))?;

        let mut line = String::new();
        for row in &self.rows {
            line.clear();
            for (k, (column, value)) in self.columns.iter().zip(row).enumerate() {
                if k > 0 {
                    line.push(' ');
                }
                line.push_str(&column.format.format(*value));
            }
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Render to a string.
    pub fn to_text(&self) -> TableResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write to `path` atomically, see [`atomic_write`].
    pub fn write_atomic<P: AsRef<Path>>(&self, path: P) -> TableResult<()> {
        let path = path.as_ref();
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        atomic_write(path, &buf)?;

        debug!(
            path = %path.display(),
            rows = self.rows.len(),
            columns = self.columns.len(),
            "Wrote table"
        );
        Ok(())
    }
}

/// Write `contents` to `path` through a temporary file in the same
/// directory, then rename over the destination. Readers see either the old
/// file or the complete new one.
pub fn atomic_write(path: &Path, contents: &[u8]) -> TableResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ColumnFormat;

    fn two_column_writer() -> TableWriter {
        TableWriter::new(vec![Column::index("ir"), Column::sci("rho")])
    }

    #[test]
    fn test_write_header_and_rows() {
        let mut table = two_column_writer().comment("generated for testing");
        table.push_row(vec![0.0, 1.5]).unwrap();
        table.push_row(vec![1.0, -2.0e-3]).unwrap();

        let text = table.to_text().unwrap();
        let expected = "\
# generated for testing
ir rho
000 01.500000e+00
001 -2.000000e-03
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_row_length_checked() {
        let mut table = two_column_writer();
        let err = table.push_row(vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            TableError::RowLength {
                expected: 2,
                found: 1,
                ..
            }
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_plain_int_column() {
        let mut table = TableWriter::new(vec![Column::new("n", ColumnFormat::PLAIN_INT)]);
        table.push_row(vec![12.0]).unwrap();
        assert_eq!(table.to_text().unwrap(), "n\n12\n");
    }
}
