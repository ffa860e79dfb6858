//! Table assembly.
//!
//! Columns come out of the extractor with independent lengths. Assembly makes
//! them rectangular by right-padding every short column with `Absent` up to
//! the longest one. Nothing is ever truncated, so when counts differ a row is
//! not guaranteed to describe a single source element across columns.

use std::io::Read;

use crate::error::{Error, Result};
use crate::extractor::{Column, ExtractedValue};

/// Rectangular result of a scrape.
///
/// Invariant: every column holds exactly `len()` values, and `len() > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    names: Vec<String>,
    columns: Vec<Vec<ExtractedValue>>,
    len: usize,
}

/// Pad `columns` into a table.
///
/// Fails with [`Error::NoDataExtracted`] when the longest column is empty (or
/// there are no columns at all); an empty table is never produced.
pub fn assemble(columns: Vec<Column>) -> Result<ResultTable> {
    let max_len = columns.iter().map(Column::len).max().unwrap_or(0);
    if max_len == 0 {
        return Err(Error::NoDataExtracted);
    }

    let mut names = Vec::with_capacity(columns.len());
    let mut values = Vec::with_capacity(columns.len());
    for column in columns {
        let mut cells = column.values;
        cells.resize(max_len, ExtractedValue::Absent);
        names.push(column.name);
        values.push(cells);
    }

    Ok(ResultTable {
        names,
        columns: values,
        len: max_len,
    })
}

impl ResultTable {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Values of the named column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[ExtractedValue]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Row `index` as one value per column, in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<&ExtractedValue>> {
        (index < self.len).then(|| self.columns.iter().map(|c| &c[index]).collect())
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&ExtractedValue>> + '_ {
        (0..self.len).map(|i| self.columns.iter().map(|c| &c[i]).collect())
    }

    /// Read a CSV export back into a table.
    ///
    /// The header row gives column names. Empty fields become `Absent`, all
    /// others `Text`; numbers therefore come back as their printed form.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut columns: Vec<Column> = names.iter().map(|n| Column::new(n.clone(), Vec::new())).collect();

        for record in rdr.records() {
            let record = record?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                column.values.push(if field.is_empty() {
                    ExtractedValue::Absent
                } else {
                    ExtractedValue::Text(field.to_string())
                });
            }
        }

        assemble(columns)
    }
}
