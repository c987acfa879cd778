//! Row-oriented table model shared by every pipeline stage.
//!
//! Transforms take `&Table` and return a new `Table`; nothing in the pipeline
//! mutates a table it does not own.

mod transform;
mod value;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::io;

use serde::{Deserialize, Serialize};

use crate::errors::TableError;

pub use transform::{
    clean_column_names, combine_date_columns, float_to_int_str, names_to_title_case, remove_future_dates,
    set_values,
};
pub use value::Value;

static EMPTY_VALUE: Value = Value::Empty;

/// An ordered set of named columns and the rows holding their values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of `column`, or `Value::Empty` when the table has no such column.
    pub fn get(&self, column: &str) -> &'a Value {
        self.table.value(self.index, column)
    }

    /// Text rendering of `column` (`""` when missing).
    pub fn text(&self, column: &str) -> Cow<'a, str> {
        self.get(column).as_text()
    }

    pub fn values(&self) -> &'a [Value] {
        &self.table.rows[self.index]
    }
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from rows, checking every row matches the column count.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Build a table from JSON objects. Columns appear in order of first use,
    /// following each object's key order; keys absent from a record become
    /// `Value::Empty`. Nested arrays, objects, and booleans are rejected.
    pub fn from_records(records: &[serde_json::Value]) -> Result<Self, TableError> {
        let objects = records
            .iter()
            .enumerate()
            .map(|(index, record)| record.as_object().ok_or(TableError::InvalidRecord { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns: Vec<String> = Vec::new();
        for key in objects.iter().flat_map(|object| object.keys()) {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }

        let mut table = Self::new(columns.clone());
        for (index, object) in objects.iter().enumerate() {
            let row = columns
                .iter()
                .map(|column| match object.get(column) {
                    Some(cell) => Value::deserialize(cell).map_err(|_| TableError::InvalidCell {
                        index,
                        column: column.clone(),
                    }),
                    None => Ok(Value::Empty),
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Append a row to a table under construction.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidthMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Fail with `ColumnMissing` for the first absent column of a contract.
    pub fn require_columns(&self, columns: &[&str], table: &str) -> Result<(), TableError> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(TableError::missing(*missing, table)),
            None => Ok(()),
        }
    }

    pub fn row(&self, index: usize) -> Row<'_> {
        Row { table: self, index }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }

    /// Value at (`row`, `column`); `Value::Empty` for an unknown column.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        match self.column_index(column) {
            Some(col) => &self.rows[row][col],
            None => &EMPTY_VALUE,
        }
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[col]).collect())
    }

    /// Project onto `columns` in the given order. Every column must exist.
    pub fn select(&self, columns: &[&str]) -> Result<Table, TableError> {
        self.require_columns(columns, "selection")?;
        Ok(self.select_existing(columns))
    }

    /// Project onto the subset of `columns` present in this table, keeping the
    /// order of `columns`. Used for fixed output contracts.
    pub fn select_existing(&self, columns: &[&str]) -> Table {
        let picked: Vec<(String, usize)> = columns
            .iter()
            .filter_map(|c| self.column_index(c).map(|i| (c.to_string(), i)))
            .collect();
        Table {
            columns: picked.iter().map(|(name, _)| name.clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| picked.iter().map(|(_, i)| row[*i].clone()).collect())
                .collect(),
        }
    }

    /// Add `name` (appended) or replace it in place.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table, TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        let mut out = self.clone();
        match out.column_index(name) {
            Some(col) => {
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row[col] = value;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, value) in out.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(out)
    }

    /// Apply `f` to every value of `name`. Unknown columns leave the table unchanged.
    pub fn map_column(&self, name: &str, f: impl Fn(&Value) -> Value) -> Table {
        let mut out = self.clone();
        if let Some(col) = out.column_index(name) {
            for row in &mut out.rows {
                row[col] = f(&row[col]);
            }
        }
        out
    }

    /// Rebuild every row through `f`, which sees the original row.
    pub fn map_rows(&self, f: impl Fn(Row<'_>) -> Vec<Value>) -> Result<Table, TableError> {
        let rows = self.rows().map(f).collect();
        Table::from_rows(self.columns.clone(), rows)
    }

    /// Keep the rows for which `keep` returns true.
    pub fn filter(&self, mut keep: impl FnMut(Row<'_>) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows()
                .filter(|row| keep(*row))
                .map(|row| row.values().to_vec())
                .collect(),
        }
    }

    /// Drop rows identical (by text rendering) to an earlier row.
    pub fn drop_duplicates(&self) -> Table {
        let mut seen = HashSet::new();
        self.filter(|row| seen.insert(row_key(row.values())))
    }

    /// Keep the first row for each distinct value of `column`.
    pub fn drop_duplicates_by(&self, column: &str) -> Table {
        let mut seen = HashSet::new();
        self.filter(|row| seen.insert(row.text(column).into_owned()))
    }

    /// Stable sort by the text of `columns`; missing values sort last.
    pub fn sort_by(&self, columns: &[&str]) -> Table {
        let indices: Vec<Option<usize>> = columns.iter().map(|c| self.column_index(c)).collect();
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            for col in indices.iter().flatten() {
                let ord = compare_cells(&a[*col], &b[*col]);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Stack tables vertically. The result has the union of their columns in
    /// order of first appearance; absent cells become `Value::Empty`.
    pub fn concat(tables: &[Table]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        let mut rows = Vec::new();
        for table in tables {
            let positions: Vec<Option<usize>> =
                columns.iter().map(|c| table.column_index(c)).collect();
            for row in &table.rows {
                rows.push(
                    positions
                        .iter()
                        .map(|p| p.map(|i| row[i].clone()).unwrap_or_default())
                        .collect(),
                );
            }
        }
        Table { columns, rows }
    }

    /// Render the table as CSV (header + one record per row) onto `writer`.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            out.write_record(row.iter().map(|v| v.as_text().into_owned()))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Text key identifying a row's content for duplicate detection.
pub(crate) fn row_key(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.as_text().into_owned())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

fn compare_cells(a: &Value, b: &Value) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.as_text().cmp(&b.as_text()),
    }
}
