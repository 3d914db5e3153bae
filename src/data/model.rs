use std::collections::BTreeMap;
use std::fmt;

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a recipe export
/// usually carries. Distributions group cells in a `HashMap`, so
/// `CellValue` must be `Eq + Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Hash so floats can take part in grouping --

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the trailing ".0" on whole floats
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Length in characters. Only text has a length; nulls and numbers
    /// yield `None`.
    pub fn text_len(&self) -> Option<usize> {
        self.as_text().map(|s| s.chars().count())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

static NULL_CELL: CellValue = CellValue::Null;

/// A single record: column_name → value. Columns missing from the map read
/// as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> &CellValue {
        self.fields.get(column).unwrap_or(&NULL_CELL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Column names in header order.
    pub column_names: Vec<String>,
}

impl Dataset {
    pub fn from_records(column_names: Vec<String>, records: Vec<Record>) -> Self {
        Dataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Fail on the first of `columns` the header does not name.
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), AuditError> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(AuditError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Every record's value for `column`, in record order.
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.records.iter().map(move |r| r.get(column))
    }

    /// Build a dataset of text cells, `None` meaning null.
    #[cfg(test)]
    pub fn from_rows(columns: &[&str], rows: &[&[Option<&str>]]) -> Self {
        let records = rows
            .iter()
            .map(|row| Record {
                fields: columns
                    .iter()
                    .zip(row.iter())
                    .map(|(col, cell)| {
                        let value = match cell {
                            Some(s) => CellValue::Text(s.to_string()),
                            None => CellValue::Null,
                        };
                        (col.to_string(), value)
                    })
                    .collect(),
            })
            .collect();
        Dataset::from_records(columns.iter().map(|c| c.to_string()).collect(), records)
    }
}
