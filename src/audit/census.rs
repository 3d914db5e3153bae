use std::collections::HashMap;

use crate::data::model::{CellValue, Dataset};
use crate::error::AuditError;

/// Null/absent count for every column, in header order.
pub fn missing_counts(dataset: &Dataset) -> Vec<(String, usize)> {
    dataset
        .column_names
        .iter()
        .map(|col| {
            let missing = dataset.column(col).filter(|v| v.is_null()).count();
            (col.clone(), missing)
        })
        .collect()
}

/// Number of rows whose `column` value occurs more than once, counting every
/// such row (so `a, a, b` gives 2). Nulls compare equal to each other.
pub fn duplicate_rows(dataset: &Dataset, column: &str) -> usize {
    let mut occurrences: HashMap<&CellValue, usize> = HashMap::new();
    for value in dataset.column(column) {
        *occurrences.entry(value).or_insert(0) += 1;
    }
    occurrences.values().filter(|&&n| n > 1).sum()
}

/// Length-based checks need a column that holds text. A column with only
/// nulls passes; so does a mixed one, whose non-text cells simply have no
/// length.
pub fn ensure_text_column(dataset: &Dataset, column: &str) -> Result<(), AuditError> {
    let mut non_null = dataset.column(column).filter(|v| !v.is_null()).peekable();
    if non_null.peek().is_none() {
        return Ok(());
    }
    if non_null.any(|v| v.as_text().is_some()) {
        Ok(())
    } else {
        Err(AuditError::NonTextColumn(column.to_string()))
    }
}
