use super::model::{CellValue, Dataset, Record};
use crate::config::{INGREDIENTS_COLUMN, INSTRUCTIONS_COLUMN};

// ---------------------------------------------------------------------------
// Row predicates used by the census and the improper-record sample
// ---------------------------------------------------------------------------

/// Short after substituting the empty string for null: a null counts as
/// length 0. Non-text values have no length and are never short.
pub fn is_short_filled(value: &CellValue, min_len: usize) -> bool {
    let len = match value {
        CellValue::Null => Some(0),
        other => other.text_len(),
    };
    len.is_some_and(|l| l < min_len)
}

/// Short without substitution: a null has no length, so the comparison is
/// false for it.
pub fn is_short_raw(value: &CellValue, min_len: usize) -> bool {
    value.text_len().is_some_and(|l| l < min_len)
}

/// A record is improper when either text field is null or shorter than
/// `min_len`.
pub fn is_improper(record: &Record, min_len: usize) -> bool {
    let ingredients = record.get(INGREDIENTS_COLUMN);
    let instructions = record.get(INSTRUCTIONS_COLUMN);

    ingredients.is_null()
        || instructions.is_null()
        || is_short_raw(ingredients, min_len)
        || is_short_raw(instructions, min_len)
}

/// Return indices of records whose `column` is short (null counted as
/// empty).
pub fn short_indices(dataset: &Dataset, column: &str, min_len: usize) -> Vec<usize> {
    dataset
        .column(column)
        .enumerate()
        .filter(|(_, value)| is_short_filled(value, min_len))
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of improper records, in record order.
pub fn improper_indices(dataset: &Dataset, min_len: usize) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| is_improper(record, min_len))
        .map(|(i, _)| i)
        .collect()
}
