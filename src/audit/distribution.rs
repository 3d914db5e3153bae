use std::collections::HashMap;

use crate::data::model::{CellValue, Dataset};

/// One group of a categorical column and how many records fall into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub value: CellValue,
    pub count: usize,
}

/// Count records per distinct `column` value, nulls included as their own
/// group. Sorted by descending count; equal counts keep first-seen order.
pub fn value_counts(dataset: &Dataset, column: &str) -> Vec<GroupCount> {
    let mut slots: HashMap<&CellValue, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();

    for value in dataset.column(column) {
        match slots.get(value) {
            Some(&slot) => groups[slot].count += 1,
            None => {
                slots.insert(value, groups.len());
                groups.push(GroupCount {
                    value: value.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable: ties stay in first-seen order
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
