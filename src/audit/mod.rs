//! Audit layer: every statistic of the report, computed up front.
//!
//! Nothing here prints. [`AuditReport::build`] either yields the complete
//! set of figures or fails before any of them is shown.

pub mod census;
pub mod distribution;

use crate::config::{
    AuditConfig, CUISINE_COLUMN, DIET_COLUMN, INGREDIENTS_COLUMN, INSTRUCTIONS_COLUMN,
    NAME_COLUMN, REQUIRED_COLUMNS,
};
use crate::data::filter::{improper_indices, short_indices};
use crate::data::model::{CellValue, Dataset};
use crate::error::AuditError;

use distribution::{GroupCount, value_counts};

/// One row of the improper-record sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ImproperRecord {
    /// Zero-based position of the record in the dataset.
    pub position: usize,
    pub name: CellValue,
    pub ingredients: CellValue,
    pub instructions: CellValue,
}

/// All figures shown by the report, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub total_rows: usize,
    /// Null/absent count per column, header order.
    pub missing: Vec<(String, usize)>,
    pub duplicate_names: usize,
    pub short_ingredients: usize,
    pub short_instructions: usize,
    /// At most `sample_size` improper records, in record order.
    pub improper_sample: Vec<ImproperRecord>,
    /// Top `top_cuisines` groups.
    pub cuisines: Vec<GroupCount>,
    /// Every diet group.
    pub diets: Vec<GroupCount>,
}

impl AuditReport {
    pub fn build(dataset: &Dataset, config: &AuditConfig) -> Result<Self, AuditError> {
        dataset.require_columns(&REQUIRED_COLUMNS)?;
        census::ensure_text_column(dataset, INGREDIENTS_COLUMN)?;
        census::ensure_text_column(dataset, INSTRUCTIONS_COLUMN)?;
        if dataset.is_empty() {
            log::warn!("dataset has a header but no records");
        }

        let missing = census::missing_counts(dataset);
        let duplicate_names = census::duplicate_rows(dataset, NAME_COLUMN);

        let short_ingredients =
            short_indices(dataset, INGREDIENTS_COLUMN, config.min_text_len).len();
        let short_instructions =
            short_indices(dataset, INSTRUCTIONS_COLUMN, config.min_text_len).len();

        let improper = improper_indices(dataset, config.min_text_len);
        log::debug!("{} improper records", improper.len());
        let improper_sample = improper
            .into_iter()
            .take(config.sample_size)
            .map(|position| {
                let record = &dataset.records[position];
                ImproperRecord {
                    position,
                    name: record.get(NAME_COLUMN).clone(),
                    ingredients: record.get(INGREDIENTS_COLUMN).clone(),
                    instructions: record.get(INSTRUCTIONS_COLUMN).clone(),
                }
            })
            .collect();

        let mut cuisines = value_counts(dataset, CUISINE_COLUMN);
        log::debug!("{} distinct cuisines", cuisines.len());
        cuisines.truncate(config.top_cuisines);

        let diets = value_counts(dataset, DIET_COLUMN);

        Ok(AuditReport {
            total_rows: dataset.len(),
            missing,
            duplicate_names,
            short_ingredients,
            short_instructions,
            improper_sample,
            cuisines,
            diets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [&str; 5] = ["name", "ingredients", "instructions", "cuisine", "diet"];
    const LONG: &str = "two cups of rice, one cup of water";

    #[test]
    fn test_build_full_report() {
        let ds = Dataset::from_rows(
            &COLUMNS,
            &[
                &[Some("Dal"), Some(LONG), Some(LONG), Some("Indian"), Some("Vegetarian")],
                &[Some("Dal"), None, Some(LONG), Some("Indian"), None],
                &[Some("Pho"), Some(LONG), Some("boil"), Some("Vietnamese"), Some("Vegetarian")],
                &[Some("Toast"), Some(""), Some(LONG), None, Some("Vegan")],
            ],
        );
        let report = AuditReport::build(&ds, &AuditConfig::default()).unwrap();

        assert_eq!(report.total_rows, 4);
        assert_eq!(
            report.missing,
            vec![
                ("name".to_string(), 0),
                ("ingredients".to_string(), 1),
                ("instructions".to_string(), 0),
                ("cuisine".to_string(), 1),
                ("diet".to_string(), 1),
            ]
        );
        assert_eq!(report.duplicate_names, 2);
        assert_eq!(report.short_ingredients, 2);
        assert_eq!(report.short_instructions, 1);

        let positions: Vec<usize> = report.improper_sample.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert!(report.improper_sample[0].ingredients.is_null());

        assert_eq!(report.cuisines[0].value, CellValue::Text("Indian".into()));
        assert_eq!(report.cuisines[0].count, 2);
        assert_eq!(report.cuisines.len(), 3);
        assert_eq!(report.diets.len(), 3);
    }

    #[test]
    fn test_sample_and_cuisines_are_capped() {
        let names: Vec<String> = (0..15).map(|i| format!("recipe {i}")).collect();
        let cuisines: Vec<String> = (0..15).map(|i| format!("cuisine {i}")).collect();
        let rows: Vec<[Option<&str>; 5]> = (0..15)
            .map(|i| {
                [
                    Some(names[i].as_str()),
                    Some("salt"),
                    Some(LONG),
                    Some(cuisines[i].as_str()),
                    Some("Vegan"),
                ]
            })
            .collect();
        let row_refs: Vec<&[Option<&str>]> = rows.iter().map(|r| r.as_slice()).collect();
        let ds = Dataset::from_rows(&COLUMNS, &row_refs);

        let report = AuditReport::build(&ds, &AuditConfig::default()).unwrap();
        assert_eq!(report.improper_sample.len(), 5);
        assert_eq!(report.cuisines.len(), 10);
        assert_eq!(report.cuisines[0].value, CellValue::Text("cuisine 0".into()));
        assert_eq!(report.diets.len(), 1);
    }

    #[test]
    fn test_missing_column_fails() {
        let ds = Dataset::from_rows(&["name", "ingredients", "instructions", "cuisine"], &[]);
        assert_eq!(
            AuditReport::build(&ds, &AuditConfig::default()),
            Err(AuditError::MissingColumn("diet".into()))
        );
    }

    #[test]
    fn test_numeric_text_column_fails() {
        let mut ds = Dataset::from_rows(&COLUMNS, &[&[Some("a"), None, Some(LONG), None, None]]);
        ds.records[0]
            .fields
            .insert("ingredients".into(), CellValue::Float(1.5));
        assert_eq!(
            AuditReport::build(&ds, &AuditConfig::default()),
            Err(AuditError::NonTextColumn("ingredients".into()))
        );
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::from_rows(&COLUMNS, &[]);
        let report = AuditReport::build(&ds, &AuditConfig::default()).unwrap();
        assert_eq!(report.total_rows, 0);
        assert!(report.improper_sample.is_empty());
        assert!(report.cuisines.is_empty());
        assert!(report.missing.iter().all(|(_, n)| *n == 0));
    }
}
