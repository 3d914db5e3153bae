// ---------------------------------------------------------------------------
// Fixed inputs and audit thresholds
// ---------------------------------------------------------------------------

/// Dataset analysed by the binary, relative to the working directory.
pub const DATASET_PATH: &str = "cuisines.csv";

pub const NAME_COLUMN: &str = "name";
pub const INGREDIENTS_COLUMN: &str = "ingredients";
pub const INSTRUCTIONS_COLUMN: &str = "instructions";
pub const CUISINE_COLUMN: &str = "cuisine";
pub const DIET_COLUMN: &str = "diet";

/// Columns the audit refuses to run without.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    INGREDIENTS_COLUMN,
    INSTRUCTIONS_COLUMN,
    CUISINE_COLUMN,
    DIET_COLUMN,
];

/// Thresholds used by the audit and the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Text fields strictly shorter than this are "short".
    pub min_text_len: usize,
    /// Number of improper records shown in the sample.
    pub sample_size: usize,
    /// Number of cuisine groups shown.
    pub top_cuisines: usize,
    /// Longest cell printed in the sample table before it is cut.
    pub max_cell_width: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_text_len: 20,
            sample_size: 5,
            top_cuisines: 10,
            max_cell_width: 50,
        }
    }
}
