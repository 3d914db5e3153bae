use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Record};
use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a recipe table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line
/// * `.json`    – `[{ "name": ..., "ingredients": ..., ... }, ...]`
/// * `.parquet` – one column per field (strings, ints, floats, bools)
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(AuditError::UnsupportedFormat(other.to_string()).into()),
    };

    log::info!(
        "loaded {} records with {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Cell texts that read as missing, matching what a pandas export
/// round-trips as NaN.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Inferred type of a whole CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

/// CSV layout: header row with column names, then one record per row.
/// A row shorter than the header reads its missing trailing fields as null;
/// a longer one is an error.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let raw_headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.is_empty()) {
        return Err(AuditError::EmptyFile.into());
    }
    let headers = dedupe_headers(raw_headers);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV row {line}"))?;
        if record.len() > headers.len() {
            return Err(AuditError::TooManyFields {
                row: line,
                expected: headers.len(),
                found: record.len(),
            }
            .into());
        }

        let mut cells: Vec<Option<String>> = record
            .iter()
            .map(|cell| (!is_na_token(cell)).then(|| cell.to_string()))
            .collect();
        cells.resize(headers.len(), None);
        rows.push(cells);
    }
    log::debug!("read {} raw CSV rows", rows.len());

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|col_idx| {
            infer_column_kind(rows.iter().map(|row| row.get(col_idx).and_then(|c| c.as_deref())))
        })
        .collect();

    let records = rows
        .into_iter()
        .map(|row| {
            let fields = row
                .into_iter()
                .zip(headers.iter().zip(kinds.iter()))
                .map(|(raw, (col_name, kind))| {
                    let value = match raw {
                        Some(text) => convert_cell(text, *kind),
                        None => CellValue::Null,
                    };
                    (col_name.clone(), value)
                })
                .collect();
            Record { fields }
        })
        .collect();

    Ok(Dataset::from_records(headers, records))
}

fn is_na_token(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

/// Repeated header names get a `.1`, `.2`, … suffix so no column is lost.
fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut out = Vec::with_capacity(raw.len());
    for name in raw {
        let count = seen.entry(name.clone()).or_insert(0);
        if *count == 0 {
            out.push(name);
        } else {
            out.push(format!("{name}.{count}"));
        }
        *count += 1;
    }
    out
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

/// A column is numeric or boolean only when every non-null cell is. An
/// integer column with a null in it has no integer representation for the
/// gap and is read as float.
fn infer_column_kind<'a>(cells: impl Iterator<Item = Option<&'a str>>) -> ColumnKind {
    let mut any = false;
    let mut any_null = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for cell in cells {
        let Some(cell) = cell else {
            any_null = true;
            continue;
        };
        any = true;
        all_int &= cell.parse::<i64>().is_ok();
        all_float &= cell.parse::<f64>().is_ok();
        all_bool &= parse_bool(cell).is_some();
    }

    match (any, all_int, all_float, all_bool) {
        (false, ..) => ColumnKind::Text,
        (true, true, _, _) if any_null => ColumnKind::Float,
        (true, true, _, _) => ColumnKind::Integer,
        (true, _, true, _) => ColumnKind::Float,
        (true, _, _, true) => ColumnKind::Bool,
        _ => ColumnKind::Text,
    }
}

fn convert_cell(text: String, kind: ColumnKind) -> CellValue {
    match kind {
        ColumnKind::Integer => match text.parse() {
            Ok(i) => CellValue::Integer(i),
            Err(_) => CellValue::Text(text),
        },
        ColumnKind::Float => match text.parse() {
            Ok(f) => CellValue::Float(f),
            Err(_) => CellValue::Text(text),
        },
        ColumnKind::Bool => match parse_bool(&text) {
            Some(b) => CellValue::Bool(b),
            None => CellValue::Text(text),
        },
        ColumnKind::Text => CellValue::Text(text),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "name": "Dal", "ingredients": "...", "cuisine": "Indian", "diet": null },
///   ...
/// ]
/// ```
///
/// Columns are the union of all keys, in first-seen order.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            fields.insert(key.clone(), json_to_cell(val));
        }
        records.push(Record { fields });
    }

    if column_names.is_empty() {
        return Err(AuditError::EmptyFile.into());
    }
    Ok(Dataset::from_records(column_names, records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one recipe per row.
///
/// String, integer, float and boolean columns map onto [`CellValue`];
/// any other Arrow type is kept as its display text.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    if column_names.is_empty() {
        return Err(AuditError::EmptyFile.into());
    }

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let fields = column_names
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), extract_cell(col, row)))
                .collect();
            records.push(Record { fields });
        }
    }

    Ok(Dataset::from_records(column_names, records))
}

// -- Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => CellValue::Text(col.as_string_view().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => match array_value_to_string(col.as_ref(), row) {
            Ok(text) => CellValue::Text(text),
            Err(_) => CellValue::Text(format!("{other:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_csv_na_tokens_read_as_null() {
        let file = temp_with(
            ".csv",
            "name,ingredients,instructions,cuisine,diet\n\
             Dal,lentils,,Indian,NA\n\
             Soup,N/A,boil,null,Vegan\n",
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.column_names,
            vec!["name", "ingredients", "instructions", "cuisine", "diet"]
        );
        assert!(ds.records[0].get("instructions").is_null());
        assert!(ds.records[0].get("diet").is_null());
        assert!(ds.records[1].get("ingredients").is_null());
        assert!(ds.records[1].get("cuisine").is_null());
        assert_eq!(ds.records[1].get("diet"), &CellValue::Text("Vegan".into()));
    }

    #[test]
    fn test_csv_quoted_fields_keep_commas_and_newlines() {
        let file = temp_with(
            ".csv",
            "name,ingredients\n\"Pasta\",\"flour, eggs\nsalt\"\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.records[0].get("ingredients"),
            &CellValue::Text("flour, eggs\nsalt".into())
        );
    }

    #[test]
    fn test_csv_column_types_inferred_per_column() {
        let file = temp_with(
            ".csv",
            "id,rating,vegan,code,servings\n1,4.5,True,7,2\n2,3,false,x7,4\n,,,,6\n",
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.records[0].get("servings"), &CellValue::Integer(2));
        // a null turns an integer column into floats
        assert_eq!(ds.records[0].get("id"), &CellValue::Float(1.0));
        assert_eq!(ds.records[0].get("id").to_string(), "1.0");
        assert_eq!(ds.records[1].get("rating"), &CellValue::Float(3.0));
        assert_eq!(ds.records[1].get("vegan"), &CellValue::Bool(false));
        // one non-numeric cell keeps the whole column as text
        assert_eq!(ds.records[0].get("code"), &CellValue::Text("7".into()));
        assert!(ds.records[2].get("id").is_null());
    }

    #[test]
    fn test_csv_duplicate_headers_are_suffixed() {
        let file = temp_with(".csv", "name,name,diet\na,b,c\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["name", "name.1", "diet"]);
        assert_eq!(ds.records[0].get("name.1"), &CellValue::Text("b".into()));
    }

    #[test]
    fn test_csv_empty_file_is_rejected() {
        let file = temp_with(".csv", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AuditError>(),
            Some(&AuditError::EmptyFile)
        );
    }

    #[test]
    fn test_csv_short_row_reads_trailing_nulls() {
        let file = temp_with(
            ".csv",
            "name,ingredients,instructions,cuisine,diet\n\
             Dal,lentils,simmer,Indian,Vegan\n\
             Pho,noodles\n",
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        let pho = &ds.records[1];
        assert_eq!(pho.get("ingredients"), &CellValue::Text("noodles".into()));
        assert_eq!(pho.fields.len(), 5);
        assert!(pho.get("instructions").is_null());
        assert!(pho.get("cuisine").is_null());
        assert!(pho.get("diet").is_null());
    }

    #[test]
    fn test_csv_long_row_is_rejected_with_line() {
        let file = temp_with(".csv", "name,diet\na,b\nc,d,e\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AuditError>(),
            Some(&AuditError::TooManyFields {
                row: 3,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(err.to_string(), "CSV row 3: expected 2 fields, saw 3");
    }

    #[test]
    fn test_missing_file_error_mentions_step() {
        let err = load_file(Path::new("/nonexistent/dir/cuisines.csv")).unwrap_err();
        assert!(format!("{err:#}").starts_with("opening CSV"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_with(".xlsx", "whatever");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported file extension: .xlsx");
    }

    #[test]
    fn test_json_records_union_columns_in_order() {
        let file = temp_with(
            ".json",
            r#"[
                {"name": "Dal", "cuisine": "Indian", "servings": 4},
                {"name": "Pho", "diet": null, "rating": 4.5}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.column_names, vec!["name", "cuisine", "servings", "diet", "rating"]);
        assert_eq!(ds.records[0].get("servings"), &CellValue::Integer(4));
        assert!(ds.records[0].get("diet").is_null());
        assert!(ds.records[1].get("cuisine").is_null());
        assert_eq!(ds.records[1].get("rating"), &CellValue::Float(4.5));
    }

    #[test]
    fn test_json_rejects_non_array() {
        let file = temp_with(".json", r#"{"name": "Dal"}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_parquet_round_trips_strings_and_nulls() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("cuisine", DataType::Utf8, true),
            Field::new("servings", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Dal"), Some("Pho")])),
                Arc::new(StringArray::from(vec![Some("Indian"), None])),
                Arc::new(Int64Array::from(vec![Some(4), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["name", "cuisine", "servings"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("servings"), &CellValue::Integer(4));
        assert!(ds.records[1].get("cuisine").is_null());
        assert!(ds.records[1].get("servings").is_null());
    }

    #[test]
    fn test_infer_column_kind() {
        fn kind(cells: &[Option<&str>]) -> ColumnKind {
            infer_column_kind(cells.iter().copied())
        }

        assert_eq!(kind(&[Some("1"), Some("2")]), ColumnKind::Integer);
        assert_eq!(kind(&[Some("1"), None]), ColumnKind::Float);
        assert_eq!(kind(&[Some("1"), Some("2.5")]), ColumnKind::Float);
        assert_eq!(kind(&[Some("True"), None, Some("FALSE")]), ColumnKind::Bool);
        assert_eq!(kind(&[Some("1"), Some("x")]), ColumnKind::Text);
        assert_eq!(kind(&[None, None]), ColumnKind::Text);
        assert_eq!(kind(&[]), ColumnKind::Text);
    }
}
