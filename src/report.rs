//! Plain-text rendering of an [`AuditReport`].
//!
//! Sections are separated by a blank line. Label/count tables left-align
//! the labels and right-align the counts; the improper-record sample is a
//! left-aligned table keyed by record position.

use std::io::{self, Write};

use crate::audit::distribution::GroupCount;
use crate::audit::AuditReport;
use crate::config::AuditConfig;
use crate::data::model::CellValue;

const COUNT_GAP: &str = "    ";
const COLUMN_GAP: &str = "  ";

/// Write every report section after the announcement line.
pub fn render<W: Write>(report: &AuditReport, config: &AuditConfig, out: &mut W) -> io::Result<()> {
    writeln!(out, "Total rows: {}", report.total_rows)?;

    writeln!(out, "\nMissing values per column:")?;
    write_counts(out, &report.missing)?;

    writeln!(out, "\nDuplicate recipe names: {}", report.duplicate_names)?;

    writeln!(
        out,
        "\nRecipes with very short ingredients (<{} chars): {}",
        config.min_text_len, report.short_ingredients
    )?;
    writeln!(
        out,
        "Recipes with very short instructions (<{} chars): {}",
        config.min_text_len, report.short_instructions
    )?;

    if !report.improper_sample.is_empty() {
        writeln!(out, "\nSample of 'Improper' recipes:")?;
        let mut rows = vec![vec![
            String::new(),
            "name".to_string(),
            "ingredients".to_string(),
            "instructions".to_string(),
        ]];
        for record in &report.improper_sample {
            rows.push(vec![
                record.position.to_string(),
                display_cell(&record.name, config.max_cell_width),
                display_cell(&record.ingredients, config.max_cell_width),
                display_cell(&record.instructions, config.max_cell_width),
            ]);
        }
        write_table(out, &rows)?;
    }

    writeln!(out, "\nCuisine distribution (Top {}):", config.top_cuisines)?;
    write_counts(out, &group_rows(&report.cuisines))?;

    writeln!(out, "\nDiet distribution:")?;
    write_counts(out, &group_rows(&report.diets))?;

    Ok(())
}

fn group_rows(groups: &[GroupCount]) -> Vec<(String, usize)> {
    groups
        .iter()
        .map(|g| (escape_controls(&g.value.to_string()), g.count))
        .collect()
}

fn write_counts<W: Write>(out: &mut W, rows: &[(String, usize)]) -> io::Result<()> {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let count_width = rows
        .iter()
        .map(|(_, c)| c.to_string().len())
        .max()
        .unwrap_or(0);

    for (label, count) in rows {
        writeln!(out, "{label:<label_width$}{COUNT_GAP}{count:>count_width$}")?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, rows: &[Vec<String>]) -> io::Result<()> {
    let n_cols = rows.first().map_or(0, |r| r.len());
    let widths: Vec<usize> = (0..n_cols)
        .map(|i| {
            rows.iter()
                .map(|r| r.get(i).map_or(0, |c| c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Cell text for the sample table: control characters escaped, cut to
/// `max_width` characters with a trailing `...`.
fn display_cell(value: &CellValue, max_width: usize) -> String {
    let text = escape_controls(&value.to_string());
    if text.chars().count() <= max_width {
        return text;
    }
    let kept: String = text.chars().take(max_width.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn escape_controls(s: &str) -> String {
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
