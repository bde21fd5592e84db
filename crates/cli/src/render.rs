//! Plain-text and JSON rendering of assignment results.

use anyhow::{Context, Result};

use ensemble_core::{Catalog, PartAssignment};

/// Render rows as an aligned text table with a dashed rule under the header.
fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(header.iter().map(|h| h.to_string()).collect()));
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push(line(row.clone()));
    }
    out.join("\n") + "\n"
}

/// Columns: Instrument, Sort Number (optional), Assigned Part.
pub fn render_assignments(records: &[PartAssignment], show_sort_number: bool) -> String {
    let header: &[&str] = if show_sort_number {
        &["Instrument", "Sort Number", "Assigned Part"]
    } else {
        &["Instrument", "Assigned Part"]
    };

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            let mut row = vec![r.label.clone()];
            if show_sort_number {
                row.push(r.sort_key.to_string());
            }
            row.push(r.assigned_part.to_string());
            row
        })
        .collect();

    table(header, &rows)
}

pub fn render_json(records: &[PartAssignment]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize assignments")
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let rows: Vec<Vec<String>> = catalog
        .entries()
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                e.role.to_string(),
                format!("{:+}", e.octave_offset),
            ]
        })
        .collect();
    table(&["Instrument", "Role", "Octave"], &rows)
}
