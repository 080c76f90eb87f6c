//! Plain-text table output for `--output text`.

use unicode_width::UnicodeWidthStr;

use crate::presentation::ChartSpec;

/// Render the chart data as an aligned table with a title line.
///
/// Single-series charts get a `y_label` column; multi-series charts get one
/// column per series, hidden or not.
pub fn render_chart_text(spec: &ChartSpec) -> String {
    let mut header = vec![spec.x_label.clone()];
    if spec.series.len() == 1 {
        header.push(spec.y_label.clone());
    } else {
        header.extend(spec.series.iter().map(|s| s.name.clone()));
    }

    let rows: Vec<Vec<String>> = spec
        .categories
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let mut row = vec![category.clone()];
            row.extend(spec.series.iter().map(|s| {
                spec.value_format
                    .format(s.values.get(idx).copied().unwrap_or(0.0))
            }));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header[col])
                .chain(rows.iter().filter_map(|r| r.get(col)))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let pad = widths[col].saturating_sub(cell.width());
                if col == 0 {
                    format!("{}{}", cell, " ".repeat(pad))
                } else {
                    format!("{}{}", " ".repeat(pad), cell)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&spec.title);
    out.push('\n');
    out.push_str(&format_row(&header));
    out.push('\n');
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
