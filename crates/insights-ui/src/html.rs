//! Self-contained HTML export of a [`ChartSpec`].
//!
//! The page holds an inline SVG chart, a clickable legend that toggles series
//! and native SVG tooltips on every bar or point. No external assets are
//! referenced, so the file opens offline.

use std::path::Path;

use insights_core::error::{InsightsError, Result};
use tracing::info;

use crate::presentation::{ChartKind, ChartSpec};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 540.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 190.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 100.0;
const Y_TICKS: usize = 5;

const PALETTE: &[&str] = &[
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

const TOGGLE_SCRIPT: &str = r#"
document.querySelectorAll('.legend-item').forEach(function (item) {
  item.addEventListener('click', function () {
    var id = item.getAttribute('data-series');
    var off = item.classList.toggle('off');
    document.querySelectorAll('.series-' + id).forEach(function (el) {
      el.style.display = off ? 'none' : '';
    });
  });
});
"#;

/// Render `spec` as a complete HTML document.
pub fn render_chart_html(spec: &ChartSpec) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    // Scale against every series so toggling never rescales the axis.
    let mut all_visible = spec.clone();
    for s in &mut all_visible.series {
        s.visible = true;
    }
    let max = nice_max(all_visible.max_value());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="28" class="title">{}</text>"#,
        WIDTH / 2.0,
        escape(&spec.title)
    ));

    // ── Axes ──────────────────────────────────────────────────────────────────
    for tick in 0..=Y_TICKS {
        let value = max * tick as f64 / Y_TICKS as f64;
        let y = MARGIN_TOP + plot_h - plot_h * tick as f64 / Y_TICKS as f64;
        svg.push_str(&format!(
            r#"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" class="grid"/><text x="{tx}" y="{ty:.1}" class="ytick">{label}</text>"#,
            x1 = MARGIN_LEFT,
            x2 = MARGIN_LEFT + plot_w,
            tx = MARGIN_LEFT - 8.0,
            ty = y + 4.0,
            label = escape(&spec.value_format.format(value)),
        ));
    }

    let n = spec.categories.len().max(1);
    let band = plot_w / n as f64;
    for (i, category) in spec.categories.iter().enumerate() {
        let x = MARGIN_LEFT + band * (i as f64 + 0.5);
        let y = MARGIN_TOP + plot_h + 14.0;
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" class="xtick" transform="rotate(-35 {x:.1} {y:.1})">{}</text>"#,
            escape(category)
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="axis-label">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 12.0,
        escape(&spec.x_label)
    ));
    svg.push_str(&format!(
        r#"<text x="18" y="{y}" class="axis-label" transform="rotate(-90 18 {y})">{}</text>"#,
        escape(&spec.y_label),
        y = MARGIN_TOP + plot_h / 2.0
    ));

    // ── Marks ─────────────────────────────────────────────────────────────────
    let y_of = |v: f64| MARGIN_TOP + plot_h - if max > 0.0 { v / max * plot_h } else { 0.0 };
    let mut stack = vec![0.0_f64; spec.categories.len()];

    for (s_idx, series) in spec.series.iter().enumerate() {
        let color = PALETTE[s_idx % PALETTE.len()];
        let hidden = if series.visible { "" } else { r#" style="display:none""# };
        svg.push_str(&format!(r#"<g class="series-{s_idx}"{hidden}>"#));

        match spec.kind {
            ChartKind::Bar | ChartKind::StackedBar => {
                let stacked = spec.kind == ChartKind::StackedBar;
                let bar_w = if stacked || spec.series.len() == 1 {
                    band * 0.7
                } else {
                    band * 0.7 / spec.series.len() as f64
                };
                for (i, category) in spec.categories.iter().enumerate() {
                    let value = series.values.get(i).copied().unwrap_or(0.0);
                    let base = if stacked { stack[i] } else { 0.0 };
                    let x = if stacked || spec.series.len() == 1 {
                        MARGIN_LEFT + band * i as f64 + band * 0.15
                    } else {
                        MARGIN_LEFT + band * i as f64 + band * 0.15 + bar_w * s_idx as f64
                    };
                    let top = y_of(base + value);
                    let height = y_of(base) - top;
                    svg.push_str(&format!(
                        r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_w:.1}" height="{height:.1}" fill="{color}"><title>{}</title></rect>"#,
                        escape(&tooltip(spec, &series.name, category, value))
                    ));
                    if stacked {
                        stack[i] += value;
                    }
                }
            }
            ChartKind::Line => {
                let points: Vec<String> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        format!("{:.1},{:.1}", MARGIN_LEFT + band * (i as f64 + 0.5), y_of(*v))
                    })
                    .collect();
                svg.push_str(&format!(
                    r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
                    points.join(" ")
                ));
                for (i, category) in spec.categories.iter().enumerate() {
                    let value = series.values.get(i).copied().unwrap_or(0.0);
                    svg.push_str(&format!(
                        r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{color}"><title>{}</title></circle>"#,
                        MARGIN_LEFT + band * (i as f64 + 0.5),
                        y_of(value),
                        escape(&tooltip(spec, &series.name, category, value))
                    ));
                }
            }
        }
        svg.push_str("</g>");
    }

    // ── Legend ────────────────────────────────────────────────────────────────
    if spec.series.len() > 1 || spec.kind == ChartKind::Line {
        let lx = WIDTH - MARGIN_RIGHT + 20.0;
        for (s_idx, series) in spec.series.iter().enumerate() {
            let ly = MARGIN_TOP + 22.0 * s_idx as f64;
            let off = if series.visible { "" } else { " off" };
            svg.push_str(&format!(
                r#"<g class="legend-item{off}" data-series="{s_idx}"><rect x="{lx}" y="{ry}" width="14" height="14" fill="{color}"/><text x="{tx}" y="{ty}">{name}</text></g>"#,
                ry = ly - 11.0,
                tx = lx + 20.0,
                ty = ly,
                color = PALETTE[s_idx % PALETTE.len()],
                name = escape(&series.name),
            ));
        }
    }

    svg.push_str("</svg>");

    let data = serde_json::to_string(spec)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 24px; }}
svg text {{ font-size: 12px; fill: #333; }}
.title {{ font-size: 18px; text-anchor: middle; }}
.ytick {{ text-anchor: end; }}
.xtick {{ text-anchor: end; }}
.axis-label {{ font-size: 14px; text-anchor: middle; }}
.grid {{ stroke: #e5e5e5; }}
.legend-item {{ cursor: pointer; }}
.legend-item.off {{ opacity: 0.35; }}
rect:hover, circle:hover {{ opacity: 0.8; }}
</style>
</head>
<body>
{svg}
<script type="application/json" id="chart-data">{data}</script>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(&spec.title),
        svg = svg,
        data = data,
        script = TOGGLE_SCRIPT,
    )
}

/// Write [`render_chart_html`] output to `path`.
pub fn write_chart_html(spec: &ChartSpec, path: &Path) -> Result<()> {
    std::fs::write(path, render_chart_html(spec)).map_err(|source| InsightsError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote chart to {}", path.display());
    Ok(())
}

fn tooltip(spec: &ChartSpec, series: &str, category: &str, value: f64) -> String {
    let formatted = spec.value_format.format(value);
    if spec.series.len() == 1 {
        format!("{}: {}", category, formatted)
    } else {
        format!("{} | {}: {}", category, series, formatted)
    }
}

/// Round `max` up to a value that gives readable tick labels.
fn nice_max(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(max.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= max)
        .unwrap_or(10.0 * magnitude)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
