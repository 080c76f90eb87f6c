//! Terminal rendering of a [`ChartSpec`].
//!
//! Bar and stacked-bar charts are drawn as one horizontal bar per category so
//! long user names and twenty rows fit a normal terminal. Line charts use the
//! ratatui [`Chart`] widget.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::chart_state::ChartState;
use crate::components::header::{Header, ScreenContext, HEADER_HEIGHT};
use crate::components::legend::Legend;
use crate::presentation::{ChartKind, ChartSpec};
use crate::themes::Theme;

/// Widest category label drawn before a bar.
const MAX_CATEGORY_WIDTH: usize = 20;

const HELP_TEXT: &str = "←/→ hover  1-9 toggle series  a show all  n hide all  q quit";

// ── Screen ────────────────────────────────────────────────────────────────────

/// Render the full chart screen: header, chart, legend, tooltip and help.
pub fn render_chart_screen(
    frame: &mut Frame,
    area: Rect,
    state: &ChartState,
    context: &ScreenContext,
    theme: &Theme,
) {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Header::new(context, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    render_chart(frame, chunks[1], state, theme);

    frame.render_widget(
        Paragraph::new(Legend::new(state.spec(), theme).to_line()),
        chunks[2],
    );

    let tooltip = match state.tooltip() {
        Some(text) => Line::from(Span::styled(text, theme.hover)),
        None => Line::from(Span::styled("Use ←/→ to inspect values", theme.dim)),
    };
    frame.render_widget(Paragraph::new(tooltip), chunks[3]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(HELP_TEXT, theme.dim))),
        chunks[4],
    );
}

/// Render only the chart body into `area`.
pub fn render_chart(frame: &mut Frame, area: Rect, state: &ChartState, theme: &Theme) {
    let spec = state.spec();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", spec.title));

    if spec.visible_series().next().is_none() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("All series are hidden", theme.warning)),
            Line::from(Span::styled(
                "Press 1-9 to toggle a series or 'a' to show all",
                theme.dim,
            )),
        ];
        frame.render_widget(Paragraph::new(Text::from(text)).block(block), area);
        return;
    }

    match spec.kind {
        ChartKind::Bar | ChartKind::StackedBar => {
            // Two columns for the border, the rest for label, bar and value.
            let inner_width = area.width.saturating_sub(2) as usize;
            let lines = build_bar_lines(spec, state.hovered(), inner_width, theme);
            frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
        }
        ChartKind::Line => render_line_chart(frame, area, state, block, theme),
    }
}

// ── Bars ──────────────────────────────────────────────────────────────────────

/// One line per category: label, bar segments, value.
///
/// Plain bars use the first visible series; stacked bars draw one segment per
/// visible series in series colour.
pub fn build_bar_lines<'a>(
    spec: &ChartSpec,
    hovered: Option<usize>,
    width: usize,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let label_width = spec
        .categories
        .iter()
        .map(|c| c.width())
        .max()
        .unwrap_or(0)
        .min(MAX_CATEGORY_WIDTH);
    let value_width = 12;
    // "▶ " marker, label, a space, bar, value.
    let bar_width = width.saturating_sub(label_width + value_width + 3).max(1);
    let max = spec.max_value();

    let mut lines = vec![Line::from(Span::styled(
        format!("{}  →  {}", spec.x_label, spec.y_label),
        theme.dim,
    ))];

    for (idx, category) in spec.categories.iter().enumerate() {
        let is_hovered = hovered == Some(idx);
        let label_style = if is_hovered { theme.hover } else { theme.label };

        let mut spans = vec![
            Span::styled(if is_hovered { "▶ " } else { "  " }, theme.hover),
            Span::styled(pad_to_width(&truncate_to_width(category, label_width), label_width), label_style),
            Span::raw(" "),
        ];

        let segments: Vec<(usize, f64)> = spec
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visible)
            .map(|(i, s)| (i, s.values.get(idx).copied().unwrap_or(0.0)))
            .take(if spec.kind == ChartKind::StackedBar { usize::MAX } else { 1 })
            .collect();

        let mut filled = 0usize;
        for (series_idx, value) in &segments {
            let chars = scaled(*value, max, bar_width).min(bar_width - filled);
            if chars > 0 {
                spans.push(Span::styled("█".repeat(chars), theme.series_style(*series_idx)));
                filled += chars;
            }
        }
        if filled < bar_width {
            spans.push(Span::styled(" ".repeat(bar_width - filled), theme.dim));
        }

        let total: f64 = segments.iter().map(|(_, v)| v).sum();
        spans.push(Span::styled(
            format!(" {}", spec.value_format.format(total)),
            if is_hovered { theme.hover } else { theme.value },
        ));

        lines.push(Line::from(spans));
    }

    lines
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

// ── Lines ─────────────────────────────────────────────────────────────────────

fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    state: &ChartState,
    block: Block<'_>,
    theme: &Theme,
) {
    let spec = state.spec();
    let points: Vec<(usize, Vec<(f64, f64)>)> = spec
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.visible)
        .map(|(i, s)| {
            let data = s
                .values
                .iter()
                .enumerate()
                .map(|(x, y)| (x as f64, *y))
                .collect();
            (i, data)
        })
        .collect();

    let datasets: Vec<Dataset> = points
        .iter()
        .map(|(i, data)| {
            Dataset::default()
                .name(spec.series[*i].name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.series_style(*i))
                .data(data)
        })
        .collect();

    let x_max = spec.categories.len().saturating_sub(1).max(1) as f64;
    let y_max = spec.max_value().max(1.0);

    let x_title = match state.hovered().and_then(|i| spec.categories.get(i)) {
        Some(category) => format!("{} [{}]", spec.x_label, category),
        None => spec.x_label.clone(),
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(axis_labels(&spec.categories)),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label.clone())
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    spec.value_format.format(y_max / 2.0),
                    spec.value_format.format(y_max),
                ]),
        );

    frame.render_widget(chart, area);
}

/// First, middle and last category.
fn axis_labels(categories: &[String]) -> Vec<String> {
    match categories.len() {
        0 => Vec::new(),
        1 | 2 => categories.to_vec(),
        n => vec![
            categories[0].clone(),
            categories[n / 2].clone(),
            categories[n - 1].clone(),
        ],
    }
}

// ── Width helpers ─────────────────────────────────────────────────────────────

/// Cut `s` to at most `width` display columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_state::Interaction;
    use crate::presentation::{Series, ValueFormat};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn bar_spec() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            title: "Top 20 User Interactions for Label: bug".into(),
            x_label: "User".into(),
            y_label: "Number of Interactions".into(),
            categories: vec!["alice".into(), "bob".into()],
            series: vec![Series {
                name: "Interactions".into(),
                values: vec![4.0, 2.0],
                visible: true,
            }],
            value_format: ValueFormat::Count,
        }
    }

    fn stacked_spec() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::StackedBar,
            title: "Label Adoption by Year".into(),
            x_label: "Year".into(),
            y_label: "Percentage".into(),
            categories: vec!["2022".into(), "2023".into()],
            series: vec![
                Series { name: "bug".into(), values: vec![100.0, 50.0], visible: true },
                Series { name: "docs".into(), values: vec![0.0, 50.0], visible: true },
            ],
            value_format: ValueFormat::Percent,
        }
    }

    fn line_spec() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Line,
            title: "Label Trends Over Time for User u".into(),
            x_label: "Time".into(),
            y_label: "Number of Issues".into(),
            categories: vec!["2023-01".into(), "2023-02".into(), "2023-05".into()],
            series: vec![
                Series { name: "bug".into(), values: vec![1.0, 0.0, 3.0], visible: false },
                Series { name: "ui".into(), values: vec![0.0, 2.0, 0.0], visible: false },
            ],
            value_format: ValueFormat::Count,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn draw(state: &ChartState) {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let context = ScreenContext {
            analysis: "label-interactions".into(),
            parameters: vec![("label".into(), "bug".into())],
            timezone: "UTC".into(),
            source: "issues.json".into(),
            issues_loaded: 3,
            events_scanned: 9,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chart_screen(frame, area, state, &context, &theme);
            })
            .unwrap();
    }

    // ── build_bar_lines ───────────────────────────────────────────────────────

    #[test]
    fn test_bar_lines_scale_to_max() {
        let theme = Theme::dark();
        let lines = build_bar_lines(&bar_spec(), None, 40, &theme);
        assert_eq!(lines.len(), 3);
        let first = text(&lines[1]);
        let second = text(&lines[2]);
        let full = first.chars().filter(|c| *c == '█').count();
        let half = second.chars().filter(|c| *c == '█').count();
        assert!(full > 0);
        assert_eq!(half * 2, full);
        assert!(first.trim_end().ends_with(" 4"));
    }

    #[test]
    fn test_bar_lines_hover_marker() {
        let theme = Theme::dark();
        let lines = build_bar_lines(&bar_spec(), Some(1), 40, &theme);
        assert!(text(&lines[2]).starts_with("▶ bob"));
        assert!(text(&lines[1]).starts_with("  alice"));
    }

    #[test]
    fn test_stacked_lines_one_segment_per_visible_series() {
        let theme = Theme::dark();
        let lines = build_bar_lines(&stacked_spec(), None, 60, &theme);
        let row_2023 = &lines[2];
        let segments = row_2023
            .spans
            .iter()
            .filter(|s| s.content.contains('█'))
            .count();
        assert_eq!(segments, 2);
        assert!(text(row_2023).contains("100.0%"));
    }

    #[test]
    fn test_bar_lines_narrow_width_does_not_panic() {
        let theme = Theme::dark();
        let lines = build_bar_lines(&stacked_spec(), Some(0), 3, &theme);
        assert_eq!(lines.len(), 3);
    }

    // ── truncate_to_width ─────────────────────────────────────────────────────

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("alice", 10), "alice");
        assert_eq!(truncate_to_width("a-very-long-login", 6), "a-ver…");
        assert_eq!(truncate_to_width("日本語ユーザー", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_axis_labels() {
        let cats: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(axis_labels(&cats), vec!["a", "c", "d"]);
        assert_eq!(axis_labels(&cats[..1]), vec!["a"]);
        assert!(axis_labels(&[]).is_empty());
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_bar_chart_does_not_panic() {
        let mut state = ChartState::new(bar_spec());
        state.apply(Interaction::HoverNext);
        draw(&state);
    }

    #[test]
    fn test_render_stacked_chart_does_not_panic() {
        draw(&ChartState::new(stacked_spec()));
    }

    #[test]
    fn test_render_line_chart_hidden_and_shown() {
        let mut state = ChartState::new(line_spec());
        draw(&state);
        state.apply(Interaction::ShowAll);
        state.apply(Interaction::HoverPrev);
        draw(&state);
    }

    #[test]
    fn test_render_single_month_line_chart() {
        let mut spec = line_spec();
        spec.categories.truncate(1);
        for s in &mut spec.series {
            s.values.truncate(1);
            s.visible = true;
        }
        draw(&ChartState::new(spec));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let backend = TestBackend::new(10, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let state = ChartState::new(stacked_spec());
        let context = ScreenContext::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chart_screen(frame, area, &state, &context, &theme);
            })
            .unwrap();
    }
}
