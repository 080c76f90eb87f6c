use crate::presentation::ChartSpec;
use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Series that can be toggled from the keyboard with `1`–`9`.
pub const MAX_TOGGLE_KEYS: usize = 9;

/// One-line legend listing every series in its colour.
///
/// Hidden series are drawn with [`Theme::legend_hidden`]. The first
/// [`MAX_TOGGLE_KEYS`] entries are prefixed with their toggle key.
pub struct Legend<'a> {
    pub spec: &'a ChartSpec,
    pub theme: &'a Theme,
}

impl<'a> Legend<'a> {
    pub fn new(spec: &'a ChartSpec, theme: &'a Theme) -> Self {
        Self { spec, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(self.spec.series.len() * 3);
        for (idx, series) in self.spec.series.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  ", self.theme.dim));
            }
            if idx < MAX_TOGGLE_KEYS {
                spans.push(Span::styled(format!("[{}] ", idx + 1), self.theme.dim));
            }
            let (marker, style) = if series.visible {
                ("■ ", self.theme.series_style(idx))
            } else {
                ("□ ", self.theme.legend_hidden)
            };
            spans.push(Span::styled(format!("{}{}", marker, series.name), style));
        }
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
