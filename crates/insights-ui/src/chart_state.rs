//! Interactive chart state.
//!
//! Hover position and series visibility are kept here as a plain state
//! machine so the event loop and the HTML writer share one set of rules.

use crate::presentation::ChartSpec;

/// A user action on an interactive chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Move the hover marker one category right, wrapping around.
    HoverNext,
    /// Move the hover marker one category left, wrapping around.
    HoverPrev,
    /// Flip visibility of the series at this index.
    ToggleSeries(usize),
    ShowAll,
    HideAll,
    Quit,
}

#[derive(Debug, Clone)]
pub struct ChartState {
    spec: ChartSpec,
    hovered: Option<usize>,
    should_quit: bool,
}

impl ChartState {
    /// Wrap `spec`. Nothing is hovered initially.
    pub fn new(spec: ChartSpec) -> Self {
        Self {
            spec,
            hovered: None,
            should_quit: false,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn apply(&mut self, interaction: Interaction) {
        let n = self.spec.categories.len();
        match interaction {
            Interaction::HoverNext if n > 0 => {
                self.hovered = Some(self.hovered.map_or(0, |i| (i + 1) % n));
            }
            Interaction::HoverPrev if n > 0 => {
                self.hovered = Some(self.hovered.map_or(n - 1, |i| (i + n - 1) % n));
            }
            Interaction::HoverNext | Interaction::HoverPrev => {}
            Interaction::ToggleSeries(idx) => {
                if let Some(series) = self.spec.series.get_mut(idx) {
                    series.visible = !series.visible;
                }
            }
            Interaction::ShowAll => self.set_all_visible(true),
            Interaction::HideAll => self.set_all_visible(false),
            Interaction::Quit => self.should_quit = true,
        }
    }

    /// Values of the hovered category, e.g. `"alice: 5"` for a single
    /// series or `"2023  bug: 50.0%, docs: 50.0%"` for several.
    pub fn tooltip(&self) -> Option<String> {
        let idx = self.hovered?;
        let category = self.spec.categories.get(idx)?;
        let format = self.spec.value_format;

        if self.spec.series.len() == 1 {
            let value = self.spec.series[0].values.get(idx).copied().unwrap_or(0.0);
            return Some(format!("{}: {}", category, format.format(value)));
        }

        let parts: Vec<String> = self
            .spec
            .visible_series()
            .map(|s| {
                let value = s.values.get(idx).copied().unwrap_or(0.0);
                format!("{}: {}", s.name, format.format(value))
            })
            .collect();

        if parts.is_empty() {
            Some(format!("{}  (no visible series)", category))
        } else {
            Some(format!("{}  {}", category, parts.join(", ")))
        }
    }

    fn set_all_visible(&mut self, visible: bool) {
        for series in &mut self.spec.series {
            series.visible = visible;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
