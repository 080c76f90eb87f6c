//! Renderer-neutral chart descriptions.
//!
//! Aggregated tables are turned into a [`ChartSpec`] once; the terminal view,
//! the HTML writer and the plain-text printer all render from that.

use insights_core::formatting::{format_count, format_percentage};
use insights_data::aggregator::{AdoptionTable, InteractionTable, UserTrendTable, TOP_INTERACTIONS};
use insights_data::analysis::AnalysisResult;
use serde::Serialize;

/// Visual form of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Line,
}

/// How series values are printed in tooltips and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Count,
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Count => format_count(value.round().max(0.0) as u64),
            Self::Percent => format_percentage(value),
        }
    }
}

/// One named data series, one value per chart category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// X-axis categories, in display order.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub value_format: ValueFormat,
}

impl ChartSpec {
    pub fn visible_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.visible)
    }

    /// Largest value drawn at any category, summing visible series for
    /// stacked charts.
    pub fn max_value(&self) -> f64 {
        let per_category = |idx: usize| -> f64 {
            let values = self
                .visible_series()
                .map(|s| s.values.get(idx).copied().unwrap_or(0.0));
            match self.kind {
                ChartKind::StackedBar => values.sum(),
                _ => values.fold(0.0, f64::max),
            }
        };
        (0..self.categories.len())
            .map(per_category)
            .fold(0.0, f64::max)
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Chart for any analysis result, or `None` when it carries no data.
pub fn chart_for_result(result: &AnalysisResult) -> Option<ChartSpec> {
    match result {
        AnalysisResult::LabelInteractions(o) => o.as_data().map(interaction_chart),
        AnalysisResult::LabelAdoption(o) => o.as_data().map(adoption_chart),
        AnalysisResult::UserTrend(o) => o.as_data().map(user_trend_chart),
    }
}

/// Bar chart of the top users for one label.
pub fn interaction_chart(table: &InteractionTable) -> ChartSpec {
    let top = table.top(TOP_INTERACTIONS);
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!(
            "Top {} User Interactions for Label: {}",
            TOP_INTERACTIONS, table.label
        ),
        x_label: "User".to_string(),
        y_label: "Number of Interactions".to_string(),
        categories: top.iter().map(|r| r.user.clone()).collect(),
        series: vec![Series {
            name: "Interactions".to_string(),
            values: top.iter().map(|r| r.interactions as f64).collect(),
            visible: true,
        }],
        value_format: ValueFormat::Count,
    }
}

/// Stacked bar chart of each label's yearly share.
pub fn adoption_chart(table: &AdoptionTable) -> ChartSpec {
    let years = table.years();
    let series = table
        .labels()
        .into_iter()
        .map(|label| Series {
            values: years
                .iter()
                .map(|&year| table.percentage(year, &label))
                .collect(),
            name: label,
            visible: true,
        })
        .collect();

    ChartSpec {
        kind: ChartKind::StackedBar,
        title: "Label Adoption by Year".to_string(),
        x_label: "Year".to_string(),
        y_label: "Percentage".to_string(),
        categories: years.iter().map(|y| y.to_string()).collect(),
        series,
        value_format: ValueFormat::Percent,
    }
}

/// Line chart with one series per label. Every series starts hidden.
pub fn user_trend_chart(table: &UserTrendTable) -> ChartSpec {
    let series = table
        .labels
        .iter()
        .enumerate()
        .map(|(col, label)| Series {
            name: label.clone(),
            values: table.counts.iter().map(|row| row[col] as f64).collect(),
            visible: false,
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Line,
        title: format!(
            "Label Trends Over Time for User {}",
            table.user.as_deref().unwrap_or("all users")
        ),
        x_label: "Time".to_string(),
        y_label: "Number of Issues".to_string(),
        categories: table.months.iter().map(|m| m.to_string()).collect(),
        series,
        value_format: ValueFormat::Count,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
