use insights_core::config::{AnalysisConfig, AnalysisMode};
use insights_core::formatting::format_count;
use insights_data::analysis::AnalysisReport;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

pub const HEADER_HEIGHT: u16 = 3;

/// What the chart screen is showing: the analysis, its parameters and how
/// much data went into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenContext {
    pub analysis: String,
    /// `(name, value)` pairs such as `("label", "bug")`.
    pub parameters: Vec<(String, String)>,
    pub timezone: String,
    /// Where the issues came from, usually a path.
    pub source: String,
    pub issues_loaded: usize,
    pub events_scanned: usize,
}

impl ScreenContext {
    pub fn from_report(
        config: &AnalysisConfig,
        report: &AnalysisReport,
        source: impl Into<String>,
    ) -> Self {
        let parameters = match &config.mode {
            AnalysisMode::LabelInteractions(c) => vec![("label".to_string(), c.label().to_string())],
            AnalysisMode::LabelAdoption => Vec::new(),
            AnalysisMode::UserTrend(c) => vec![(
                "user".to_string(),
                c.user.clone().unwrap_or_else(|| "all users".to_string()),
            )],
        };

        Self {
            analysis: report.metadata.analysis.clone(),
            parameters,
            timezone: report.metadata.timezone.clone(),
            source: source.into(),
            issues_loaded: report.metadata.issues_loaded,
            events_scanned: report.metadata.events_scanned,
        }
    }
}

/// Chart screen header:
///
/// 1. Analysis name and data source.
/// 2. Analysis parameters followed by the bucketing timezone.
/// 3. Issue and event counts.
pub struct Header<'a> {
    pub context: &'a ScreenContext,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(context: &'a ScreenContext, theme: &'a Theme) -> Self {
        Self { context, theme }
    }

    /// Render the header as exactly [`HEADER_HEIGHT`] lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let ctx = self.context;

        let mut params = Vec::new();
        let pairs = ctx
            .parameters
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(std::iter::once(("timezone", ctx.timezone.as_str())));
        for (idx, (name, value)) in pairs.enumerate() {
            if idx > 0 {
                params.push(Span::raw("  "));
            }
            params.push(Span::styled(format!("{}: ", name), self.theme.label));
            params.push(Span::styled(value.to_string(), self.theme.value));
        }

        vec![
            Line::from(vec![
                Span::styled(ctx.analysis.clone(), self.theme.header),
                Span::styled(format!("  {}", ctx.source), self.theme.dim),
            ]),
            Line::from(params),
            Line::from(Span::styled(
                format!(
                    "{} issues, {} events",
                    format_count(ctx.issues_loaded as u64),
                    format_count(ctx.events_scanned as u64)
                ),
                self.theme.info,
            )),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
