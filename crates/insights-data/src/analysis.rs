//! Top-level analysis pipeline.
//!
//! Loads issues from an [`IssueSource`], dispatches to the aggregator selected
//! by the [`AnalysisConfig`] and returns an [`AnalysisReport`] ready for the UI
//! layer.

use chrono::Utc;
use insights_core::config::{AnalysisConfig, AnalysisKind, AnalysisMode};
use insights_core::error::Result;
use serde::Serialize;
use tracing::info;

use crate::aggregator::{
    AdoptionTable, AggregateOutcome, InteractionTable, LabelAdoptionAggregator,
    LabelInteractionAggregator, UserTrendAggregator, UserTrendTable,
};
use crate::reader::IssueSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    pub analysis: String,
    /// IANA name of the timezone used for year / month bucketing.
    pub timezone: String,
    pub issues_loaded: usize,
    /// Events seen across all loaded issues, qualifying or not.
    pub events_scanned: usize,
    /// Wall-clock seconds spent loading issues.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The table produced by one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "analysis", content = "table", rename_all = "kebab-case")]
pub enum AnalysisResult {
    LabelInteractions(AggregateOutcome<InteractionTable>),
    LabelAdoption(AggregateOutcome<AdoptionTable>),
    UserTrend(AggregateOutcome<UserTrendTable>),
}

/// The complete output of [`run_analysis`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: AnalysisMetadata,
    /// Parameters the "no data" message refers to.
    #[serde(skip)]
    subject: Option<String>,
}

impl AnalysisReport {
    pub fn is_no_data(&self) -> bool {
        match &self.result {
            AnalysisResult::LabelInteractions(o) => o.is_no_data(),
            AnalysisResult::LabelAdoption(o) => o.is_no_data(),
            AnalysisResult::UserTrend(o) => o.is_no_data(),
        }
    }

    /// The informational line to print when nothing qualified, or `None` when
    /// there is a table to present.
    pub fn no_data_message(&self) -> Option<String> {
        if !self.is_no_data() {
            return None;
        }
        let message = match (&self.result, self.subject.as_deref()) {
            (AnalysisResult::LabelInteractions(_), label) => format!(
                "No interactions found for label '{}'.",
                label.unwrap_or_default()
            ),
            (AnalysisResult::LabelAdoption(_), _) => "No labeled events found.".to_string(),
            (AnalysisResult::UserTrend(_), Some(user)) => {
                format!("No events found for user {}.", user)
            }
            (AnalysisResult::UserTrend(_), None) => {
                "No labeled events found for any user.".to_string()
            }
        };
        Some(message)
    }

    pub fn kind(&self) -> AnalysisKind {
        match self.result {
            AnalysisResult::LabelInteractions(_) => AnalysisKind::LabelInteractions,
            AnalysisResult::LabelAdoption(_) => AnalysisKind::LabelAdoption,
            AnalysisResult::UserTrend(_) => AnalysisKind::UserTrend,
        }
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run one analysis.
///
/// 1. Load issues from `source`; a [`DataUnavailable`] error propagates.
/// 2. Aggregate with the aggregator matching `config.mode`.
/// 3. Return the outcome with its [`AnalysisMetadata`].
///
/// [`DataUnavailable`]: insights_core::error::InsightsError::DataUnavailable
pub fn run_analysis(config: &AnalysisConfig, source: &dyn IssueSource) -> Result<AnalysisReport> {
    // ── Step 1: Load issues ───────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let issues = source.get_issues()?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let (result, subject) = match &config.mode {
        AnalysisMode::LabelInteractions(c) => (
            AnalysisResult::LabelInteractions(LabelInteractionAggregator::new(c).aggregate(&issues)),
            Some(c.label().to_string()),
        ),
        AnalysisMode::LabelAdoption => (
            AnalysisResult::LabelAdoption(
                LabelAdoptionAggregator::new(config.calendar).aggregate(&issues),
            ),
            None,
        ),
        AnalysisMode::UserTrend(c) => (
            AnalysisResult::UserTrend(
                UserTrendAggregator::new(c, config.calendar).aggregate(&issues),
            ),
            c.user.clone(),
        ),
    };
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    // ── Step 3: Build report ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        analysis: config.kind().to_string(),
        timezone: config.calendar.timezone().name().to_string(),
        issues_loaded: issues.len(),
        events_scanned: issues.iter().map(|i| i.events.len()).sum(),
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    let report = AnalysisReport {
        result,
        metadata,
        subject,
    };

    info!(
        "{} over {} issues: {}",
        report.metadata.analysis,
        report.metadata.issues_loaded,
        if report.is_no_data() { "no data" } else { "ok" }
    );

    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
