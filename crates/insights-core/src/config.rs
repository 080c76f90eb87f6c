//! Validated analysis configuration.
//!
//! Built once from a [`ParameterSource`] before any data is loaded, so a
//! missing label aborts the run without touching the issue source.

use std::fmt;

use crate::error::{InsightsError, Result};
use crate::settings::ParameterSource;
use crate::time_utils::Calendar;

/// Which of the three analyses to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    LabelInteractions,
    LabelAdoption,
    UserTrend,
}

impl AnalysisKind {
    /// Parse the CLI spelling of an analysis name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "label-interactions" => Ok(Self::LabelInteractions),
            "label-adoption" => Ok(Self::LabelAdoption),
            "user-trend" => Ok(Self::UserTrend),
            other => Err(InsightsError::Configuration(format!(
                "unknown analysis '{}'; expected label-interactions, label-adoption or user-trend",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LabelInteractions => "label-interactions",
            Self::LabelAdoption => "label-adoption",
            Self::UserTrend => "user-trend",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the per-label user interaction analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInteractionConfig {
    label: String,
}

impl LabelInteractionConfig {
    /// Validate the target label. Absent or blank labels are rejected.
    pub fn new(label: Option<&str>) -> Result<Self> {
        match label {
            Some(l) if !l.trim().is_empty() => Ok(Self {
                label: l.to_string(),
            }),
            _ => Err(InsightsError::Configuration(
                "Please provide a valid label using the --label argument.".to_string(),
            )),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Parameters of the per-user label-usage trend analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserTrendConfig {
    /// `None` means every user.
    pub user: Option<String>,
}

impl UserTrendConfig {
    /// An empty user string means "all users", the same as an absent one.
    pub fn new(user: Option<&str>) -> Self {
        Self {
            user: user.filter(|u| !u.is_empty()).map(str::to_string),
        }
    }
}

/// A fully validated analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    /// Calendar used for year / month bucketing.
    pub calendar: Calendar,
}

/// The analysis to run together with its own parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisMode {
    LabelInteractions(LabelInteractionConfig),
    LabelAdoption,
    UserTrend(UserTrendConfig),
}

impl AnalysisMode {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::LabelInteractions(_) => AnalysisKind::LabelInteractions,
            Self::LabelAdoption => AnalysisKind::LabelAdoption,
            Self::UserTrend(_) => AnalysisKind::UserTrend,
        }
    }
}

impl AnalysisConfig {
    /// Build and validate a configuration from named parameters.
    ///
    /// A missing `"analysis"` parameter selects label interactions; a missing
    /// `"timezone"` selects UTC.
    pub fn from_source(source: &impl ParameterSource) -> Result<Self> {
        let kind = match source.get_parameter("analysis") {
            Some(name) => AnalysisKind::from_name(&name)?,
            None => AnalysisKind::LabelInteractions,
        };

        let mode = match kind {
            AnalysisKind::LabelInteractions => {
                let label = source.get_parameter("label");
                AnalysisMode::LabelInteractions(LabelInteractionConfig::new(label.as_deref())?)
            }
            AnalysisKind::LabelAdoption => AnalysisMode::LabelAdoption,
            AnalysisKind::UserTrend => {
                let user = source.get_parameter("user");
                AnalysisMode::UserTrend(UserTrendConfig::new(user.as_deref()))
            }
        };

        let calendar = source
            .get_parameter("timezone")
            .map(|tz| Calendar::new(&tz))
            .unwrap_or_default();

        Ok(Self { mode, calendar })
    }

    pub fn kind(&self) -> AnalysisKind {
        self.mode.kind()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
