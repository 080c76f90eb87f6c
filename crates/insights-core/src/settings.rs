use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Descriptive label analytics over GitHub issue history
#[derive(Parser, Debug, Clone)]
#[command(
    name = "label-insights",
    about = "Descriptive label analytics over GitHub issue history",
    version
)]
pub struct Settings {
    /// Analysis to run
    #[arg(
        long,
        default_value = "label-interactions",
        value_parser = ["label-interactions", "label-adoption", "user-trend"]
    )]
    pub analysis: String,

    /// Label to analyse (required by label-interactions)
    #[arg(long)]
    pub label: Option<String>,

    /// Restrict user-trend to a single user login (all users when omitted)
    #[arg(long)]
    pub user: Option<String>,

    /// Issue data file (.json / .jsonl) or directory of such files
    #[arg(long, env = "LABEL_INSIGHTS_DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Timezone used to bucket events into years and months ("auto" for system)
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// How to present the result
    #[arg(long, default_value = "tui", value_parser = ["tui", "json", "text"])]
    pub output: String,

    /// Also write the chart as a self-contained HTML file
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── ParameterSource ────────────────────────────────────────────────────────────

/// Named parameter lookup used to build an analysis configuration.
///
/// Recognised names are `"analysis"`, `"label"`, `"user"` and `"timezone"`.
pub trait ParameterSource {
    fn get_parameter(&self, name: &str) -> Option<String>;
}

impl ParameterSource for Settings {
    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "analysis" => Some(self.analysis.clone()),
            "label" => self.label.clone(),
            "user" => self.user.clone(),
            "timezone" => Some(self.timezone.clone()),
            _ => None,
        }
    }
}

impl ParameterSource for HashMap<String, String> {
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
