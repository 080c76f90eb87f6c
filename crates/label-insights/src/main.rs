mod bootstrap;

use anyhow::Result;
use insights_core::config::AnalysisConfig;
use insights_core::error::InsightsError;
use insights_core::settings::Settings;
use insights_data::analysis::run_analysis;
use insights_data::reader::JsonIssueLoader;
use insights_ui::app::App;
use insights_ui::components::header::ScreenContext;
use insights_ui::{html, presentation, text};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("label-insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Analysis: {}, Output: {}, Timezone: {}",
        settings.analysis,
        settings.output,
        settings.timezone
    );

    // Parameters are validated before any data is read.
    let config = AnalysisConfig::from_source(&settings)?;

    let data_path = bootstrap::resolve_data_path(settings.data_path.as_deref()).ok_or_else(|| {
        InsightsError::data_unavailable(
            bootstrap::DEFAULT_ISSUES_FILE,
            "no --data-path given and no default issue file found",
        )
    })?;
    tracing::info!("Reading issues from {}", data_path.display());

    let loader = JsonIssueLoader::new(&data_path);
    let report = run_analysis(&config, &loader)?;

    if let Some(message) = report.no_data_message() {
        println!("{}", message);
        return Ok(());
    }

    let Some(spec) = presentation::chart_for_result(&report.result) else {
        return Ok(());
    };

    if let Some(path) = &settings.html {
        html::write_chart_html(&spec, path)?;
    }

    match settings.output.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            print!("{}", text::render_chart_text(&spec));
        }
        _ => {
            let context =
                ScreenContext::from_report(&config, &report, data_path.display().to_string());
            App::new(&settings.theme, context).run_chart(spec).await?;
        }
    }

    Ok(())
}
