//! Drives the selected reports over every requested agent.
//!
//! Each agent is loaded once and handed to the summary, chart and web
//! reports. A failure for one agent is logged and never stops the others.

use std::path::PathBuf;

use adoption_core::error::{AdoptionError, Result};
use adoption_core::formatting::format_count;
use adoption_core::models::Agent;
use adoption_core::naics;
use adoption_core::settings::Settings;
use adoption_data::analysis::{load_agent_dataset, AgentDataset};
use adoption_data::summary;
use adoption_report::chart::{build_chart_series, render_stacked_area, ChartOptions};
use adoption_report::csv_export::write_table;
use adoption_report::table_view::TextTable;
use adoption_report::web_export::{build_web_data, write_web_data};
use tracing::{info, warn};

/// Rows of the monthly adoption table shown on the console.
const MONTHLY_TAIL_ROWS: usize = 12;

/// Industries listed in the log after each chart.
const LOGGED_TOP_INDUSTRIES: usize = 5;

/// What a run did, for the closing log line and for tests.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Agent keys whose datasets loaded.
    pub loaded: Vec<String>,
    /// Agent keys skipped because their data could not be loaded.
    pub skipped: Vec<String>,
    /// Every file written.
    pub written: Vec<PathBuf>,
}

/// Run every report selected by `settings`.
pub fn run(settings: &Settings) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let datasets = load_datasets(settings, &mut outcome);

    if settings.wants("summary") {
        summary_report(settings, &datasets, &mut outcome);
    }
    if settings.wants("chart") {
        chart_report(settings, &datasets, &mut outcome);
    }
    if settings.wants("web") {
        web_report(settings, &datasets, &mut outcome);
    }

    outcome
}

fn load_datasets(settings: &Settings, outcome: &mut RunOutcome) -> Vec<AgentDataset> {
    let mut datasets = Vec::new();
    for agent in settings.agents() {
        info!("Processing {}", agent.display_name);
        match load_agent_dataset(&settings.data_dir, &agent) {
            Ok(dataset) => {
                outcome.loaded.push(agent.key.clone());
                datasets.push(dataset);
            }
            Err(e) => {
                if e.is_missing_input() {
                    warn!("Data not found for {}: {}", agent.key, e);
                } else {
                    warn!("Error processing {}: {}", agent.key, e);
                }
                outcome.skipped.push(agent.key.clone());
            }
        }
    }
    datasets
}

fn banner(title: &str) {
    info!("{}", "=".repeat(60));
    info!("{}", title);
    info!("{}", "=".repeat(60));
}

fn print_table(table: &TextTable) {
    print!("{}", table.render());
}

/// Log a per-agent failure and keep going.
fn report_step(what: &str, agent: &Agent, result: Result<Option<PathBuf>>, outcome: &mut RunOutcome) {
    match result {
        Ok(Some(path)) => outcome.written.push(path),
        Ok(None) => {}
        Err(e) => warn!("Error generating {} for {}: {}", what, agent.key, e),
    }
}

// ── summary ──────────────────────────────────────────────────────────────────

fn summary_report(settings: &Settings, datasets: &[AgentDataset], outcome: &mut RunOutcome) {
    banner("OVERVIEW TABLE");
    let mut overview = Vec::new();
    for dataset in datasets {
        match summary::overview_row(dataset) {
            Ok(row) => overview.push(row),
            Err(e) => warn!("Error processing {}: {}", dataset.agent.key, e),
        }
    }
    print_table(&TextTable::from_rows(&overview));
    let path = settings.output_dir.join("overview.csv");
    match write_table(&path, &overview) {
        Ok(()) => outcome.written.push(path),
        Err(e) => warn!("Error writing overview: {}", e),
    }

    for dataset in datasets {
        banner(&summary::section_title("INDUSTRY BREAKDOWN", &dataset.agent));
        let result = write_breakdown(settings, dataset);
        report_step("breakdown", &dataset.agent, result.map(Some), outcome);
    }

    for dataset in datasets {
        banner(&summary::section_title("MONTHLY ADOPTION", &dataset.agent));
        let result = write_monthly(settings, dataset);
        report_step("monthly adoption", &dataset.agent, result.map(Some), outcome);
    }

    for dataset in datasets {
        let result = write_confidence(settings, dataset);
        report_step("confidence stats", &dataset.agent, result, outcome);
    }

    info!("All statistics saved to {}/", settings.output_dir.display());
}

fn write_breakdown(settings: &Settings, dataset: &AgentDataset) -> Result<PathBuf> {
    let rows = summary::industry_breakdown(&dataset.monthly_table());
    print_table(&TextTable::from_rows(&rows));
    let path = settings
        .output_dir
        .join(format!("industry_breakdown_{}.csv", dataset.agent.key));
    write_table(&path, &rows)?;
    Ok(path)
}

fn write_monthly(settings: &Settings, dataset: &AgentDataset) -> Result<PathBuf> {
    let rows = summary::monthly_adoption(&dataset.monthly_table());
    print_table(&TextTable::from_rows(&rows).tail(MONTHLY_TAIL_ROWS));
    let path = settings
        .output_dir
        .join(format!("monthly_adoption_{}.csv", dataset.agent.key));
    write_table(&path, &rows)?;
    Ok(path)
}

fn write_confidence(settings: &Settings, dataset: &AgentDataset) -> Result<Option<PathBuf>> {
    let agent = &dataset.agent;
    if !dataset.predictions.has_confidence {
        warn!("No confidence column in {} predictions", agent.key);
        return Ok(None);
    }
    let Some(row) = summary::confidence_stats(dataset) else {
        warn!("No confidence scores in {} predictions", agent.key);
        return Ok(None);
    };

    banner(&summary::section_title("CONFIDENCE STATS", agent));
    let rows = [row];
    print_table(&TextTable::from_rows(&rows));
    let path = settings
        .output_dir
        .join(format!("confidence_stats_{}.csv", agent.key));
    write_table(&path, &rows)?;
    Ok(Some(path))
}

// ── chart ────────────────────────────────────────────────────────────────────

fn chart_report(settings: &Settings, datasets: &[AgentDataset], outcome: &mut RunOutcome) {
    let options = ChartOptions {
        font: settings.chart_font.clone(),
        ..ChartOptions::default()
    };
    for dataset in datasets {
        banner(&format!("Processing {}", dataset.agent.display_name));
        let result = write_chart(settings, dataset, &options);
        report_step("chart", &dataset.agent, result.map(Some), outcome);
    }
}

fn write_chart(settings: &Settings, dataset: &AgentDataset, options: &ChartOptions) -> Result<PathBuf> {
    let agent = &dataset.agent;
    let table = dataset.monthly_table();
    let (Some(first), Some(last)) = (table.months().first(), table.months().last()) else {
        return Err(AdoptionError::EmptyDataset(agent.key.clone()));
    };

    let path = settings
        .figures_dir
        .join(format!("industry_adoption_{}.png", agent.key));
    let series = build_chart_series(&table, settings.top_n());
    render_stacked_area(
        &path,
        &format!("Monthly Industry Adoption - {}", agent.display_name),
        table.months(),
        &series,
        options,
    )?;
    info!("Saved chart to {}", path.display());

    info!("Date range: {} to {}", first, last);
    info!("Total repos: {}", format_count(table.total()));
    info!("Top industries:");
    for (code, count) in table.industry_totals().iter().take(LOGGED_TOP_INDUSTRIES) {
        info!("  {}: {}", naics::industry_label(code), format_count(*count));
    }
    Ok(path)
}

// ── web ──────────────────────────────────────────────────────────────────────

fn web_report(settings: &Settings, datasets: &[AgentDataset], outcome: &mut RunOutcome) {
    for dataset in datasets {
        let result = write_web(settings, dataset);
        report_step("web data", &dataset.agent, result.map(Some), outcome);
    }
    info!("All data exported to {}/", settings.web_dir.display());
}

fn write_web(settings: &Settings, dataset: &AgentDataset) -> Result<PathBuf> {
    let agent = &dataset.agent;
    let data = build_web_data(agent, &dataset.monthly_table())?;
    let path = settings
        .web_dir
        .join(format!("{}_cumulative.json", agent.key));
    write_web_data(&path, &data)?;

    info!(
        "Exported {} data: {} repos",
        agent.display_name,
        format_count(data.total_repos)
    );
    if let (Some(first), Some(last)) = (data.months.first(), data.months.last()) {
        info!("Months: {} to {}", first, last);
    }
    info!("Industries: {}", data.industries.len());
    Ok(path)
}

// ── Tests ────────────────────────────────────────────────────────────────────
