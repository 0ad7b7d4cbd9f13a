//! Summary tables: overview, industry breakdown, monthly adoption and
//! confidence statistics.
//!
//! Every row type implements [`Tabular`] so the same values feed both the CSV
//! export and the console tables.

use adoption_core::error::{AdoptionError, Result};
use adoption_core::formatting::{format_percent, percentage, truncate_chars};
use adoption_core::models::Agent;
use adoption_core::naics;
use adoption_core::stats::ConfidenceStats;
use adoption_core::time_utils::month_range;

use crate::aggregator::{IndustryAggregator, MonthlyIndustryTable};
use crate::analysis::AgentDataset;

/// A row with a fixed, ordered set of named columns.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

// ── Overview ──────────────────────────────────────────────────────────────────

/// One row of `overview.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewRow {
    pub agent: String,
    pub repos_with_predictions: usize,
    pub repos_with_first_use: usize,
    pub merged_repos: usize,
    /// `"YYYY-MM to YYYY-MM"`
    pub date_range: String,
    /// `"<code> (<first 20 chars of the long description>...)"`
    pub top_industry: String,
    pub top_industry_pct: f64,
}

impl Tabular for OverviewRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Agent",
            "Repos with Predictions",
            "Repos with First Use",
            "Merged Repos",
            "Date Range",
            "Top Industry",
            "Top Industry %",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.agent.clone(),
            self.repos_with_predictions.to_string(),
            self.repos_with_first_use.to_string(),
            self.merged_repos.to_string(),
            self.date_range.clone(),
            self.top_industry.clone(),
            format_percent(self.top_industry_pct, 1),
        ]
    }
}

/// Build the overview row for one agent.
///
/// Fails with [`AdoptionError::EmptyDataset`] when the join is empty.
pub fn overview_row(dataset: &AgentDataset) -> Result<OverviewRow> {
    let totals = IndustryAggregator::industry_totals(&dataset.joined);
    let (top_code, top_count) = totals
        .first()
        .ok_or_else(|| AdoptionError::EmptyDataset(dataset.agent.key.clone()))?;
    let date_range = month_range(dataset.joined.iter().map(|r| &r.first_use_date))
        .ok_or_else(|| AdoptionError::EmptyDataset(dataset.agent.key.clone()))?;

    Ok(OverviewRow {
        agent: dataset.agent.display_name.clone(),
        repos_with_predictions: dataset.predictions.len(),
        repos_with_first_use: dataset.first_use.len(),
        merged_repos: dataset.joined.len(),
        date_range,
        top_industry: format!(
            "{} ({}...)",
            top_code,
            truncate_chars(naics::long_description(top_code), 20)
        ),
        top_industry_pct: percentage(*top_count, dataset.joined.len() as u64),
    })
}

// ── Industry breakdown ────────────────────────────────────────────────────────

/// One row of `industry_breakdown_<agent>.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryBreakdownRow {
    pub naics_code: String,
    pub industry: String,
    pub repo_count: u64,
    pub percentage: f64,
}

impl Tabular for IndustryBreakdownRow {
    fn headers() -> Vec<&'static str> {
        vec!["NAICS Code", "Industry", "Repo Count", "Percentage"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.naics_code.clone(),
            self.industry.clone(),
            self.repo_count.to_string(),
            format_percent(self.percentage, 1),
        ]
    }
}

/// Repositories per industry, descending by count.
pub fn industry_breakdown(table: &MonthlyIndustryTable) -> Vec<IndustryBreakdownRow> {
    let total = table.total();
    table
        .industry_totals()
        .into_iter()
        .map(|(code, count)| IndustryBreakdownRow {
            industry: naics::long_description(&code).to_string(),
            naics_code: code,
            repo_count: count,
            percentage: percentage(count, total),
        })
        .collect()
}

// ── Monthly adoption ──────────────────────────────────────────────────────────

/// One row of `monthly_adoption_<agent>.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAdoptionRow {
    pub month: String,
    pub new_repos: u64,
    pub cumulative_repos: u64,
}

impl Tabular for MonthlyAdoptionRow {
    fn headers() -> Vec<&'static str> {
        vec!["month", "new_repos", "cumulative_repos"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.new_repos.to_string(),
            self.cumulative_repos.to_string(),
        ]
    }
}

pub fn monthly_adoption(table: &MonthlyIndustryTable) -> Vec<MonthlyAdoptionRow> {
    table
        .monthly_totals()
        .into_iter()
        .map(|m| MonthlyAdoptionRow {
            month: m.month.to_string(),
            new_repos: m.new_repos,
            cumulative_repos: m.cumulative_repos,
        })
        .collect()
}

// ── Confidence statistics ─────────────────────────────────────────────────────

/// The single row of `confidence_stats_<agent>.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceStatsRow {
    pub stats: ConfidenceStats,
}

impl Tabular for ConfidenceStatsRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Mean Confidence",
            "Median Confidence",
            "Std Confidence",
            "Min Confidence",
            "Max Confidence",
            "Repos > 0.9 conf",
            "Repos > 0.8 conf",
            "Repos > 0.7 conf",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let s = &self.stats;
        vec![
            s.mean.to_string(),
            s.median.to_string(),
            s.std_dev.map(|v| v.to_string()).unwrap_or_default(),
            s.min.to_string(),
            s.max.to_string(),
            s.above_90.to_string(),
            s.above_80.to_string(),
            s.above_70.to_string(),
        ]
    }
}

/// Confidence statistics over the prediction dataset.
///
/// `None` when the dataset has no `confidence` column or only null scores.
pub fn confidence_stats(dataset: &AgentDataset) -> Option<ConfidenceStatsRow> {
    if !dataset.predictions.has_confidence {
        return None;
    }
    ConfidenceStats::from_scores(&dataset.predictions.confidence_scores)
        .map(|stats| ConfidenceStatsRow { stats })
}

/// Display label for one agent's section header.
pub fn section_title(title: &str, agent: &Agent) -> String {
    format!("{} - {}", title, agent.display_name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
