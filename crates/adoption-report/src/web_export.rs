//! Cumulative-adoption JSON consumed by the web charts.

use std::path::Path;

use adoption_core::error::{AdoptionError, Result};
use adoption_core::models::Agent;
use adoption_core::naics;
use adoption_data::aggregator::MonthlyIndustryTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One industry's stacked series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebIndustrySeries {
    pub code: String,
    /// `"<code>: <short description>"`
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    /// Cumulative repositories per month.
    pub values: Vec<u64>,
    /// New repositories per month.
    pub monthly: Vec<u64>,
}

impl WebIndustrySeries {
    fn final_value(&self) -> u64 {
        self.values.last().copied().unwrap_or(0)
    }
}

/// Contents of `<agent>_cumulative.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebCumulativeData {
    pub months: Vec<String>,
    /// Largest final cumulative value first.
    pub industries: Vec<WebIndustrySeries>,
    pub total_repos: u64,
}

/// Build the web document for `agent`.
///
/// Fails with [`AdoptionError::EmptyDataset`] when `table` has no months.
pub fn build_web_data(agent: &Agent, table: &MonthlyIndustryTable) -> Result<WebCumulativeData> {
    if table.is_empty() {
        return Err(AdoptionError::EmptyDataset(agent.key.clone()));
    }

    let mut industries: Vec<WebIndustrySeries> = table
        .industries()
        .iter()
        .filter_map(|code| {
            Some(WebIndustrySeries {
                code: code.clone(),
                name: naics::industry_label(code),
                color: naics::color(code).to_string(),
                values: table.cumulative_series(code)?,
                monthly: table.monthly_series(code)?,
            })
        })
        .collect();
    // Stable sort keeps code order among equal final values.
    industries.sort_by(|a, b| b.final_value().cmp(&a.final_value()));

    let total_repos = industries.iter().map(WebIndustrySeries::final_value).sum();

    Ok(WebCumulativeData {
        months: table.months().iter().map(ToString::to_string).collect(),
        industries,
        total_repos,
    })
}

/// Serialise `data` as two-space indented JSON at `path`.
pub fn write_web_data(path: &Path, data: &WebCumulativeData) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).map_err(|source| AdoptionError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote web data to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adoption_core::models::JoinedRecord;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    fn rec(ts: &str, naics: &str) -> JoinedRecord {
        JoinedRecord {
            nwo: format!("{naics}/{ts}"),
            first_use_date: DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc),
            predicted_naics: naics.to_string(),
        }
    }

    fn table() -> MonthlyIndustryTable {
        MonthlyIndustryTable::from_records(&[
            rec("2024-01-03T00:00:00Z", "54"),
            rec("2024-01-20T00:00:00Z", "54"),
            rec("2024-02-11T00:00:00Z", "62"),
        ])
    }

    #[test]
    fn test_build_web_data() {
        let data = build_web_data(&Agent::from_key("claude"), &table()).unwrap();
        assert_eq!(data.months, vec!["2024-01", "2024-02"]);
        assert_eq!(data.total_repos, 3);

        let first = &data.industries[0];
        assert_eq!(first.code, "54");
        assert_eq!(first.name, "54: Professional Services");
        assert_eq!(first.color, "#2E86AB");
        assert_eq!(first.values, vec![2, 2]);
        assert_eq!(first.monthly, vec![2, 0]);

        let second = &data.industries[1];
        assert_eq!(second.code, "62");
        assert_eq!(second.values, vec![0, 1]);
        assert_eq!(second.monthly, vec![0, 1]);
    }

    #[test]
    fn test_industries_ordered_by_final_value() {
        let table = MonthlyIndustryTable::from_records(&[
            rec("2024-01-01T00:00:00Z", "11"),
            rec("2024-01-02T00:00:00Z", "62"),
            rec("2024-02-01T00:00:00Z", "62"),
            rec("2024-02-02T00:00:00Z", "99"),
            rec("2024-03-01T00:00:00Z", "62"),
        ]);
        let data = build_web_data(&Agent::from_key("codex"), &table).unwrap();
        let codes: Vec<&str> = data.industries.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["62", "11", "99"]);

        let unknown = &data.industries[2];
        assert_eq!(unknown.name, "99: 99");
        assert_eq!(unknown.color, naics::FALLBACK_COLOR);
    }

    #[test]
    fn test_empty_table_is_error() {
        let err = build_web_data(&Agent::from_key("copilot"), &MonthlyIndustryTable::default())
            .unwrap_err();
        assert!(matches!(err, AdoptionError::EmptyDataset(ref key) if key == "copilot"));
    }

    #[test]
    fn test_write_web_data_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude_cumulative.json");
        let data = build_web_data(&Agent::from_key("claude"), &table()).unwrap();

        write_web_data(&path, &data).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"months\": ["));
        assert!(content.contains("\"total_repos\": 3"));

        let parsed: WebCumulativeData = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, data);
    }
}
