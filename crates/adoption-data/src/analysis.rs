//! Per-agent pipeline: load both datasets, join them and hand the result to
//! the aggregation and summary layers.

use std::path::Path;

use adoption_core::error::Result;
use adoption_core::models::{Agent, FirstUseRecord, JoinedRecord};
use tracing::info;

use crate::aggregator::MonthlyIndustryTable;
use crate::join::inner_join;
use crate::reader::{load_first_use, load_predictions, DatasetPaths, PredictionSet};

/// Everything loaded for one agent.
#[derive(Debug, Clone)]
pub struct AgentDataset {
    pub agent: Agent,
    pub first_use: Vec<FirstUseRecord>,
    pub predictions: PredictionSet,
    /// Inner join of `first_use` and `predictions`.
    pub joined: Vec<JoinedRecord>,
}

impl AgentDataset {
    pub fn monthly_table(&self) -> MonthlyIndustryTable {
        MonthlyIndustryTable::from_records(&self.joined)
    }
}

/// Load and join the datasets of `agent` under `data_dir`.
///
/// A missing input file surfaces as
/// [`AdoptionError::MissingInput`](adoption_core::error::AdoptionError::MissingInput).
pub fn load_agent_dataset(data_dir: &Path, agent: &Agent) -> Result<AgentDataset> {
    let paths = DatasetPaths::for_agent(data_dir, agent);

    let predictions = load_predictions(&paths.predictions)?;
    info!("Loaded {} predictions for {}", predictions.len(), agent.key);

    let first_use = load_first_use(&paths.first_use)?;
    info!("Loaded {} first-use records for {}", first_use.len(), agent.key);

    let joined = inner_join(&first_use, &predictions.records);
    info!("Merged dataset for {}: {} repos", agent.key, joined.len());

    Ok(AgentDataset {
        agent: agent.clone(),
        first_use,
        predictions,
        joined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{timestamps_micros, utf8, write_agent_fixture, write_columns};
    use adoption_core::error::AdoptionError;
    use adoption_core::models::YearMonth;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_worked_example_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_agent_fixture(
            dir.path(),
            "claude",
            &[
                ("A", "2024-01-10T00:00:00Z"),
                ("B", "2024-01-25T00:00:00Z"),
                ("C", "2024-02-03T00:00:00Z"),
            ],
            &[("A", "54", None), ("B", "54", None), ("C", "62", None)],
        );

        let dataset = load_agent_dataset(dir.path(), &Agent::from_key("claude")).unwrap();
        assert_eq!(dataset.joined.len(), 3);

        let table = dataset.monthly_table();
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(
            table.cumulative_at(feb),
            BTreeMap::from([("54".to_string(), 2), ("62".to_string(), 1)])
        );
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_missing_predictions_file() {
        let dir = TempDir::new().unwrap();
        let err = load_agent_dataset(dir.path(), &Agent::from_key("codex")).unwrap_err();
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_missing_first_use_file() {
        let dir = TempDir::new().unwrap();
        let paths = write_agent_fixture(dir.path(), "copilot", &[], &[("A", "54", None)]);
        std::fs::remove_file(&paths.first_use).unwrap();

        let err = load_agent_dataset(dir.path(), &Agent::from_key("copilot")).unwrap_err();
        assert!(matches!(err, AdoptionError::MissingInput { .. }));
    }

    #[test]
    fn test_identifiers_join_on_exact_text() {
        let dir = TempDir::new().unwrap();
        write_agent_fixture(
            dir.path(),
            "claude",
            &[("a/b ", "2024-01-10T00:00:00Z")],
            &[("a/b", "54", Some(0.8))],
        );

        let dataset = load_agent_dataset(dir.path(), &Agent::from_key("claude")).unwrap();
        assert_eq!(dataset.first_use.len(), 1);
        assert_eq!(dataset.predictions.len(), 1);
        assert!(dataset.joined.is_empty());
    }

    #[test]
    fn test_legacy_first_use_columns() {
        let dir = TempDir::new().unwrap();
        let paths = write_agent_fixture(dir.path(), "claude", &[], &[("o/r", "51", Some(0.9))]);
        write_columns(
            &paths.first_use,
            vec![
                ("repo_nwo", utf8(&["o/r"])),
                ("first_claude_commit", timestamps_micros(&["2025-03-04T05:06:07Z"])),
            ],
        );

        let dataset = load_agent_dataset(dir.path(), &Agent::from_key("claude")).unwrap();
        assert_eq!(dataset.joined.len(), 1);
        assert_eq!(dataset.joined[0].year_month().to_string(), "2025-03");
    }
}
