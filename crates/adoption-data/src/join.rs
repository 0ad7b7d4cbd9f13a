//! Inner join of first-use records with industry predictions.

use std::collections::HashMap;

use adoption_core::models::{FirstUseRecord, JoinedRecord, PredictionRecord};

/// Join `first_use` with `predictions` on the repository identifier.
///
/// Repositories without a prediction are dropped. Output keeps the order of
/// `first_use`. When a repository is predicted more than once, the last
/// prediction wins.
pub fn inner_join(first_use: &[FirstUseRecord], predictions: &[PredictionRecord]) -> Vec<JoinedRecord> {
    let industry_by_repo: HashMap<&str, &str> = predictions
        .iter()
        .map(|p| (p.nwo.as_str(), p.predicted_naics.as_str()))
        .collect();

    first_use
        .iter()
        .filter_map(|f| {
            industry_by_repo
                .get(f.nwo.as_str())
                .map(|naics| JoinedRecord {
                    nwo: f.nwo.clone(),
                    first_use_date: f.first_use_date,
                    predicted_naics: (*naics).to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn first_use(nwo: &str, ts: &str) -> FirstUseRecord {
        FirstUseRecord {
            nwo: nwo.to_string(),
            first_use_date: DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc),
        }
    }

    fn prediction(nwo: &str, naics: &str) -> PredictionRecord {
        PredictionRecord {
            nwo: nwo.to_string(),
            predicted_naics: naics.to_string(),
            confidence: None,
        }
    }

    #[test]
    fn test_inner_join_drops_unmatched_on_both_sides() {
        let fu = vec![
            first_use("a", "2024-01-01T00:00:00Z"),
            first_use("b", "2024-01-02T00:00:00Z"),
            first_use("c", "2024-02-01T00:00:00Z"),
        ];
        let preds = vec![prediction("a", "54"), prediction("c", "62"), prediction("d", "51")];

        let joined = inner_join(&fu, &preds);
        let repos: Vec<&str> = joined.iter().map(|j| j.nwo.as_str()).collect();
        assert_eq!(repos, vec!["a", "c"]);
        assert_eq!(joined[1].predicted_naics, "62");
        assert_eq!(joined[1].first_use_date, fu[2].first_use_date);
    }

    #[test]
    fn test_inner_join_size_bounded_by_smaller_input() {
        let fu: Vec<_> = (0..10)
            .map(|i| first_use(&format!("r{i}"), "2024-01-01T00:00:00Z"))
            .collect();
        let preds: Vec<_> = (5..8).map(|i| prediction(&format!("r{i}"), "54")).collect();

        let joined = inner_join(&fu, &preds);
        assert_eq!(joined.len(), 3);
        assert!(joined.len() <= fu.len().min(preds.len()));
    }

    #[test]
    fn test_inner_join_duplicate_prediction_last_wins() {
        let fu = vec![first_use("a", "2024-01-01T00:00:00Z")];
        let preds = vec![prediction("a", "54"), prediction("a", "61")];

        let joined = inner_join(&fu, &preds);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].predicted_naics, "61");
    }

    #[test]
    fn test_inner_join_empty_inputs() {
        assert!(inner_join(&[], &[prediction("a", "54")]).is_empty());
        assert!(inner_join(&[first_use("a", "2024-01-01T00:00:00Z")], &[]).is_empty());
    }
}
