use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agents analysed by default, as `(file key, display name)`.
pub const KNOWN_AGENTS: &[(&str, &str)] = &[
    ("claude", "Claude Code"),
    ("copilot", "GitHub Copilot"),
    ("codex", "OpenAI Codex"),
];

/// An AI coding agent whose adoption is being measured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    /// Key used in input and output file names, e.g. `"claude"`.
    pub key: String,
    /// Human-readable name used in tables and chart titles.
    pub display_name: String,
}

impl Agent {
    /// Build an agent from its file key.
    ///
    /// Known keys resolve to their display name; unknown keys use the key
    /// itself as the display name.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim().to_lowercase();
        let display_name = KNOWN_AGENTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| key.clone());
        Self { key, display_name }
    }

    /// The three agents analysed when none are requested explicitly.
    pub fn defaults() -> Vec<Agent> {
        KNOWN_AGENTS.iter().map(|(k, _)| Agent::from_key(k)).collect()
    }

    /// `"<key>_first_use.parquet"`
    pub fn first_use_file_name(&self) -> String {
        format!("{}_first_use.parquet", self.key)
    }

    /// `"<key>_predictions.parquet"`
    pub fn predictions_file_name(&self) -> String {
        format!("{}_predictions.parquet", self.key)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Earliest recorded use of an agent by one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstUseRecord {
    /// Repository "name with owner", e.g. `"octo/widgets"`.
    pub nwo: String,
    /// UTC instant of the first commit attributed to the agent.
    pub first_use_date: DateTime<Utc>,
}

/// Industry classification predicted for one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub nwo: String,
    /// NAICS sector code, e.g. `"54"` or `"31-33"`.
    pub predicted_naics: String,
    /// Classifier confidence in `[0, 1]`, when the dataset carries one.
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A first-use record enriched with its predicted industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub nwo: String,
    pub first_use_date: DateTime<Utc>,
    pub predicted_naics: String,
}

impl JoinedRecord {
    /// Calendar month (UTC) of the first use.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_datetime(&self.first_use_date)
    }
}

/// A calendar month bucket. Orders chronologically and displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing `ts` in UTC.
    pub fn from_datetime(ts: &DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
