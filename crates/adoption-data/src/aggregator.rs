//! Month × industry aggregation of joined adoption records.

use std::collections::{BTreeMap, BTreeSet};

use adoption_core::models::{JoinedRecord, YearMonth};

// ── IndustryPeriod ────────────────────────────────────────────────────────────

/// All joined records whose first use falls in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryPeriod {
    pub period_key: YearMonth,
    /// New repositories in the month, all industries.
    pub total: u64,
    /// New repositories per industry code. Only codes seen in the month.
    pub industry_counts: BTreeMap<String, u64>,
}

impl IndustryPeriod {
    fn new(period_key: YearMonth) -> Self {
        Self {
            period_key,
            total: 0,
            industry_counts: BTreeMap::new(),
        }
    }

    fn add_record(&mut self, record: &JoinedRecord) {
        self.total += 1;
        *self
            .industry_counts
            .entry(record.predicted_naics.clone())
            .or_default() += 1;
    }
}

/// One row of the monthly adoption table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAdoption {
    pub month: YearMonth,
    pub new_repos: u64,
    pub cumulative_repos: u64,
}

// ── IndustryAggregator ────────────────────────────────────────────────────────

/// Stateless helper that groups joined records by month.
pub struct IndustryAggregator;

impl IndustryAggregator {
    /// Group `records` by first-use month (UTC), ascending.
    pub fn aggregate_monthly(records: &[JoinedRecord]) -> Vec<IndustryPeriod> {
        let mut map: BTreeMap<YearMonth, IndustryPeriod> = BTreeMap::new();

        for record in records {
            let key = record.year_month();
            map.entry(key)
                .or_insert_with(|| IndustryPeriod::new(key))
                .add_record(record);
        }

        map.into_values().collect()
    }

    /// Repositories per industry, descending by count, ties by code.
    pub fn industry_totals(records: &[JoinedRecord]) -> Vec<(String, u64)> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for record in records {
            *counts.entry(record.predicted_naics.as_str()).or_default() += 1;
        }
        sort_totals(
            counts
                .into_iter()
                .map(|(code, n)| (code.to_string(), n))
                .collect(),
        )
    }
}

fn sort_totals(mut totals: Vec<(String, u64)>) -> Vec<(String, u64)> {
    totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    totals
}

// ── MonthlyIndustryTable ──────────────────────────────────────────────────────

/// Dense months × industries matrix of new-repository counts.
///
/// Months are ascending and only include months with at least one record.
/// Industries are sorted by code and only include codes that occur at least
/// once; missing cells are zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyIndustryTable {
    months: Vec<YearMonth>,
    industries: Vec<String>,
    /// `counts[month][industry]`
    counts: Vec<Vec<u64>>,
}

impl MonthlyIndustryTable {
    pub fn from_records(records: &[JoinedRecord]) -> Self {
        Self::from_periods(&IndustryAggregator::aggregate_monthly(records))
    }

    /// Build the matrix from periods already sorted by month.
    pub fn from_periods(periods: &[IndustryPeriod]) -> Self {
        let industries: Vec<String> = periods
            .iter()
            .flat_map(|p| p.industry_counts.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let counts = periods
            .iter()
            .map(|p| {
                industries
                    .iter()
                    .map(|code| p.industry_counts.get(code).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            months: periods.iter().map(|p| p.period_key).collect(),
            industries,
            counts,
        }
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    fn industry_index(&self, code: &str) -> Option<usize> {
        self.industries.iter().position(|c| c == code)
    }

    /// New repositories per month for `code`.
    pub fn monthly_series(&self, code: &str) -> Option<Vec<u64>> {
        let idx = self.industry_index(code)?;
        Some(self.counts.iter().map(|row| row[idx]).collect())
    }

    /// Running total per month for `code`.
    pub fn cumulative_series(&self, code: &str) -> Option<Vec<u64>> {
        let monthly = self.monthly_series(code)?;
        Some(running_sum(&monthly))
    }

    /// Cumulative counts with the same shape as the monthly matrix.
    pub fn cumulative(&self) -> Vec<Vec<u64>> {
        let mut acc = vec![0u64; self.industries.len()];
        self.counts
            .iter()
            .map(|row| {
                for (sum, n) in acc.iter_mut().zip(row) {
                    *sum += n;
                }
                acc.clone()
            })
            .collect()
    }

    /// Non-zero counts for one month, keyed by industry code.
    pub fn counts_for_month(&self, month: YearMonth) -> BTreeMap<String, u64> {
        let Some(row) = self.months.iter().position(|m| *m == month) else {
            return BTreeMap::new();
        };
        self.nonzero(&self.counts[row])
    }

    /// Non-zero cumulative counts up to and including `month`.
    pub fn cumulative_at(&self, month: YearMonth) -> BTreeMap<String, u64> {
        let mut acc = vec![0u64; self.industries.len()];
        for (m, row) in self.months.iter().zip(&self.counts) {
            if *m > month {
                break;
            }
            for (sum, n) in acc.iter_mut().zip(row) {
                *sum += n;
            }
        }
        self.nonzero(&acc)
    }

    fn nonzero(&self, row: &[u64]) -> BTreeMap<String, u64> {
        self.industries
            .iter()
            .zip(row)
            .filter(|(_, n)| **n > 0)
            .map(|(code, n)| (code.clone(), *n))
            .collect()
    }

    /// Total per industry, descending by count, ties by code.
    pub fn industry_totals(&self) -> Vec<(String, u64)> {
        let totals = self
            .industries
            .iter()
            .enumerate()
            .map(|(idx, code)| (code.clone(), self.counts.iter().map(|row| row[idx]).sum()))
            .collect();
        sort_totals(totals)
    }

    /// The `n` industries with the highest totals.
    pub fn top_industries(&self, n: usize) -> Vec<String> {
        self.industry_totals()
            .into_iter()
            .take(n)
            .map(|(code, _)| code)
            .collect()
    }

    /// New and cumulative repositories per month, all industries combined.
    pub fn monthly_totals(&self) -> Vec<MonthlyAdoption> {
        let mut cumulative_repos = 0u64;
        self.months
            .iter()
            .zip(&self.counts)
            .map(|(month, row)| {
                let new_repos: u64 = row.iter().sum();
                cumulative_repos += new_repos;
                MonthlyAdoption {
                    month: *month,
                    new_repos,
                    cumulative_repos,
                }
            })
            .collect()
    }

    /// Total joined records represented by the table.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

fn running_sum(values: &[u64]) -> Vec<u64> {
    values
        .iter()
        .scan(0u64, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
