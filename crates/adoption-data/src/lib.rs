//! Data layer for industry adoption statistics.
//!
//! Reads the per-agent Parquet datasets, joins first-use dates with industry
//! predictions, aggregates the result by month and industry and builds the
//! summary tables.

pub mod aggregator;
pub mod analysis;
pub mod join;
pub mod reader;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use adoption_core as core;
