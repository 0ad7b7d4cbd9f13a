//! Presentation layer for industry adoption statistics.
//!
//! Renders aggregated tables as CSV files, web JSON documents, stacked-area
//! PNG charts and aligned console tables. Nothing here changes the data it is
//! given.

pub mod chart;
pub mod csv_export;
pub mod table_view;
pub mod web_export;
