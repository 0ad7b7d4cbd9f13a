//! Shared building blocks for the industry adoption workspace.
//!
//! Domain models, the error type, NAICS lookup tables, time and number
//! helpers, descriptive statistics and command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod naics;
pub mod settings;
pub mod stats;
pub mod time_utils;
