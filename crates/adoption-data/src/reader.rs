//! Parquet loading for the first-use and prediction datasets.
//!
//! Reads `<data>/adoption_timing/<agent>_first_use.parquet` and
//! `<data>/predictions/<agent>_predictions.parquet`, renames legacy column
//! names to the canonical schema and converts rows into
//! [`FirstUseRecord`] / [`PredictionRecord`] values.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use adoption_core::error::{AdoptionError, Result};
use adoption_core::models::{Agent, FirstUseRecord, PredictionRecord};
use adoption_core::time_utils::parse_timestamp;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float64Type, Int64Type, Schema, SchemaRef, TimeUnit,
};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::debug;

// ── Column names ──────────────────────────────────────────────────────────────

/// Repository identifier ("name with owner").
pub const NWO: &str = "nwo";
/// First-use instant.
pub const FIRST_USE_DATE: &str = "first_use_date";
/// Predicted NAICS sector code.
pub const PREDICTED_NAICS: &str = "predicted_naics";
/// Optional classifier confidence.
pub const CONFIDENCE: &str = "confidence";

/// Legacy column names written by older exports, mapped to canonical names.
pub const LEGACY_RENAMES: &[(&str, &str)] = &[
    ("repo_nwo", NWO),
    ("first_claude_commit", FIRST_USE_DATE),
];

// ── Paths ─────────────────────────────────────────────────────────────────────

/// Convention-based input locations for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub first_use: PathBuf,
    pub predictions: PathBuf,
}

impl DatasetPaths {
    pub fn for_agent(data_dir: &Path, agent: &Agent) -> Self {
        Self {
            first_use: data_dir
                .join("adoption_timing")
                .join(agent.first_use_file_name()),
            predictions: data_dir
                .join("predictions")
                .join(agent.predictions_file_name()),
        }
    }
}

// ── Schema normalisation ──────────────────────────────────────────────────────

/// Rename legacy columns (`repo_nwo`, `first_claude_commit`) to their
/// canonical names. Applying it twice yields the same schema.
pub fn normalize_schema(schema: &Schema) -> Schema {
    let fields: Vec<_> = schema
        .fields()
        .iter()
        .map(|field| {
            let renamed = LEGACY_RENAMES
                .iter()
                .find(|(legacy, _)| field.name().as_str() == *legacy)
                .map(|(_, canonical)| *canonical);
            match renamed {
                Some(name) => field.as_ref().clone().with_name(name),
                None => field.as_ref().clone(),
            }
        })
        .collect();
    Schema::new_with_metadata(fields, schema.metadata().clone())
}

// ── ParquetTable ──────────────────────────────────────────────────────────────

/// All record batches of one Parquet file under a normalised schema.
#[derive(Debug, Clone)]
pub struct ParquetTable {
    pub path: PathBuf,
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
}

impl ParquetTable {
    /// Read `path` fully into memory.
    ///
    /// Returns [`AdoptionError::MissingInput`] when the file does not exist.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AdoptionError::MissingInput {
                path: path.to_path_buf(),
            });
        }

        let file = std::fs::File::open(path).map_err(|source| AdoptionError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let schema: SchemaRef = Arc::new(normalize_schema(builder.schema()));
        let reader = builder.build()?;

        let mut batches = Vec::new();
        for batch in reader {
            let batch = batch?;
            batches.push(RecordBatch::try_new(
                Arc::clone(&schema),
                batch.columns().to_vec(),
            )?);
        }

        Ok(Self {
            path: path.to_path_buf(),
            schema,
            batches,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.schema
            .index_of(name)
            .map_err(|_| AdoptionError::MissingColumn {
                column: name.to_string(),
                path: self.path.clone(),
            })
    }
}

// ── PredictionSet ─────────────────────────────────────────────────────────────

/// Predictions for one agent.
///
/// Only rows with both an identifier and an industry code become `records`;
/// the row count and the confidence scores cover every row of the file.
#[derive(Debug, Clone, Default)]
pub struct PredictionSet {
    pub records: Vec<PredictionRecord>,
    /// Rows in the file, including rows left out of `records`.
    pub row_count: usize,
    /// Non-null confidence values of every row, in file order.
    pub confidence_scores: Vec<f64>,
    pub has_confidence: bool,
}

impl PredictionSet {
    /// Number of rows in the prediction file.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the first-use dataset at `path`.
///
/// Rows with a null identifier or timestamp are skipped.
pub fn load_first_use(path: &Path) -> Result<Vec<FirstUseRecord>> {
    let table = ParquetTable::read(path)?;
    let nwo_idx = table.column_index(NWO)?;
    let date_idx = table.column_index(FIRST_USE_DATE)?;

    let mut records = Vec::with_capacity(table.num_rows());
    let mut skipped = 0usize;

    for batch in &table.batches {
        let nwos = string_values(batch.column(nwo_idx), NWO)?;
        let dates = timestamp_values(batch.column(date_idx), FIRST_USE_DATE)?;
        for (nwo, date) in nwos.into_iter().zip(dates) {
            match (nwo, date) {
                (Some(nwo), Some(first_use_date)) => records.push(FirstUseRecord {
                    nwo,
                    first_use_date,
                }),
                _ => skipped += 1,
            }
        }
    }

    debug!(
        "{}: {} first-use rows loaded, {} skipped with nulls",
        path.display(),
        records.len(),
        skipped
    );
    Ok(records)
}

/// Load the prediction dataset at `path`.
///
/// `confidence` is optional. Rows with a null identifier or industry code are
/// left out of the join records but still count towards `row_count` and
/// `confidence_scores`.
pub fn load_predictions(path: &Path) -> Result<PredictionSet> {
    let table = ParquetTable::read(path)?;
    let nwo_idx = table.column_index(NWO)?;
    let naics_idx = table.column_index(PREDICTED_NAICS)?;
    let confidence_idx = table.schema.index_of(CONFIDENCE).ok();

    let mut records = Vec::with_capacity(table.num_rows());
    let mut confidence_scores = Vec::new();
    let mut skipped = 0usize;

    for batch in &table.batches {
        let nwos = string_values(batch.column(nwo_idx), NWO)?;
        let codes = string_values(batch.column(naics_idx), PREDICTED_NAICS)?;
        let confidences = match confidence_idx {
            Some(idx) => float_values(batch.column(idx), CONFIDENCE)?,
            None => vec![None; batch.num_rows()],
        };

        for ((nwo, code), confidence) in nwos.into_iter().zip(codes).zip(confidences) {
            confidence_scores.extend(confidence);
            match (nwo, code) {
                (Some(nwo), Some(predicted_naics)) => records.push(PredictionRecord {
                    nwo,
                    predicted_naics,
                    confidence,
                }),
                _ => skipped += 1,
            }
        }
    }

    debug!(
        "{}: {} predictions loaded, {} skipped with nulls",
        path.display(),
        records.len(),
        skipped
    );
    Ok(PredictionSet {
        records,
        row_count: table.num_rows(),
        confidence_scores,
        has_confidence: confidence_idx.is_some(),
    })
}

// ── Column coercion ───────────────────────────────────────────────────────────

fn unsupported(column: &str, data_type: &DataType) -> AdoptionError {
    AdoptionError::UnsupportedColumnType {
        column: column.to_string(),
        data_type: data_type.to_string(),
    }
}

/// Any string-like or integer column, as owned strings.
fn string_values(array: &ArrayRef, column: &str) -> Result<Vec<Option<String>>> {
    if !can_cast_types(array.data_type(), &DataType::Utf8) {
        return Err(unsupported(column, array.data_type()));
    }
    let strings = cast(array, &DataType::Utf8)?;
    Ok(strings
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Timestamp, date or string column as UTC instants.
///
/// Naive timestamps are read as UTC. An unparseable string is an error.
fn timestamp_values(array: &ArrayRef, column: &str) -> Result<Vec<Option<DateTime<Utc>>>> {
    match array.data_type() {
        DataType::Timestamp(unit, _) => {
            // Arrow stores zoned timestamps as UTC epoch offsets.
            let raw = cast(array, &DataType::Int64)?;
            Ok(raw
                .as_primitive::<Int64Type>()
                .iter()
                .map(|v| v.and_then(|v| from_epoch(v, unit)))
                .collect())
        }
        DataType::Date32 => Ok(array
            .as_primitive::<Date32Type>()
            .iter()
            .map(|v| v.and_then(|days| DateTime::from_timestamp(i64::from(days) * 86_400, 0)))
            .collect()),
        DataType::Date64 => Ok(array
            .as_primitive::<Date64Type>()
            .iter()
            .map(|v| v.and_then(DateTime::from_timestamp_millis))
            .collect()),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast(array, &DataType::Utf8)?;
            strings
                .as_string::<i32>()
                .iter()
                .map(|v| match v {
                    None => Ok(None),
                    Some(s) => parse_timestamp(s)
                        .map(Some)
                        .ok_or_else(|| AdoptionError::TimestampParse(s.to_string())),
                })
                .collect()
        }
        other => Err(unsupported(column, other)),
    }
}

fn from_epoch(value: i64, unit: &TimeUnit) -> Option<DateTime<Utc>> {
    match unit {
        TimeUnit::Second => DateTime::from_timestamp(value, 0),
        TimeUnit::Millisecond => DateTime::from_timestamp_millis(value),
        TimeUnit::Microsecond => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(value)),
    }
}

/// Any numeric column as `f64`.
fn float_values(array: &ArrayRef, column: &str) -> Result<Vec<Option<f64>>> {
    if !array.data_type().is_numeric() {
        return Err(unsupported(column, array.data_type()));
    }
    let floats = cast(array, &DataType::Float64)?;
    Ok(floats.as_primitive::<Float64Type>().iter().collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
