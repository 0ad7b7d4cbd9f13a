//! Parquet fixture helpers shared by the unit tests of this crate.

use std::path::Path;
use std::sync::Arc;

use adoption_core::models::Agent;
use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray};
use arrow::record_batch::RecordBatch;
use chrono::DateTime;
use parquet::arrow::ArrowWriter;

use crate::reader::{DatasetPaths, CONFIDENCE, FIRST_USE_DATE, NWO, PREDICTED_NAICS};

pub(crate) fn utf8(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

pub(crate) fn f64s(values: &[Option<f64>]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

/// RFC 3339 strings as a UTC microsecond timestamp column.
pub(crate) fn timestamps_micros(values: &[&str]) -> ArrayRef {
    let micros: Vec<i64> = values
        .iter()
        .map(|s| DateTime::parse_from_rfc3339(s).unwrap().timestamp_micros())
        .collect();
    Arc::new(TimestampMicrosecondArray::from(micros).with_timezone("UTC"))
}

pub(crate) fn write_columns(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let batch = RecordBatch::try_from_iter(columns).unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

/// Write both datasets for `agent_key` under `data_dir` using the canonical
/// column names.
pub(crate) fn write_agent_fixture(
    data_dir: &Path,
    agent_key: &str,
    first_use: &[(&str, &str)],
    predictions: &[(&str, &str, Option<f64>)],
) -> DatasetPaths {
    let paths = DatasetPaths::for_agent(data_dir, &Agent::from_key(agent_key));

    let nwos: Vec<&str> = first_use.iter().map(|(n, _)| *n).collect();
    let dates: Vec<&str> = first_use.iter().map(|(_, d)| *d).collect();
    write_columns(
        &paths.first_use,
        vec![(NWO, utf8(&nwos)), (FIRST_USE_DATE, timestamps_micros(&dates))],
    );

    let nwos: Vec<&str> = predictions.iter().map(|(n, _, _)| *n).collect();
    let codes: Vec<&str> = predictions.iter().map(|(_, c, _)| *c).collect();
    let confidences: Vec<Option<f64>> = predictions.iter().map(|(_, _, c)| *c).collect();
    write_columns(
        &paths.predictions,
        vec![
            (NWO, utf8(&nwos)),
            (PREDICTED_NAICS, utf8(&codes)),
            (CONFIDENCE, f64s(&confidences)),
        ],
    );

    paths
}
