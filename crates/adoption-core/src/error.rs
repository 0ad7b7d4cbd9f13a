use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the adoption pipeline.
#[derive(Error, Debug)]
pub enum AdoptionError {
    /// An expected input dataset does not exist on disk.
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Parquet file could not be decoded.
    #[error("Failed to decode Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// An Arrow column could not be cast or accessed.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A required column is absent after legacy-name normalisation.
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A column exists but has a type that cannot be coerced.
    #[error("Unsupported type {data_type} for column '{column}'")]
    UnsupportedColumnType { column: String, data_type: String },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// Nothing left to aggregate for an agent.
    #[error("No data to aggregate for {0}")]
    EmptyDataset(String),

    /// A delimited table could not be written.
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// The chart backend failed to draw or encode an image.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdoptionError {
    /// `true` when the error means the agent simply has no input data.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, AdoptionError::MissingInput { .. })
    }
}

/// Convenience alias used throughout the adoption crates.
pub type Result<T> = std::result::Result<T, AdoptionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_input() {
        let err = AdoptionError::MissingInput {
            path: PathBuf::from("data/predictions/claude_predictions.parquet"),
        };
        assert_eq!(
            err.to_string(),
            "Input file not found: data/predictions/claude_predictions.parquet"
        );
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AdoptionError::FileRead {
            path: PathBuf::from("/some/file.parquet"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/file.parquet"));
        assert!(msg.contains("denied"));
        assert!(!err.is_missing_input());
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = AdoptionError::MissingColumn {
            column: "predicted_naics".to_string(),
            path: PathBuf::from("p.parquet"),
        };
        assert_eq!(err.to_string(), "Missing column 'predicted_naics' in p.parquet");
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = AdoptionError::TimestampParse("yesterday".to_string());
        assert_eq!(err.to_string(), "Invalid timestamp format: yesterday");
    }

    #[test]
    fn test_error_display_empty_dataset() {
        let err = AdoptionError::EmptyDataset("codex".to_string());
        assert_eq!(err.to_string(), "No data to aggregate for codex");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: AdoptionError = io_err.into();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: AdoptionError = json_err.into();
        assert!(err.to_string().contains("Failed to serialise JSON"));
    }
}
