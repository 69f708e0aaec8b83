use std::path::PathBuf;

/// Failures while reading a sales CSV. The session keeps its previous table
/// whenever one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: can't parse date from {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: invalid {column} value {value:?}")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },
}

/// Failures while writing the report files.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl WriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.into(),
            source,
        }
    }
}
