use thiserror::Error;

/// Result type local to arrowmodel-arrow.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the Parquet round trip. Schema conversion itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parquet error: {0}")]
    Parquet(String),
}

impl From<parquet::errors::ParquetError> for Error {
    fn from(e: parquet::errors::ParquetError) -> Self {
        Error::Parquet(e.to_string())
    }
}
