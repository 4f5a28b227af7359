use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("telemetry parse error: {0}")]
    Parse(String),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON read error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SampleResult<T> = Result<T, SampleError>;
