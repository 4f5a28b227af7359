use mt_core::{EntityId, MtError};
use mt_samples::SampleError;
use thiserror::Error;

/// Why a reload produced no records.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("data source returned unreadable records: {0}")]
    Samples(#[from] SampleError),
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(#[from] MtError),

    #[error("entity {0} has no timeline")]
    EntityNotFound(EntityId),
}

pub type EngineResult<T> = Result<T, EngineError>;
