// Errors surfaced by the augmentation use cases
use crate::domain::chart::ChartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AugmentError {
    /// Connection failure or non-2xx status from the statistics service.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("statistics service returned an empty series")]
    EmptySeries,
    #[error("base series is empty")]
    EmptyBase,
    #[error(transparent)]
    Chart(#[from] ChartError),
}
