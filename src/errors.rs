use thiserror::Error;

/// Error type that captures the failures the metric engines can surface.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Upstream read failed: {0}")]
    Upstream(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
