use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendError {
    /// Upstream feed fetch failed (network error, non-2xx, quota exhausted).
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Analysis failure: {0}")]
    AnalysisFailure(String),

    #[error("Synthesis failure: {0}")]
    SynthesisFailure(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type TrendResult<T> = Result<T, TrendError>;
