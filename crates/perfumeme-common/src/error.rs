use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerfumemeError {
    #[error("Identifier could not be resolved: {0}")]
    UnresolvedIdentifier(String),

    #[error("Fetch failed for {identifier}: {reason}")]
    FetchFailed { identifier: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PerfumemeError {
    /// Lookup failures block every downstream evaluation step.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            PerfumemeError::UnresolvedIdentifier(_) | PerfumemeError::FetchFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PerfumemeError>;
