use fleet_core::{ErrorSeverity, FleetError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("combat repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl FleetError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockPoisoned => ErrorSeverity::Fatal,
            Self::Io(_) => ErrorSeverity::Recoverable,
            Self::Serialization(_) | Self::CorruptedData(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Serialization(_) => "REPOSITORY_SERIALIZATION",
            Self::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
