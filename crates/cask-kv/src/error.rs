use thiserror::Error;

/// Errors from key-value engine operations.
///
/// "Key not found" is not an error: [`crate::KvEngine::get`] returns
/// `Ok(None)` for an absent key.
#[derive(Debug, Error)]
pub enum KvError {
    /// I/O error from the underlying storage engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine-specific failure (corruption, resource exhaustion, ...).
    #[error("engine error: {0}")]
    Backend(String),
}

/// Result alias for engine operations.
pub type KvResult<T> = Result<T, KvError>;
