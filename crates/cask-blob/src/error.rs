use cask_kv::KvError;
use cask_types::ChunkHash;
use thiserror::Error;

/// Errors from blob store operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// A stored chunk shares a digest with an incoming chunk of a different
    /// length. Fatal to the write session: content addressing cannot hold
    /// two values under one digest.
    #[error("chunk hash collision for {hash}: stored {stored} bytes, incoming {incoming} bytes")]
    HashCollision {
        hash: ChunkHash,
        stored: usize,
        incoming: usize,
    },

    /// Malformed file index record encountered during decode.
    #[error("corrupt file record: {0}")]
    CorruptRecord(String),

    /// The write session returned an error earlier and refuses further use.
    #[error("write session unusable after an earlier error")]
    SessionPoisoned,

    /// Failure from the underlying key-value engine, propagated verbatim.
    #[error("storage engine error: {0}")]
    Engine(#[from] KvError),
}

/// Result alias for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;
