//! Content-addressed chunked blob writing for cask.
//!
//! This crate turns a stream of file bytes into deduplicated,
//! content-addressed chunks in an ordered key-value engine, plus one
//! compact index record per file from which an external reader can
//! reconstruct the original bytes exactly.
//!
//! # Write Path
//!
//! caller → [`FileWriter::write`] → boundary source (accumulates into
//! chunks) → per completed chunk: SHA-1 hash → chunk-space point lookup →
//! (miss) stage into the pending batch → (threshold) atomic batched put.
//! [`FileWriter::close`] absorbs the remainder, force-flushes, and writes
//! the [`FileRecord`] to the file space.
//!
//! # Design Rules
//!
//! 1. Chunks are immutable and stored once per distinct content; the
//!    digest is the storage key.
//! 2. The file-space record is written only after every chunk it
//!    references is confirmed pre-existing or flushed. No partial record
//!    is ever visible.
//! 3. A matching digest with a mismatched length is a fatal collision
//!    error, never silently resolved by overwriting.
//! 4. The core is synchronous and caller-driven: no internal threads, no
//!    timeouts, no retries. Engine errors surface to the caller verbatim.
//! 5. Racing chunk puts from concurrent sessions are benign; file-space
//!    keys are last-writer-wins and externally serialized if that matters.

mod batch;
pub mod config;
pub mod error;
mod pool;
pub mod record;
pub mod store;
pub mod writer;

// Re-export primary types at crate root for ergonomic imports.
pub use config::BlobConfig;
pub use error::{BlobError, BlobResult};
pub use record::{ChunkRef, FileRecord};
pub use store::BlobStore;
pub use writer::FileWriter;
