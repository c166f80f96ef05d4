//! Chunk boundary detection for cask.
//!
//! A boundary source turns a sequence of arbitrary-length `feed` calls into
//! a sequence of complete chunks plus one final remainder. The file writer
//! hashes and stores whatever the boundary source emits; swapping the
//! boundary policy (for example to content-defined chunking) changes dedup
//! behavior without touching the writer.
//!
//! The shipped policy is [`FixedChunker`]: a boundary every `chunk_size`
//! bytes, placed purely by position. Two files that differ only in prefix
//! length will not dedup their shared suffix chunks under this policy;
//! that is a documented property of positional chunking, not a bug.

pub mod fixed;
pub mod traits;

pub use fixed::FixedChunker;
pub use traits::BoundarySource;
