//! Foundation types for cask.
//!
//! This crate provides the identifier types shared by every other cask
//! crate: the content digest that keys the chunk space and the
//! caller-supplied identifier that keys the file space.
//!
//! # Key Types
//!
//! - [`ChunkHash`] -- Content-addressed chunk identifier (SHA-1 digest)
//! - [`FileId`] -- Caller-supplied byte-string file identifier

pub mod error;
pub mod file_id;
pub mod hash;

pub use error::TypeError;
pub use file_id::FileId;
pub use hash::ChunkHash;
