//! Ordered key-value engine contract for cask.
//!
//! The blob layer stores chunks and file records through this interface; the
//! engine itself (LevelDB, RocksDB, sled, ...) is an external collaborator,
//! not reimplemented here. Keys and values are raw byte strings.
//!
//! # Contract
//!
//! All implementations of [`KvEngine`] must satisfy:
//!
//! 1. `get` distinguishes "key absent" (`Ok(None)`) from engine failure
//!    (`Err`). The blob layer's dedup check depends on this.
//! 2. `write` applies a [`WriteBatch`] atomically: either every pair in the
//!    batch becomes visible or none does.
//! 3. `put` of an existing key overwrites its value.
//! 4. Iteration order, where an engine exposes it, follows the raw byte
//!    ordering of keys.
//! 5. All I/O errors are propagated, never silently ignored.
//!
//! # Engines
//!
//! - [`MemoryKvEngine`] -- `BTreeMap`-based engine for tests and embedding

pub mod batch;
pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use batch::WriteBatch;
pub use error::{KvError, KvResult};
pub use memory::MemoryKvEngine;
pub use traits::KvEngine;
