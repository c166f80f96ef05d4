use crate::batch::WriteBatch;
use crate::error::KvResult;

/// Ordered key-value engine.
///
/// All implementations must satisfy these invariants:
/// - `get` returns `Ok(None)` for an absent key; `Err` is reserved for
///   engine failure. Callers rely on the distinction.
/// - `write` applies the whole batch atomically.
/// - `put` overwrites an existing key.
/// - All I/O errors are propagated, never silently ignored.
pub trait KvEngine: Send + Sync {
    /// Point lookup.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    /// Returns `Err` on engine failure.
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>>;

    /// Store a single key-value pair, overwriting any existing value.
    fn put(&self, key: &[u8], value: &[u8]) -> KvResult<()>;

    /// Apply a batch of puts atomically: either every pair in `batch`
    /// becomes visible or none does.
    fn write(&self, batch: &WriteBatch) -> KvResult<()>;
}
