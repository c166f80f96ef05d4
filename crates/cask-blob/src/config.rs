/// Configuration for a [`crate::BlobStore`].
#[derive(Clone, Debug)]
pub struct BlobConfig {
    /// Chunk boundary interval in bytes (default: 256 KiB).
    pub chunk_size: usize,
    /// Cumulative staged bytes at which the pending chunk batch is flushed
    /// (default: 4 MiB).
    pub batch_threshold: usize,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            chunk_size: 256 * 1024,
            batch_threshold: 4 * 1024 * 1024,
        }
    }
}
