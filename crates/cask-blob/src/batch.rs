use cask_kv::{KvEngine, KvResult, WriteBatch};
use cask_types::ChunkHash;
use tracing::debug;

/// Pending chunk puts not yet committed to the chunk space.
///
/// The threshold is capacity-based, not count-based: `is_full` compares the
/// cumulative staged bytes against it, so a single oversized chunk can make
/// the buffer full on its own.
pub(crate) struct BatchBuffer {
    batch: WriteBatch,
    staged_bytes: usize,
    threshold: usize,
}

impl BatchBuffer {
    pub(crate) fn new(threshold: usize) -> Self {
        Self {
            batch: WriteBatch::new(),
            staged_bytes: 0,
            threshold,
        }
    }

    /// Queue one chunk for the next flush.
    pub(crate) fn stage(&mut self, hash: &ChunkHash, data: &[u8]) {
        self.batch.put(hash.as_bytes().to_vec(), data.to_vec());
        self.staged_bytes += data.len();
    }

    pub(crate) fn is_full(&self) -> bool {
        self.staged_bytes >= self.threshold
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Commit every staged pair in one atomic engine write.
    ///
    /// The buffer is cleared right after the write is issued, success or
    /// not: after a failed flush the staged pairs are gone from memory and
    /// their durability is unknown. Callers surface the error and re-run
    /// the whole file write rather than retrying the buffer.
    pub(crate) fn flush(&mut self, engine: &dyn KvEngine) -> KvResult<()> {
        debug!(
            entries = self.batch.len(),
            bytes = self.staged_bytes,
            "flushing chunk batch"
        );
        let result = engine.write(&self.batch);
        self.batch.clear();
        self.staged_bytes = 0;
        result
    }

    /// Drop all staged pairs without writing them, retaining capacity.
    pub(crate) fn reset(&mut self) {
        self.batch.clear();
        self.staged_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cask_kv::{KvError, MemoryKvEngine};

    /// Engine whose batched writes always fail.
    struct FailingEngine;

    impl KvEngine for FailingEngine {
        fn get(&self, _key: &[u8]) -> KvResult<Option<Vec<u8>>> {
            Ok(None)
        }
        fn put(&self, _key: &[u8], _value: &[u8]) -> KvResult<()> {
            Ok(())
        }
        fn write(&self, _batch: &WriteBatch) -> KvResult<()> {
            Err(KvError::Backend("injected write failure".into()))
        }
    }

    fn hash_of(data: &[u8]) -> ChunkHash {
        ChunkHash::from_bytes(data)
    }

    #[test]
    fn stage_accumulates_until_threshold() {
        let mut buffer = BatchBuffer::new(10);
        buffer.stage(&hash_of(b"aaaa"), b"aaaa");
        assert!(!buffer.is_full());
        buffer.stage(&hash_of(b"bbbbbb"), b"bbbbbb");
        assert!(buffer.is_full());
    }

    #[test]
    fn oversized_single_chunk_fills_the_buffer() {
        let mut buffer = BatchBuffer::new(4);
        buffer.stage(&hash_of(b"12345678"), b"12345678");
        assert!(buffer.is_full());
    }

    #[test]
    fn flush_commits_and_clears() {
        let engine = MemoryKvEngine::new();
        let mut buffer = BatchBuffer::new(100);
        buffer.stage(&hash_of(b"data"), b"data");
        buffer.flush(&engine).unwrap();

        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(
            engine.get(hash_of(b"data").as_bytes()).unwrap(),
            Some(b"data".to_vec())
        );
    }

    #[test]
    fn failed_flush_still_clears() {
        let mut buffer = BatchBuffer::new(100);
        buffer.stage(&hash_of(b"doomed"), b"doomed");
        let err = buffer.flush(&FailingEngine).unwrap_err();
        assert!(matches!(err, KvError::Backend(_)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn reset_discards_staged_pairs() {
        let engine = MemoryKvEngine::new();
        let mut buffer = BatchBuffer::new(100);
        buffer.stage(&hash_of(b"dropped"), b"dropped");
        buffer.reset();
        assert!(buffer.is_empty());
        buffer.flush(&engine).unwrap();
        assert!(engine.is_empty());
    }
}
