use std::sync::Mutex;

use cask_chunk::{BoundarySource, FixedChunker};

use crate::batch::BatchBuffer;
use crate::config::BlobConfig;
use crate::record::ChunkRef;

/// Recyclable state owned by one write session: the chunker, the ordered
/// chunk-reference list, and the pending batch buffer.
pub(crate) struct WriterCore {
    pub(crate) chunker: FixedChunker,
    pub(crate) refs: Vec<ChunkRef>,
    pub(crate) batch: BatchBuffer,
    pub(crate) poisoned: bool,
}

impl WriterCore {
    fn new(config: &BlobConfig) -> Self {
        Self {
            chunker: FixedChunker::new(config.chunk_size),
            refs: Vec::new(),
            batch: BatchBuffer::new(config.batch_threshold),
            poisoned: false,
        }
    }

    /// Clear all session state, retaining buffer capacity.
    fn reset(&mut self) {
        self.chunker.reset();
        self.refs.clear();
        self.batch.reset();
        self.poisoned = false;
    }
}

/// Free list of recycled writer cores.
///
/// Sustained write load reuses chunker and batch allocations instead of
/// rebuilding them per file. The mutex guards only the idle list: a
/// checked-out core is exclusively owned by its session until released.
pub(crate) struct WriterPool {
    idle: Mutex<Vec<WriterCore>>,
}

impl WriterPool {
    pub(crate) fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Pop a recycled core, or build a fresh one sized by `config`.
    /// Cores on the idle list are always in the reset state.
    pub(crate) fn acquire(&self, config: &BlobConfig) -> WriterCore {
        let recycled = self.idle.lock().expect("lock poisoned").pop();
        recycled.unwrap_or_else(|| WriterCore::new(config))
    }

    /// Return a core to the free list. Called from session close and drop
    /// only; a session mid-write is never released.
    pub(crate) fn release(&self, mut core: WriterCore) {
        core.reset();
        self.idle.lock().expect("lock poisoned").push(core);
    }

    #[cfg(test)]
    pub(crate) fn idle_len(&self) -> usize {
        self.idle.lock().expect("lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BlobConfig {
        BlobConfig {
            chunk_size: 8,
            batch_threshold: 64,
        }
    }

    #[test]
    fn acquire_from_empty_pool_builds_a_core() {
        let pool = WriterPool::new();
        let core = pool.acquire(&small_config());
        assert_eq!(core.chunker.chunk_size(), 8);
        assert!(core.refs.is_empty());
        assert_eq!(pool.idle_len(), 0);
    }

    #[test]
    fn release_then_acquire_reuses_the_core() {
        let pool = WriterPool::new();
        let core = pool.acquire(&small_config());
        pool.release(core);
        assert_eq!(pool.idle_len(), 1);

        let core = pool.acquire(&small_config());
        assert_eq!(pool.idle_len(), 0);
        drop(core);
    }

    #[test]
    fn released_cores_come_back_reset() {
        let pool = WriterPool::new();
        let mut core = pool.acquire(&small_config());
        core.chunker.feed(b"abc");
        core.refs.push(ChunkRef {
            hash: cask_types::ChunkHash::from_bytes(b"x"),
            len: 1,
        });
        core.poisoned = true;
        pool.release(core);

        let core = pool.acquire(&small_config());
        assert!(core.chunker.remaining().is_empty());
        assert!(core.refs.is_empty());
        assert!(core.batch.is_empty());
        assert!(!core.poisoned);
    }

    #[test]
    fn concurrent_acquire_release() {
        use std::sync::Arc;
        use std::thread;

        let pool = Arc::new(WriterPool::new());
        let config = small_config();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let config = config.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let core = pool.acquire(&config);
                        pool.release(core);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert!(pool.idle_len() >= 1);
        assert!(pool.idle_len() <= 8);
    }
}
