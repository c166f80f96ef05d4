use std::sync::Arc;

use bytes::Bytes;
use cask_kv::KvEngine;
use cask_types::{ChunkHash, FileId};

use crate::config::BlobConfig;
use crate::error::BlobResult;
use crate::pool::WriterPool;
use crate::record::FileRecord;
use crate::writer::FileWriter;

/// Content-addressed chunked blob store over two key spaces of an ordered
/// key-value engine.
///
/// The chunk space maps a chunk's 20-byte content digest to its raw bytes;
/// the file space maps a caller-supplied [`FileId`] to an encoded
/// [`FileRecord`]. Many write sessions may run concurrently through one
/// store: racing puts of the same chunk digest are benign because the bytes
/// under a digest are identical by construction. Concurrent sessions
/// writing the same *file identifier* are not coordinated here; callers
/// must serialize those externally if last-writer-wins is not acceptable.
pub struct BlobStore {
    chunks: Arc<dyn KvEngine>,
    files: Arc<dyn KvEngine>,
    config: BlobConfig,
    pool: WriterPool,
}

impl BlobStore {
    /// Create a store over the given chunk-space and file-space engines.
    pub fn new(chunks: Arc<dyn KvEngine>, files: Arc<dyn KvEngine>, config: BlobConfig) -> Self {
        Self {
            chunks,
            files,
            config,
            pool: WriterPool::new(),
        }
    }

    /// Open a write session for `id`.
    ///
    /// Storing a new file under an existing identifier overwrites the old
    /// record once the new session closes successfully.
    pub fn create(&self, id: impl Into<FileId>) -> FileWriter<'_> {
        let core = self.pool.acquire(&self.config);
        FileWriter::new(self, id.into(), core)
    }

    /// Fetch and decode the file index record for `id`, if present.
    pub fn file_record(&self, id: &FileId) -> BlobResult<Option<FileRecord>> {
        match self.files.get(id.as_bytes())? {
            Some(encoded) => Ok(Some(FileRecord::decode(&encoded)?)),
            None => Ok(None),
        }
    }

    /// Fetch one chunk's raw bytes by content digest, if present.
    pub fn chunk(&self, hash: &ChunkHash) -> BlobResult<Option<Bytes>> {
        Ok(self.chunks.get(hash.as_bytes())?.map(Bytes::from))
    }

    /// The store's configuration.
    pub fn config(&self) -> &BlobConfig {
        &self.config
    }

    pub(crate) fn chunks(&self) -> &dyn KvEngine {
        self.chunks.as_ref()
    }

    pub(crate) fn files(&self) -> &dyn KvEngine {
        self.files.as_ref()
    }

    pub(crate) fn pool(&self) -> &WriterPool {
        &self.pool
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("config", &self.config)
            .finish()
    }
}
