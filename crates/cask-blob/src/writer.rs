use bytes::Bytes;
use cask_chunk::BoundarySource;
use cask_types::{ChunkHash, FileId};
use tracing::{debug, trace};

use crate::error::{BlobError, BlobResult};
use crate::pool::WriterCore;
use crate::record::{ChunkRef, FileRecord};
use crate::store::BlobStore;

/// In-progress write session for one logical file.
///
/// Created by [`BlobStore::create`] and exclusively owned by one caller.
/// Content is fed through [`write`](Self::write); [`close`](Self::close)
/// consumes the session and commits the file index record. Dropping a
/// session without closing it writes no record and recycles the internal
/// buffers.
pub struct FileWriter<'a> {
    store: &'a BlobStore,
    id: FileId,
    core: Option<WriterCore>,
}

impl<'a> FileWriter<'a> {
    pub(crate) fn new(store: &'a BlobStore, id: FileId, core: WriterCore) -> Self {
        Self {
            store,
            id,
            core: Some(core),
        }
    }

    /// The identifier this session writes to.
    pub fn id(&self) -> &FileId {
        &self.id
    }

    /// Feed more file content.
    ///
    /// Every chunk completed by this call is hashed, dedup-checked against
    /// the chunk space, and staged for batched storage; the pending batch
    /// is flushed whenever its staged bytes meet the configured threshold.
    /// An `Err` is fatal to the session: further calls return
    /// [`BlobError::SessionPoisoned`] and `close` will not write a record.
    pub fn write(&mut self, data: &[u8]) -> BlobResult<()> {
        let core = self.core.as_mut().expect("core present until close");
        if core.poisoned {
            return Err(BlobError::SessionPoisoned);
        }
        for chunk in core.chunker.feed(data) {
            if let Err(e) = Self::absorb(self.store, core, chunk) {
                core.poisoned = true;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Finish the file and commit its index record.
    ///
    /// A file that never completed a chunk boundary is embedded verbatim in
    /// an inline record. Otherwise the remainder, if any, becomes one final
    /// undersized chunk, the pending batch is force-flushed, and the
    /// chunk-list record is written. In both outcomes the file-space key is
    /// written only after every referenced chunk is confirmed pre-existing
    /// or flushed, so no partial record is ever visible; a failed close
    /// leaves any previous record for this identifier untouched.
    pub fn close(mut self) -> BlobResult<()> {
        let mut core = self.core.take().expect("core present until close");
        let result = Self::finish(self.store, &self.id, &mut core);
        self.store.pool().release(core);
        result
    }

    fn finish(store: &BlobStore, id: &FileId, core: &mut WriterCore) -> BlobResult<()> {
        if core.poisoned {
            return Err(BlobError::SessionPoisoned);
        }

        if core.refs.is_empty() {
            // The whole file fits below one chunk boundary: embed it and
            // skip chunk accounting entirely.
            let record = FileRecord::Inline(Bytes::copy_from_slice(core.chunker.remaining()));
            store.files().put(id.as_bytes(), &record.encode())?;
            debug!(id = %id, bytes = record.file_len(), "inline file record written");
            return Ok(());
        }

        let rest = Bytes::copy_from_slice(core.chunker.remaining());
        if !rest.is_empty() {
            Self::absorb(store, core, rest)?;
        }
        if !core.batch.is_empty() {
            core.batch.flush(store.chunks())?;
        }

        let record = FileRecord::Chunks(std::mem::take(&mut core.refs));
        store.files().put(id.as_bytes(), &record.encode())?;
        debug!(
            id = %id,
            chunks = record.chunk_count(),
            bytes = record.file_len(),
            "file record written"
        );
        Ok(())
    }

    /// Hash one completed chunk, dedup-check it, and record its reference
    /// in the session's ordered list.
    fn absorb(store: &BlobStore, core: &mut WriterCore, data: Bytes) -> BlobResult<()> {
        let hash = ChunkHash::from_bytes(&data);
        match store.chunks().get(hash.as_bytes())? {
            Some(existing) => {
                // The digest matches a stored chunk, so the bytes are not
                // re-stored. The lengths must agree: a mismatch means two
                // byte sequences share a digest, which a content-addressed
                // store cannot represent.
                if existing.len() != data.len() {
                    return Err(BlobError::HashCollision {
                        hash,
                        stored: existing.len(),
                        incoming: data.len(),
                    });
                }
                trace!(hash = %hash.short_hex(), len = data.len(), "chunk already stored");
            }
            None => {
                core.batch.stage(&hash, &data);
                trace!(hash = %hash.short_hex(), len = data.len(), "chunk staged");
                if core.batch.is_full() {
                    core.batch.flush(store.chunks())?;
                }
            }
        }
        core.refs.push(ChunkRef {
            hash,
            len: data.len() as u32,
        });
        Ok(())
    }
}

impl Drop for FileWriter<'_> {
    fn drop(&mut self) {
        if let Some(core) = self.core.take() {
            self.store.pool().release(core);
        }
    }
}
