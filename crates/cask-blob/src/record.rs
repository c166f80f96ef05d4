use bytes::Bytes;
use serde::{Deserialize, Serialize};

use cask_types::ChunkHash;

use crate::error::{BlobError, BlobResult};

/// Reference to one stored chunk: its content digest and byte length.
///
/// The length is redundant with the stored chunk's own size but is recorded
/// for validation and to keep the format open for variable-length chunking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRef {
    pub hash: ChunkHash,
    pub len: u32,
}

/// File index record: the file-space value describing one logical file.
///
/// On-wire layout (little-endian):
///
/// ```text
/// [4 bytes: chunk count (u32)]
/// count == 0: [N bytes: file content verbatim]
/// count  > 0: count repetitions of [4 bytes: chunk length (u32)]
///                                  [20 bytes: chunk digest]
/// ```
///
/// A record is in exactly one of the two states; the leading count field is
/// the discriminant. Reconstruction reads each referenced chunk from the
/// chunk space in listed order and concatenates the first `len` bytes of
/// each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileRecord {
    /// The whole file embedded verbatim (it never completed a chunk).
    Inline(Bytes),
    /// Ordered chunk references whose concatenation reconstructs the file.
    Chunks(Vec<ChunkRef>),
}

const COUNT_SIZE: usize = 4;
const ENTRY_SIZE: usize = 4 + ChunkHash::LEN;

impl FileRecord {
    /// Encode to the on-wire layout.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            FileRecord::Inline(payload) => {
                let mut buf = Vec::with_capacity(COUNT_SIZE + payload.len());
                buf.extend_from_slice(&0u32.to_le_bytes());
                buf.extend_from_slice(payload);
                buf
            }
            FileRecord::Chunks(refs) => {
                let mut buf = Vec::with_capacity(COUNT_SIZE + refs.len() * ENTRY_SIZE);
                buf.extend_from_slice(&(refs.len() as u32).to_le_bytes());
                for chunk in refs {
                    buf.extend_from_slice(&chunk.len.to_le_bytes());
                    buf.extend_from_slice(chunk.hash.as_bytes());
                }
                buf
            }
        }
    }

    /// Decode from the on-wire layout.
    ///
    /// Rejects a buffer too short for the count field, and a chunk-list
    /// buffer whose length differs from the exact size the count implies.
    pub fn decode(data: &[u8]) -> BlobResult<Self> {
        if data.len() < COUNT_SIZE {
            return Err(BlobError::CorruptRecord(format!(
                "{} bytes is too short for the chunk-count field",
                data.len()
            )));
        }
        let count = u32::from_le_bytes(data[..COUNT_SIZE].try_into().unwrap()) as usize;
        let body = &data[COUNT_SIZE..];

        if count == 0 {
            return Ok(FileRecord::Inline(Bytes::copy_from_slice(body)));
        }

        let expected = count * ENTRY_SIZE;
        if body.len() != expected {
            return Err(BlobError::CorruptRecord(format!(
                "chunk count {count} implies {expected} bytes of entries, got {}",
                body.len()
            )));
        }

        let mut refs = Vec::with_capacity(count);
        for entry in body.chunks_exact(ENTRY_SIZE) {
            let len = u32::from_le_bytes(entry[..4].try_into().unwrap());
            let mut digest = [0u8; ChunkHash::LEN];
            digest.copy_from_slice(&entry[4..]);
            refs.push(ChunkRef {
                hash: ChunkHash::from_digest(digest),
                len,
            });
        }
        Ok(FileRecord::Chunks(refs))
    }

    /// Total byte length of the file this record describes.
    pub fn file_len(&self) -> u64 {
        match self {
            FileRecord::Inline(payload) => payload.len() as u64,
            FileRecord::Chunks(refs) => refs.iter().map(|r| u64::from(r.len)).sum(),
        }
    }

    /// Number of chunk references (zero for an inline record).
    pub fn chunk_count(&self) -> usize {
        match self {
            FileRecord::Inline(_) => 0,
            FileRecord::Chunks(refs) => refs.len(),
        }
    }

    /// Returns `true` if the file content is embedded in the record.
    pub fn is_inline(&self) -> bool {
        matches!(self, FileRecord::Inline(_))
    }
}
