use bytes::{Bytes, BytesMut};

use crate::traits::BoundarySource;

/// Fixed-size chunker: a boundary every `chunk_size` bytes.
///
/// Boundary placement never looks at content, only at position. The final
/// partial chunk, if any, stays in the accumulation buffer and is exposed
/// through [`BoundarySource::remaining`].
pub struct FixedChunker {
    chunk_size: usize,
    buf: BytesMut,
}

impl FixedChunker {
    /// Create a chunker emitting a boundary every `chunk_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            chunk_size,
            buf: BytesMut::with_capacity(chunk_size),
        }
    }

    /// The configured chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl BoundarySource for FixedChunker {
    fn feed(&mut self, mut data: &[u8]) -> Vec<Bytes> {
        let mut complete = Vec::new();
        while !data.is_empty() {
            let take = (self.chunk_size - self.buf.len()).min(data.len());
            self.buf.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.buf.len() == self.chunk_size {
                complete.push(self.buf.split().freeze());
            }
        }
        complete
    }

    fn remaining(&self) -> &[u8] {
        &self.buf
    }

    fn reset(&mut self) {
        self.buf.clear();
    }
}

impl std::fmt::Debug for FixedChunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedChunker")
            .field("chunk_size", &self.chunk_size)
            .field("buffered", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_feed_emits_nothing() {
        let mut chunker = FixedChunker::new(8);
        assert!(chunker.feed(b"abc").is_empty());
        assert_eq!(chunker.remaining(), b"abc");
    }

    #[test]
    fn exact_chunk_emits_one_with_empty_remainder() {
        let mut chunker = FixedChunker::new(4);
        let chunks = chunker.feed(b"abcd");
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0][..], b"abcd");
        assert!(chunker.remaining().is_empty());
    }

    #[test]
    fn one_feed_can_emit_many_chunks() {
        let mut chunker = FixedChunker::new(4);
        let chunks = chunker.feed(b"abcdefghij");
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0][..], b"abcd");
        assert_eq!(&chunks[1][..], b"efgh");
        assert_eq!(chunker.remaining(), b"ij");
    }

    #[test]
    fn chunk_completes_across_feed_calls() {
        let mut chunker = FixedChunker::new(4);
        assert!(chunker.feed(b"ab").is_empty());
        let chunks = chunker.feed(b"cdef");
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0][..], b"abcd");
        assert_eq!(chunker.remaining(), b"ef");
    }

    #[test]
    fn boundaries_are_split_invariant() {
        let data: Vec<u8> = (0u8..=255).cycle().take(1000).collect();

        let mut whole = FixedChunker::new(64);
        let mut whole_chunks = whole.feed(&data);

        let mut pieces = FixedChunker::new(64);
        let mut piece_chunks = Vec::new();
        for part in data.chunks(7) {
            piece_chunks.extend(pieces.feed(part));
        }

        assert_eq!(whole_chunks.len(), piece_chunks.len());
        for (a, b) in whole_chunks.drain(..).zip(piece_chunks) {
            assert_eq!(a, b);
        }
        assert_eq!(whole.remaining(), pieces.remaining());
    }

    #[test]
    fn concatenation_reproduces_input() {
        let data: Vec<u8> = (0u8..200).collect();
        let mut chunker = FixedChunker::new(33);
        let chunks = chunker.feed(&data);

        let mut rebuilt = Vec::new();
        for chunk in &chunks {
            rebuilt.extend_from_slice(chunk);
        }
        rebuilt.extend_from_slice(chunker.remaining());
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn reset_discards_accumulation() {
        let mut chunker = FixedChunker::new(8);
        chunker.feed(b"abc");
        chunker.reset();
        assert!(chunker.remaining().is_empty());
        let chunks = chunker.feed(b"12345678");
        assert_eq!(&chunks[0][..], b"12345678");
    }

    #[test]
    #[should_panic(expected = "chunk size must be non-zero")]
    fn zero_chunk_size_is_rejected() {
        FixedChunker::new(0);
    }
}
