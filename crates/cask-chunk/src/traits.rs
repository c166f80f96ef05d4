use bytes::Bytes;

/// Chunk boundary source.
///
/// Implementations accumulate fed bytes and carve them into complete
/// chunks. All implementations must satisfy these invariants:
/// - Boundary emission is deterministic for identical input: feeding the
///   same byte sequence, however it is split across `feed` calls, yields
///   the same chunks and the same final remainder.
/// - Chunks are emitted in input order and concatenating the emitted
///   chunks plus `remaining()` reproduces everything fed since the last
///   `reset`.
/// - `reset` discards all accumulation.
pub trait BoundarySource: Send {
    /// Append `data` to the internal accumulation and return the complete
    /// chunks carved out by this call, in order. May return zero, one, or
    /// many chunks depending on how much data is fed.
    fn feed(&mut self, data: &[u8]) -> Vec<Bytes>;

    /// Bytes accumulated but not yet forming a complete chunk.
    fn remaining(&self) -> &[u8];

    /// Discard all accumulation, retaining internal capacity where
    /// possible.
    fn reset(&mut self);
}
