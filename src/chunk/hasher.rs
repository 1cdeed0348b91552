//! Blocking chunk hasher over `std::io::Read`

use crate::chunk::{read_buffer_len, validate_chunk_size};
use crate::digest::Digest;
use crate::error::MerkleError;
use blake3::Hasher;
use std::io::{ErrorKind, Read};
use tracing::{debug, trace};

/// Lazy sequence of leaf digests over a byte source
///
/// Each call to `next` feeds exactly one window of `chunk_size` bytes into an
/// incremental BLAKE3 hasher, using as many underlying reads as needed, so
/// chunk boundaries never depend on how the reader splits its output. Reads
/// go through one buffer of at most [`crate::chunk::READ_BLOCK_SIZE`] bytes
/// (never more than `chunk_size`), so memory does not grow with the chunk size.
/// The iterator is fused after the source ends or fails.
pub struct ChunkHasher<R> {
    reader: R,
    chunk_size: usize,
    buffer: Vec<u8>,
    chunks_emitted: u64,
    bytes_consumed: u64,
    finished: bool,
}

/// Start hashing `reader` in windows of `chunk_size` bytes
///
/// Fails immediately with `InvalidArgument` when `chunk_size` is zero.
/// Nothing is read until the returned iterator is polled.
pub fn hash_chunks<R: Read>(reader: R, chunk_size: usize) -> Result<ChunkHasher<R>, MerkleError> {
    let chunk_size = validate_chunk_size(chunk_size)?;
    Ok(ChunkHasher {
        reader,
        chunk_size,
        buffer: vec![0u8; read_buffer_len(chunk_size)],
        chunks_emitted: 0,
        bytes_consumed: 0,
        finished: false,
    })
}

/// Hash every chunk of `reader` and collect the ordered leaf sequence
pub fn collect_leaves<R: Read>(reader: R, chunk_size: usize) -> Result<Vec<Digest>, MerkleError> {
    hash_chunks(reader, chunk_size)?.collect()
}

impl<R> ChunkHasher<R> {
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of digests yielded so far
    pub fn chunks_emitted(&self) -> u64 {
        self.chunks_emitted
    }

    /// Number of source bytes hashed so far
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }
}

impl<R: Read> ChunkHasher<R> {
    /// Hash the next window until it is full or the source is exhausted
    fn hash_window(&mut self, hasher: &mut Hasher) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < self.chunk_size {
            let want = self.buffer.len().min(self.chunk_size - filled);
            match self.reader.read(&mut self.buffer[..want]) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&self.buffer[..n]);
                    filled += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for ChunkHasher<R> {
    type Item = Result<Digest, MerkleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut hasher = Hasher::new();
        let filled = match self.hash_window(&mut hasher) {
            Ok(n) => n,
            Err(e) => {
                self.finished = true;
                debug!(
                    chunks = self.chunks_emitted,
                    bytes = self.bytes_consumed,
                    error = %e,
                    "Chunk source read failed"
                );
                return Some(Err(MerkleError::SourceUnavailable(e)));
            }
        };

        // A short fill means the source hit EOF; no further reads are made.
        if filled < self.chunk_size {
            self.finished = true;
        }
        if filled == 0 {
            debug!(
                chunks = self.chunks_emitted,
                bytes = self.bytes_consumed,
                "Chunk source exhausted"
            );
            return None;
        }

        let digest: Digest = hasher.finalize().into();
        trace!(index = self.chunks_emitted, len = filled, digest = %digest, "Hashed chunk");
        self.chunks_emitted += 1;
        self.bytes_consumed += filled as u64;

        if self.finished {
            debug!(
                chunks = self.chunks_emitted,
                bytes = self.bytes_consumed,
                "Chunk source exhausted"
            );
        }
        Some(Ok(digest))
    }
}

impl<R: Read> std::iter::FusedIterator for ChunkHasher<R> {}
