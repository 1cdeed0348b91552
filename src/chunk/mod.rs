//! Fixed-size chunk hashing
//!
//! Partitions a byte source into byte-exact windows of `chunk_size` bytes and
//! yields one leaf digest per window, in source order. The final window may be
//! shorter; an empty source yields no digests at all.

pub mod hasher;
pub mod stream;

pub use hasher::{collect_leaves, hash_chunks, ChunkHasher};
pub use stream::hash_chunks_async;

use crate::error::MerkleError;

/// One mebibyte
pub const ONE_MIB: usize = 1024 * 1024;

/// Four mebibytes
pub const FOUR_MIB: usize = 4 * ONE_MIB;

/// Chunk size used when the caller or configuration does not choose one
pub const DEFAULT_CHUNK_SIZE: usize = ONE_MIB;

/// Upper bound on the read buffer, whatever the chunk size
///
/// Windows larger than this are hashed incrementally across several reads.
pub const READ_BLOCK_SIZE: usize = 64 * 1024;

/// Read buffer length for a given chunk size: never larger than the chunk
pub(crate) fn read_buffer_len(chunk_size: usize) -> usize {
    chunk_size.min(READ_BLOCK_SIZE)
}

/// Reject chunk sizes that cannot partition a stream
pub fn validate_chunk_size(chunk_size: usize) -> Result<usize, MerkleError> {
    if chunk_size == 0 {
        return Err(MerkleError::InvalidArgument(
            "chunk size must be a positive number of bytes".to_string(),
        ));
    }
    Ok(chunk_size)
}
