//! Cooperative chunk hasher over `tokio::io::AsyncRead`
//!
//! Suspends only while awaiting the next read; bytes are hashed as they
//! arrive and the digest is finalized once its window is full.

use crate::chunk::{read_buffer_len, validate_chunk_size};
use crate::digest::Digest;
use crate::error::MerkleError;
use blake3::Hasher;
use futures::stream::{self, Stream};
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

struct ChunkState<R> {
    reader: R,
    chunk_size: usize,
    buffer: Vec<u8>,
    index: u64,
    finished: bool,
}

/// Stream the leaf digests of `reader` in windows of `chunk_size` bytes
///
/// Same boundary semantics as [`crate::chunk::hash_chunks`]. The stream ends
/// after the first error.
pub fn hash_chunks_async<R>(
    reader: R,
    chunk_size: usize,
) -> Result<impl Stream<Item = Result<Digest, MerkleError>>, MerkleError>
where
    R: AsyncRead + Unpin,
{
    let chunk_size = validate_chunk_size(chunk_size)?;
    let state = ChunkState {
        reader,
        chunk_size,
        buffer: vec![0u8; read_buffer_len(chunk_size)],
        index: 0,
        finished: false,
    };

    Ok(stream::try_unfold(state, |mut state| async move {
        if state.finished {
            return Ok::<_, MerkleError>(None);
        }

        let mut hasher = Hasher::new();
        let filled = hash_window(&mut state, &mut hasher).await?;
        if filled < state.chunk_size {
            state.finished = true;
        }
        if filled == 0 {
            debug!(chunks = state.index, "Async chunk source exhausted");
            return Ok(None);
        }

        let digest: Digest = hasher.finalize().into();
        trace!(index = state.index, len = filled, digest = %digest, "Hashed chunk");
        state.index += 1;
        Ok(Some((digest, state)))
    }))
}

async fn hash_window<R>(state: &mut ChunkState<R>, hasher: &mut Hasher) -> Result<usize, MerkleError>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < state.chunk_size {
        let want = state.buffer.len().min(state.chunk_size - filled);
        match state.reader.read(&mut state.buffer[..want]).await {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&state.buffer[..n]);
                filled += n;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(MerkleError::SourceUnavailable(e)),
        }
    }
    Ok(filled)
}
