//! Fingerprint API
//!
//! Runs the two-stage pipeline: chunk hashing produces the full ordered leaf
//! sequence, then tree reduction turns it into one root. The stages never
//! interleave.

use crate::chunk::{collect_leaves, hash_chunks_async};
use crate::digest::Digest;
use crate::error::MerkleError;
use crate::tree::build_root;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tokio::io::AsyncRead;
use tracing::{info, instrument};

/// Content fingerprint of a byte source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Merkle root over the chunk digests
    pub root: Digest,
    /// Number of chunks (leaves) the source was split into
    pub leaf_count: usize,
    /// Chunk size in bytes used to split the source
    pub chunk_size: usize,
}

/// Fingerprint of a fully collected leaf sequence
///
/// Fails with `InvalidArgument` for an empty sequence: an empty source has
/// leaves (none) but no root.
pub fn fingerprint_leaves(leaves: &[Digest], chunk_size: usize) -> Result<Fingerprint, MerkleError> {
    let root = build_root(leaves)?;
    Ok(Fingerprint {
        root,
        leaf_count: leaves.len(),
        chunk_size,
    })
}

/// Fingerprint a blocking byte source
pub fn fingerprint<R: Read>(reader: R, chunk_size: usize) -> Result<Fingerprint, MerkleError> {
    let start = Instant::now();
    let leaves = collect_leaves(reader, chunk_size)?;
    let fingerprint = fingerprint_leaves(&leaves, chunk_size)?;
    info!(
        root = %fingerprint.root,
        leaves = fingerprint.leaf_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Fingerprint computed"
    );
    Ok(fingerprint)
}

/// Fingerprint a file on disk
///
/// A file that cannot be opened surfaces as `SourceUnavailable`.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn fingerprint_file<P: AsRef<Path>>(
    path: P,
    chunk_size: usize,
) -> Result<Fingerprint, MerkleError> {
    let file = File::open(path.as_ref())?;
    fingerprint(file, chunk_size)
}

/// Fingerprint an async byte source
pub async fn fingerprint_async<R>(reader: R, chunk_size: usize) -> Result<Fingerprint, MerkleError>
where
    R: AsyncRead + Unpin,
{
    let start = Instant::now();
    let leaves: Vec<Digest> = hash_chunks_async(reader, chunk_size)?.try_collect().await?;
    let fingerprint = fingerprint_leaves(&leaves, chunk_size)?;
    info!(
        root = %fingerprint.root,
        leaves = fingerprint.leaf_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Fingerprint computed"
    );
    Ok(fingerprint)
}
