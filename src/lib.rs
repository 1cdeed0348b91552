//! Chunkroot: Content Fingerprints for Byte Streams
//!
//! Splits a byte stream into fixed-size chunks, hashes each chunk with BLAKE3,
//! and reduces the ordered chunk digests to a single Merkle root.
//!
//! ```no_run
//! use chunkroot::{fingerprint, DEFAULT_CHUNK_SIZE};
//!
//! let file = std::fs::File::open("disk.img")?;
//! let fp = fingerprint(file, DEFAULT_CHUNK_SIZE)?;
//! println!("{} ({} chunks)", fp.root, fp.leaf_count);
//! # Ok::<(), chunkroot::MerkleError>(())
//! ```

pub mod api;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod tree;

pub use api::{fingerprint, fingerprint_async, fingerprint_file, fingerprint_leaves, Fingerprint};
pub use chunk::{
    collect_leaves, hash_chunks, hash_chunks_async, ChunkHasher, DEFAULT_CHUNK_SIZE, FOUR_MIB,
    ONE_MIB,
};
pub use digest::{hash_leaf, hash_parent, Digest};
pub use error::{MerkleError, Result};
pub use tree::{build_root, build_root_hex, MerkleTree};
