//! Merkle Tree Reduction
//!
//! Reduces an ordered sequence of leaf digests to a single root by repeated
//! pairwise hashing, duplicating the last node of any odd-length level.

pub mod builder;

pub use builder::{build_root, build_root_hex, reduce_level, MerkleTree};
