//! Merkle root reduction over an ordered leaf sequence

use crate::digest::{hash_parent, Digest};
use crate::error::MerkleError;
use tracing::{debug, instrument, trace};

/// Reduce one tree level to the next
///
/// Pairs elements left to right. When the level has an odd length the last
/// element is paired with itself. An empty level reduces to an empty level.
pub fn reduce_level(level: &[Digest]) -> Vec<Digest> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_parent(left, right),
            [last] => hash_parent(last, last),
            _ => unreachable!("chunks(2) yields one or two elements"),
        })
        .collect()
}

/// Compute the Merkle root of an ordered leaf sequence
///
/// A single leaf is its own root and is returned without hashing.
/// Pairing is strictly by position; leaves are never sorted.
#[instrument(skip(leaves), fields(leaf_count = leaves.len()))]
pub fn build_root(leaves: &[Digest]) -> Result<Digest, MerkleError> {
    let mut level = match leaves {
        [] => {
            return Err(MerkleError::InvalidArgument(
                "cannot build a Merkle root from an empty leaf sequence".to_string(),
            ))
        }
        [only] => return Ok(*only),
        _ => reduce_level(leaves),
    };

    let mut height = 1;
    while level.len() > 1 {
        trace!(height, width = level.len(), "Reducing level");
        level = reduce_level(&level);
        height += 1;
    }

    let root = level[0];
    debug!(height, root = %root, "Built Merkle root");
    Ok(root)
}

/// Compute the Merkle root of leaves given in textual form
///
/// Every element is normalized and validated before any hashing starts; one
/// malformed digest fails the whole call with a format error.
pub fn build_root_hex<S: AsRef<str>>(leaves: &[S]) -> Result<Digest, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::InvalidArgument(
            "cannot build a Merkle root from an empty leaf sequence".to_string(),
        ));
    }

    let parsed = leaves
        .iter()
        .enumerate()
        .map(|(index, leaf)| {
            Digest::from_hex(leaf.as_ref()).map_err(|e| match e {
                MerkleError::Format(msg) => MerkleError::Format(format!("leaf {}: {}", index, msg)),
                other => other,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    build_root(&parsed)
}

/// Fully materialized Merkle tree
///
/// Level 0 holds the leaves and the last level holds only the root.
/// Built for inspection; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build every level of the tree from `leaves`
    pub fn build(leaves: &[Digest]) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::InvalidArgument(
                "cannot build a Merkle tree from an empty leaf sequence".to_string(),
            ));
        }

        let mut levels = vec![leaves.to_vec()];
        loop {
            let top = &levels[levels.len() - 1];
            if top.len() <= 1 {
                break;
            }
            let next = reduce_level(top);
            levels.push(next);
        }
        Ok(Self { levels })
    }

    pub fn root(&self) -> Digest {
        // build() guarantees a non-empty final level
        self.levels[self.levels.len() - 1][0]
    }

    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of reduction steps from the leaves to the root
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }
}
