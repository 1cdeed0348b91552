//! Property-based tests for chunking and reduction guarantees

use chunkroot::{build_root, collect_leaves, hash_leaf, Digest, MerkleTree};
use proptest::prelude::*;
use std::io::{self, Cursor, Read};

/// Reader that delivers its data in caller-chosen read sizes
struct SplitReader {
    data: Vec<u8>,
    pos: usize,
    steps: Vec<usize>,
    step_index: usize,
}

impl Read for SplitReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let step = self.steps[self.step_index % self.steps.len()];
        self.step_index += 1;
        let n = step.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn digests(max: usize) -> impl Strategy<Value = Vec<Digest>> {
    prop::collection::vec(any::<[u8; 32]>().prop_map(Digest::from), 1..max)
}

proptest! {
    #[test]
    fn chunk_count_is_ceiling_of_length(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        chunk_size in 1usize..512,
    ) {
        let leaves = collect_leaves(Cursor::new(data.clone()), chunk_size).unwrap();
        prop_assert_eq!(leaves.len(), data.len().div_ceil(chunk_size));
    }

    #[test]
    fn leaves_independent_of_read_pattern(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        chunk_size in 1usize..512,
        steps in prop::collection::vec(1usize..700, 1..8),
    ) {
        let expected: Vec<Digest> = data.chunks(chunk_size).map(hash_leaf).collect();
        let reader = SplitReader { data, pos: 0, steps, step_index: 0 };
        prop_assert_eq!(collect_leaves(reader, chunk_size).unwrap(), expected);
    }

    #[test]
    fn pipeline_is_deterministic(
        data in prop::collection::vec(any::<u8>(), 1..4096),
        chunk_size in 1usize..512,
    ) {
        let first = build_root(&collect_leaves(Cursor::new(data.clone()), chunk_size).unwrap()).unwrap();
        let second = build_root(&collect_leaves(Cursor::new(data), chunk_size).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn single_leaf_is_its_own_root(bytes in any::<[u8; 32]>()) {
        let leaf = Digest::from(bytes);
        prop_assert_eq!(build_root(&[leaf]).unwrap(), leaf);
    }

    #[test]
    fn root_is_canonical_hex_for_any_width(leaves in digests(70)) {
        let root = build_root(&leaves).unwrap();
        let hex = root.to_hex();
        prop_assert_eq!(hex.len(), 64);
        prop_assert!(hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        prop_assert_eq!(Digest::from_hex(&hex.to_uppercase()).unwrap(), root);
    }

    #[test]
    fn materialized_tree_agrees_with_root(leaves in digests(70)) {
        let tree = MerkleTree::build(&leaves).unwrap();
        prop_assert_eq!(tree.root(), build_root(&leaves).unwrap());
        prop_assert_eq!(tree.leaf_count(), leaves.len());
    }

    #[test]
    fn copy_yields_same_root(leaves in digests(40)) {
        let copy = leaves.clone();
        prop_assert_eq!(build_root(&leaves).unwrap(), build_root(&copy).unwrap());
    }
}
