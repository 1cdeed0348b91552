//! Chunk hashing over files and in-memory sources

use chunkroot::{collect_leaves, hash_chunks, hash_leaf, MerkleError};
use std::fs;
use std::io::{BufReader, Cursor};
use tempfile::TempDir;

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + i / 7) as u8).collect()
}

#[test]
fn test_chunk_count_is_ceiling() {
    let chunk_size = 100;
    for len in [1, 99, 100, 101, 250, 1000] {
        let leaves = collect_leaves(Cursor::new(patterned(len)), chunk_size).unwrap();
        assert_eq!(leaves.len(), len.div_ceil(chunk_size), "len {}", len);
    }
}

#[test]
fn test_file_source_matches_memory_source() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blob.bin");
    let data = patterned(10_000);
    fs::write(&path, &data).unwrap();

    let from_file = collect_leaves(fs::File::open(&path).unwrap(), 4096).unwrap();
    let from_memory = collect_leaves(Cursor::new(data), 4096).unwrap();
    assert_eq!(from_file, from_memory);
    assert_eq!(from_file.len(), 3);
}

#[test]
fn test_buffered_reader_does_not_shift_boundaries() {
    let data = patterned(5000);
    let direct = collect_leaves(Cursor::new(data.clone()), 1024).unwrap();

    // A BufReader with a capacity that does not divide the chunk size
    let buffered = BufReader::with_capacity(700, Cursor::new(data));
    assert_eq!(collect_leaves(buffered, 1024).unwrap(), direct);
}

#[test]
fn test_each_leaf_covers_exact_window() {
    let data = patterned(300);
    let leaves = collect_leaves(Cursor::new(data.clone()), 128).unwrap();

    let expected: Vec<_> = data.chunks(128).map(hash_leaf).collect();
    assert_eq!(leaves, expected);
}

#[test]
fn test_empty_file_yields_no_leaves() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.bin");
    fs::write(&path, b"").unwrap();

    let leaves = collect_leaves(fs::File::open(&path).unwrap(), 16).unwrap();
    assert!(leaves.is_empty());
}

#[test]
fn test_iterator_is_lazy() {
    let mut chunks = hash_chunks(Cursor::new(patterned(1000)), 100).unwrap();
    assert_eq!(chunks.bytes_consumed(), 0);

    chunks.next().unwrap().unwrap();
    assert_eq!(chunks.bytes_consumed(), 100);
}

#[test]
fn test_zero_chunk_size() {
    assert!(matches!(
        collect_leaves(Cursor::new(b"data".to_vec()), 0),
        Err(MerkleError::InvalidArgument(_))
    ));
}
