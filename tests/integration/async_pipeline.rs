//! Async chunk hashing and fingerprinting over tokio sources

use chunkroot::{collect_leaves, fingerprint, fingerprint_async, hash_chunks_async, Digest, MerkleError};
use futures::TryStreamExt;
use std::io::Cursor;
use tempfile::TempDir;

#[tokio::test]
async fn test_async_file_fingerprint_matches_blocking() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.bin");
    let data: Vec<u8> = (0..20_000u32).map(|i| (i * 13 % 256) as u8).collect();
    tokio::fs::write(&path, &data).await.unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let async_fp = fingerprint_async(file, 4096).await.unwrap();
    let blocking_fp = fingerprint(Cursor::new(data), 4096).unwrap();

    assert_eq!(async_fp, blocking_fp);
    assert_eq!(async_fp.leaf_count, 5);
}

#[tokio::test]
async fn test_async_leaves_match_blocking_leaves() {
    let data = vec![42u8; 1000];
    let leaves: Vec<Digest> = hash_chunks_async(&data[..], 300)
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(leaves, collect_leaves(Cursor::new(data), 300).unwrap());
}

#[tokio::test]
async fn test_async_empty_source_has_no_root() {
    let result = fingerprint_async(&b""[..], 64).await;
    assert!(matches!(result, Err(MerkleError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_independent_invocations_run_concurrently() {
    let a = vec![1u8; 3000];
    let b = vec![2u8; 3000];

    let (fa, fb) = tokio::join!(fingerprint_async(&a[..], 512), fingerprint_async(&b[..], 512));
    assert_eq!(fa.unwrap(), fingerprint(Cursor::new(a.clone()), 512).unwrap());
    assert_eq!(fb.unwrap(), fingerprint(Cursor::new(b.clone()), 512).unwrap());
}
