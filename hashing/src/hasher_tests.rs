// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::io::Write;

use crate::{DigestFunction, Hasher, WriterHasher};

#[test]
fn incremental_matches_oneshot() {
    let content = vec![0x5a_u8; 5000];
    for function in [
        DigestFunction::Sha256,
        DigestFunction::Sha1,
        DigestFunction::Md5,
        DigestFunction::Sha384,
        DigestFunction::Sha512,
        DigestFunction::Sha256Tree,
    ] {
        let mut hasher = Hasher::new(function);
        for chunk in content.chunks(7) {
            hasher.update(chunk);
        }
        assert_eq!(hasher.finish(), function.digest(&content), "{function}");
    }
}

#[test]
fn writer_hasher_digests_while_writing() {
    let mut buf = Vec::new();
    let mut hasher = WriterHasher::new(DigestFunction::Sha256, &mut buf);
    hasher.write_all(b"Hel").unwrap();
    hasher.write_all(b"lo").unwrap();
    let (digest, _) = hasher.finish();
    assert_eq!(digest, crate::Digest::of_bytes(b"Hello"));
    assert_eq!(buf, b"Hello");
}

#[test]
fn sha256tree_single_chunk_is_chunk_hash() {
    // Content of at most one chunk hashes like plain SHA-256.
    let content = vec![0x42_u8; 1024];
    assert_eq!(
        DigestFunction::Sha256Tree.digest(&content).hash,
        DigestFunction::Sha256.digest(&content).hash
    );
}

#[test]
fn sha256tree_multi_chunk_differs_from_sha256() {
    let content = vec![0x42_u8; 1025];
    assert_ne!(
        DigestFunction::Sha256Tree.digest(&content).hash,
        DigestFunction::Sha256.digest(&content).hash
    );
    assert_eq!(DigestFunction::Sha256Tree.digest(&content).size_bytes, 1025);
}
