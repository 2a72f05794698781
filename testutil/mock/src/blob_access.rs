// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use blobstore::BlobAccess;
use bytes::Bytes;
use hashing::{Digest, DigestFunction, Fingerprint};
use parking_lot::Mutex;
use tonic::Status;

/// An in-memory `BlobAccess`.
///
/// In the default, content-addressed mode every `put` is verified against the
/// digest it is stored under, like a real CAS would. The keyed mode skips
/// content verification and is used where the store holds protos under
/// reference digests (the blob-access asset store schema).
pub struct InMemoryBlobAccess {
    blobs: Mutex<HashMap<(String, Fingerprint), Bytes>>,
    verify_writes: bool,
    pub always_errors: AtomicBool,
    pub get_count: AtomicUsize,
    pub put_count: AtomicUsize,
}

impl InMemoryBlobAccess {
    /// A content-addressed store: writes must match their digest.
    pub fn new() -> InMemoryBlobAccess {
        InMemoryBlobAccess {
            blobs: Mutex::new(HashMap::new()),
            verify_writes: true,
            always_errors: AtomicBool::new(false),
            get_count: AtomicUsize::new(0),
            put_count: AtomicUsize::new(0),
        }
    }

    /// A reference-keyed store: writes are stored verbatim.
    pub fn new_keyed() -> InMemoryBlobAccess {
        InMemoryBlobAccess {
            verify_writes: false,
            ..InMemoryBlobAccess::new()
        }
    }

    /// Seed a blob without going through `put` (and without verification).
    pub fn insert(&self, instance_name: &str, digest: Digest, data: Bytes) {
        self.blobs
            .lock()
            .insert((instance_name.to_owned(), digest.hash), data);
    }

    pub fn contains(&self, instance_name: &str, digest: Digest) -> bool {
        self.blobs
            .lock()
            .contains_key(&(instance_name.to_owned(), digest.hash))
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.lock().len()
    }

    fn check_content(digest: Digest, data: &Bytes) -> Result<(), Status> {
        if digest.size_bytes != data.len() {
            return Err(Status::invalid_argument(format!(
                "Blob is {} bytes in size, while {} bytes were expected",
                data.len(),
                digest.size_bytes
            )));
        }
        let function = DigestFunction::from_hash_length(digest.hash.len());
        let matches = match function {
            Some(function) => {
                function.digest(data) == digest
                    || (function == DigestFunction::Sha256
                        && DigestFunction::Sha256Tree.digest(data) == digest)
            }
            None => false,
        };
        if matches {
            Ok(())
        } else {
            Err(Status::invalid_argument(format!(
                "Blob contents do not match digest {digest:?}"
            )))
        }
    }
}

#[async_trait]
impl BlobAccess for InMemoryBlobAccess {
    async fn get(&self, instance_name: &str, digest: Digest) -> Result<Bytes, Status> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        if self.always_errors.load(Ordering::SeqCst) {
            return Err(Status::unavailable("unavailable"));
        }
        self.blobs
            .lock()
            .get(&(instance_name.to_owned(), digest.hash))
            .cloned()
            .ok_or_else(|| Status::not_found(format!("Blob {digest:?} does not exist")))
    }

    async fn put(&self, instance_name: &str, digest: Digest, data: Bytes) -> Result<(), Status> {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        if self.always_errors.load(Ordering::SeqCst) {
            return Err(Status::unavailable("unavailable"));
        }
        if self.verify_writes {
            Self::check_content(digest, &data)?;
        }
        self.blobs
            .lock()
            .insert((instance_name.to_owned(), digest.hash), data);
        Ok(())
    }
}
