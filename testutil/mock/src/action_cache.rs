// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use blobstore::ActionCache;
use hashing::{Digest, Fingerprint};
use parking_lot::Mutex;
use protos::gen::build::bazel::remote::execution::v2::ActionResult;
use tonic::Status;

/// An in-memory `ActionCache`, keyed by action digest.
pub struct InMemoryActionCache {
    pub action_map: Mutex<HashMap<(String, Fingerprint), ActionResult>>,
    pub always_errors: AtomicBool,
    pub get_count: AtomicUsize,
    pub put_count: AtomicUsize,
}

impl InMemoryActionCache {
    pub fn new() -> InMemoryActionCache {
        InMemoryActionCache {
            action_map: Mutex::new(HashMap::new()),
            always_errors: AtomicBool::new(false),
            get_count: AtomicUsize::new(0),
            put_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ActionCache for InMemoryActionCache {
    async fn get_action_result(
        &self,
        instance_name: &str,
        action_digest: Digest,
    ) -> Result<ActionResult, Status> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        if self.always_errors.load(Ordering::SeqCst) {
            return Err(Status::unavailable("unavailable"));
        }
        self.action_map
            .lock()
            .get(&(instance_name.to_owned(), action_digest.hash))
            .cloned()
            .ok_or_else(|| {
                Status::not_found(format!(
                    "ActionResult for Action {action_digest:?} does not exist"
                ))
            })
    }

    async fn update_action_result(
        &self,
        instance_name: &str,
        action_digest: Digest,
        action_result: ActionResult,
    ) -> Result<(), Status> {
        self.put_count.fetch_add(1, Ordering::SeqCst);
        if self.always_errors.load(Ordering::SeqCst) {
            return Err(Status::unavailable("unavailable"));
        }
        self.action_map
            .lock()
            .insert((instance_name.to_owned(), action_digest.hash), action_result);
        Ok(())
    }
}
