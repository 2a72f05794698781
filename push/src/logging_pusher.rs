// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse,
};
use tonic::Status;

use crate::PushServer;

/// A Push server decorator that logs every request and its outcome.
pub struct LoggingPusher {
    pusher: Arc<dyn PushServer>,
}

impl LoggingPusher {
    pub fn new(pusher: Arc<dyn PushServer>) -> LoggingPusher {
        LoggingPusher { pusher }
    }
}

#[async_trait]
impl PushServer for LoggingPusher {
    async fn push_blob(&self, request: PushBlobRequest) -> Result<PushBlobResponse, Status> {
        log::info!(
            "Pushing blob {:?} with qualifiers {:?} to be {:?}",
            request.uris,
            request.qualifiers,
            request.blob_digest
        );
        let uris = request.uris.clone();
        let result = self.pusher.push_blob(request).await;
        match &result {
            Ok(_) => log::info!("PushBlob completed for {uris:?} successfully"),
            Err(err) => log::info!(
                "PushBlob completed for {:?} with status code {:?}",
                uris,
                err.code()
            ),
        }
        result
    }

    async fn push_directory(
        &self,
        request: PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, Status> {
        log::info!(
            "Pushing directory {:?} with qualifiers {:?} to be {:?}",
            request.uris,
            request.qualifiers,
            request.root_directory_digest
        );
        let uris = request.uris.clone();
        let result = self.pusher.push_directory(request).await;
        match &result {
            Ok(_) => log::info!("PushDirectory completed for {uris:?} successfully"),
            Err(err) => log::info!(
                "PushDirectory completed for {:?} with status code {:?}",
                uris,
                err.code()
            ),
        }
        result
    }
}
