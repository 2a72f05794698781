// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse,
};
use tonic::Status;

use crate::PushServer;

/// A Push server decorator that validates requests before forwarding them.
pub struct ValidatingPusher {
    pusher: Arc<dyn PushServer>,
}

impl ValidatingPusher {
    pub fn new(pusher: Arc<dyn PushServer>) -> ValidatingPusher {
        ValidatingPusher { pusher }
    }
}

#[async_trait]
impl PushServer for ValidatingPusher {
    async fn push_blob(&self, request: PushBlobRequest) -> Result<PushBlobResponse, Status> {
        if request.uris.is_empty() {
            return Err(Status::invalid_argument(
                "PushBlob does not support requests without any URIs specified",
            ));
        }
        self.pusher.push_blob(request).await
    }

    async fn push_directory(
        &self,
        request: PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, Status> {
        if request.uris.is_empty() {
            return Err(Status::invalid_argument(
                "PushDirectory does not support requests without any URIs specified",
            ));
        }
        self.pusher.push_directory(request).await
    }
}
