// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use async_trait::async_trait;
use grpc_util::status_from_proto;
use protos::gen::build::bazel::remote::asset::v1::{
    PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse,
};
use protos::gen::google::rpc;
use tonic::{Code, Status};

use crate::PushServer;

/// A Push server that returns a preconfigured status for every call. Used
/// for servers whose push path is not configured.
pub struct ErrorPushServer {
    status: rpc::Status,
}

impl ErrorPushServer {
    pub fn new(status: rpc::Status) -> ErrorPushServer {
        ErrorPushServer { status }
    }

    /// The push server used when no asset cache is configured.
    pub fn unconfigured() -> ErrorPushServer {
        ErrorPushServer::new(rpc::Status {
            code: Code::FailedPrecondition as i32,
            message: "Pushing is not configured for this server, as it has no asset cache"
                .to_owned(),
            ..rpc::Status::default()
        })
    }
}

#[async_trait]
impl PushServer for ErrorPushServer {
    async fn push_blob(&self, _request: PushBlobRequest) -> Result<PushBlobResponse, Status> {
        Err(status_from_proto(&self.status))
    }

    async fn push_directory(
        &self,
        _request: PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, Status> {
        Err(status_from_proto(&self.status))
    }
}
