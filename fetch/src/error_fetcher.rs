// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use async_trait::async_trait;
use grpc_util::status_from_proto;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use protos::gen::google::rpc;
use qualifier::QualifierSet;
use tonic::{Code, Status};

use crate::Fetcher;

/// A `Fetcher` that returns a preconfigured status for every call. Used for
/// servers with no fetch backend configured.
pub struct ErrorFetcher {
    status: rpc::Status,
}

impl ErrorFetcher {
    pub fn new(status: rpc::Status) -> ErrorFetcher {
        ErrorFetcher { status }
    }

    /// The fetcher used when no fetcher is configured at all.
    pub fn unconfigured() -> ErrorFetcher {
        ErrorFetcher::new(rpc::Status {
            code: Code::Unimplemented as i32,
            message: "Fetching is not configured for this server".to_owned(),
            ..rpc::Status::default()
        })
    }
}

#[async_trait]
impl Fetcher for ErrorFetcher {
    async fn fetch_blob(&self, _request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        Err(status_from_proto(&self.status))
    }

    async fn fetch_directory(
        &self,
        _request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        Err(status_from_proto(&self.status))
    }

    fn check_qualifiers(&self, _qualifiers: QualifierSet) -> QualifierSet {
        QualifierSet::new()
    }
}
