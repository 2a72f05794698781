// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use qualifier::QualifierSet;
use tonic::{Code, Status};

use crate::Fetcher;

/// A `Fetcher` decorator that logs every request and its outcome. It never
/// alters what the wrapped fetcher returns.
pub struct LoggingFetcher {
    fetcher: Arc<dyn Fetcher>,
}

impl LoggingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> LoggingFetcher {
        LoggingFetcher { fetcher }
    }
}

fn response_code(status: &Option<protos::gen::google::rpc::Status>) -> Code {
    status
        .as_ref()
        .map(|s| Code::from(s.code))
        .unwrap_or(Code::Ok)
}

#[async_trait]
impl Fetcher for LoggingFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        log::info!(
            "Fetching blob {:?} with qualifiers {:?}",
            request.uris,
            request.qualifiers
        );
        let uris = request.uris.clone();
        let result = self.fetcher.fetch_blob(request).await;
        match &result {
            Ok(response) => log::info!(
                "FetchBlob completed for {:?} with status code {:?}",
                uris,
                response_code(&response.status)
            ),
            Err(err) => log::info!(
                "FetchBlob completed for {:?} with status code {:?}",
                uris,
                err.code()
            ),
        }
        result
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        log::info!(
            "Fetching directory {:?} with qualifiers {:?}",
            request.uris,
            request.qualifiers
        );
        let uris = request.uris.clone();
        let result = self.fetcher.fetch_directory(request).await;
        match &result {
            Ok(response) => log::info!(
                "FetchDirectory completed for {:?} with status code {:?}",
                uris,
                response_code(&response.status)
            ),
            Err(err) => log::info!(
                "FetchDirectory completed for {:?} with status code {:?}",
                uris,
                err.code()
            ),
        }
        result
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        self.fetcher.check_qualifiers(qualifiers)
    }
}
