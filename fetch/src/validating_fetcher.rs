// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse, Qualifier,
};
use qualifier::QualifierSet;
use tonic::Status;

use crate::Fetcher;

/// A `Fetcher` decorator that rejects malformed requests before they reach
/// the wrapped fetcher: requests without URIs, and requests carrying
/// qualifiers the wrapped fetcher cannot honor.
pub struct ValidatingFetcher {
    fetcher: Arc<dyn Fetcher>,
}

impl ValidatingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> ValidatingFetcher {
        ValidatingFetcher { fetcher }
    }

    fn check_supported(&self, qualifiers: &[Qualifier]) -> Result<(), Status> {
        let unsupported = self
            .fetcher
            .check_qualifiers(QualifierSet::from_qualifiers(qualifiers));
        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(Status::invalid_argument(format!(
                "Unsupported qualifiers: {}",
                unsupported.sorted_names().join(", ")
            )))
        }
    }
}

#[async_trait]
impl Fetcher for ValidatingFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        if request.uris.is_empty() {
            return Err(Status::invalid_argument(
                "FetchBlob does not support requests without any URIs specified",
            ));
        }
        self.check_supported(&request.qualifiers)?;
        self.fetcher.fetch_blob(request).await
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        if request.uris.is_empty() {
            return Err(Status::invalid_argument(
                "FetchDirectory does not support requests without any URIs specified",
            ));
        }
        self.check_supported(&request.qualifiers)?;
        self.fetcher.fetch_directory(request).await
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        self.fetcher.check_qualifiers(qualifiers)
    }
}
