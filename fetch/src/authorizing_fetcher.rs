// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use blobstore::{Authorizer, InstanceName};
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use qualifier::QualifierSet;
use tonic::Status;

use crate::Fetcher;

/// A `Fetcher` decorator that validates requests against an `Authorizer`
/// before forwarding them.
pub struct AuthorizingFetcher {
    fetcher: Arc<dyn Fetcher>,
    authorizer: Arc<dyn Authorizer>,
}

impl AuthorizingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, authorizer: Arc<dyn Authorizer>) -> AuthorizingFetcher {
        AuthorizingFetcher {
            fetcher,
            authorizer,
        }
    }
}

#[async_trait]
impl Fetcher for AuthorizingFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        let instance_name = InstanceName::new(&request.instance_name)?;
        self.authorizer.authorize(instance_name.as_str()).await?;
        self.fetcher.fetch_blob(request).await
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        let instance_name = InstanceName::new(&request.instance_name)?;
        self.authorizer.authorize(instance_name.as_str()).await?;
        self.fetcher.fetch_directory(request).await
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        self.fetcher.check_qualifiers(qualifiers)
    }
}
