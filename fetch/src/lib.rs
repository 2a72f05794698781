// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The fetch side of the Remote Asset API: a `Fetcher` capability trait with
//! interchangeable source backends (HTTP, remote execution, error) and a
//! linear decorator stack (authorization, metrics, logging, validation,
//! caching) assembled around one of them.

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use qualifier::QualifierSet;
use tonic::Status;

mod auth_headers;
pub use auth_headers::AuthHeaders;
mod authorizing_fetcher;
pub use authorizing_fetcher::AuthorizingFetcher;
mod caching_fetcher;
pub use caching_fetcher::CachingFetcher;
mod error_fetcher;
pub use error_fetcher::ErrorFetcher;
mod http_fetcher;
pub use http_fetcher::HttpFetcher;
mod logging_fetcher;
pub use logging_fetcher::LoggingFetcher;
mod metrics_fetcher;
pub use metrics_fetcher::MetricsFetcher;
mod remote_execution_fetcher;
pub use remote_execution_fetcher::RemoteExecutionFetcher;
mod sri;
pub use sri::Checksum;
mod validating_fetcher;
pub use validating_fetcher::ValidatingFetcher;

#[cfg(test)]
mod authorizing_fetcher_tests;
#[cfg(test)]
mod remote_execution_fetcher_tests;
#[cfg(test)]
mod validating_fetcher_tests;

/// An abstraction around a Remote Asset API Fetch server, extended with a
/// supported-qualifier check so that validation can reject requests a
/// backend cannot honor.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// The same as a Remote Asset API FetchBlob request.
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status>;

    /// The same as a Remote Asset API FetchDirectory request.
    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status>;

    /// Check for unsupported qualifiers, returning the subset of
    /// `qualifiers` this fetcher cannot honor.
    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet;
}
