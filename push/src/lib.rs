// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The push side of the Remote Asset API: clients push authoritative
//! (URIs, qualifiers) → digest bindings, which are written through the
//! `AssetStore`. Like the fetch side, the server is a linear decorator stack
//! over the store-backed terminal.

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse,
};
use tonic::Status;

mod asset_push_server;
pub use asset_push_server::AssetPushServer;
mod error_push_server;
pub use error_push_server::ErrorPushServer;
mod logging_pusher;
pub use logging_pusher::LoggingPusher;
mod metrics_push_server;
pub use metrics_push_server::MetricsPushServer;
mod validating_pusher;
pub use validating_pusher::ValidatingPusher;

#[cfg(test)]
mod asset_push_server_tests;

/// An abstraction around a Remote Asset API Push server.
#[async_trait]
pub trait PushServer: Send + Sync + 'static {
    /// The same as a Remote Asset API PushBlob request.
    async fn push_blob(&self, request: PushBlobRequest) -> Result<PushBlobResponse, Status>;

    /// The same as a Remote Asset API PushDirectory request.
    async fn push_directory(
        &self,
        request: PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, Status>;
}
