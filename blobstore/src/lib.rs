// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The outbound interfaces of the asset server: access to a Content
//! Addressable Storage, an Action Cache, a remote execution service, and an
//! authorization policy. The server core is written purely against these
//! traits; gRPC-backed implementations live with the embedding binary and
//! in-process implementations live in `mock`.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use hashing::Digest;
use prost::Message;
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use remexec::{ActionResult, ExecuteRequest};
use protos::gen::google::longrunning::Operation;
use tonic::Status;

mod instance_name;
pub use instance_name::InstanceName;


/// Content-addressed access to bulk bytes, in the shape of the REAPI
/// ContentAddressableStorage: a `get` for a digest the caller knows, and a
/// `put` whose payload must match the digest it is stored under.
#[async_trait]
pub trait BlobAccess: Send + Sync + 'static {
    /// Load the blob stored for `digest`, or `NotFound`.
    async fn get(&self, instance_name: &str, digest: Digest) -> Result<Bytes, Status>;

    /// Store `data` under `digest`. Content-addressed backends reject
    /// payloads which do not match the digest; reference-keyed backends (the
    /// asset store schema) store the payload verbatim.
    async fn put(&self, instance_name: &str, digest: Digest, data: Bytes) -> Result<(), Status>;
}

/// A keyed store of `Action` digest to `ActionResult`, per the REAPI
/// ActionCache service.
#[async_trait]
pub trait ActionCache: Send + Sync + 'static {
    /// Load the `ActionResult` stored for `action_digest`, or `NotFound`.
    async fn get_action_result(
        &self,
        instance_name: &str,
        action_digest: Digest,
    ) -> Result<ActionResult, Status>;

    async fn update_action_result(
        &self,
        instance_name: &str,
        action_digest: Digest,
        action_result: ActionResult,
    ) -> Result<(), Status>;
}

/// The stream of progress updates returned by an Execute call. The terminal
/// element has `done == true` and carries an `ExecuteResponse`.
pub type OperationStream = BoxStream<'static, Result<Operation, Status>>;

/// A client for the REAPI Execution service.
#[async_trait]
pub trait ExecutionClient: Send + Sync + 'static {
    async fn execute(&self, request: ExecuteRequest) -> Result<OperationStream, Status>;
}

/// A per-instance-name permission check. Implementations are shared across
/// requests and must be pure.
#[async_trait]
pub trait Authorizer: Send + Sync + 'static {
    async fn authorize(&self, instance_name: &str) -> Result<(), Status>;
}

/// An `Authorizer` that always gives the same answer.
pub struct StaticAuthorizer {
    allow: bool,
}

impl StaticAuthorizer {
    pub fn new(allow: bool) -> StaticAuthorizer {
        StaticAuthorizer { allow }
    }
}

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn authorize(&self, instance_name: &str) -> Result<(), Status> {
        if self.allow {
            Ok(())
        } else {
            Err(Status::permission_denied(format!(
                "Permission denied for instance name {instance_name:?}"
            )))
        }
    }
}

/// Load a proto message from the CAS, bounding the amount of data that will
/// be buffered and decoded.
pub async fn get_message<M: Message + Default>(
    blob_access: &dyn BlobAccess,
    instance_name: &str,
    digest: Digest,
    maximum_message_size_bytes: usize,
) -> Result<M, Status> {
    if digest.size_bytes > maximum_message_size_bytes {
        return Err(Status::invalid_argument(format!(
            "Message is {} bytes in size, while a maximum of {} bytes is permitted",
            digest.size_bytes, maximum_message_size_bytes
        )));
    }
    let data = blob_access.get(instance_name, digest).await?;
    M::decode(data).map_err(|err| {
        Status::invalid_argument(format!("Failed to unmarshal message: {err}"))
    })
}
