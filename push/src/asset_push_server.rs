// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use blobstore::InstanceName;
use hashing::DigestFunction;
use protos::gen::asset::Asset;
use protos::gen::build::bazel::remote::asset::v1::{
    PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse, Qualifier,
};
use protos::resolve_push_digest_function;
use storage::{AssetStore, new_asset_reference, new_blob_asset, new_directory_asset};
use tonic::Status;

use crate::PushServer;

/// The terminal Push server: writes bindings through an `AssetStore` for the
/// operator-whitelisted instances.
///
/// The binding is written for the full URI set and, when there is more than
/// one URI, additionally per URI, so that both point lookups and set lookups
/// resolve later.
pub struct AssetPushServer {
    asset_store: Arc<dyn AssetStore>,
    allow_updates_for_instances: HashSet<InstanceName>,
}

impl AssetPushServer {
    pub fn new(
        asset_store: Arc<dyn AssetStore>,
        allow_updates_for_instances: HashSet<InstanceName>,
    ) -> AssetPushServer {
        AssetPushServer {
            asset_store,
            allow_updates_for_instances,
        }
    }

    async fn put_bindings(
        &self,
        instance_name: &InstanceName,
        uris: &[String],
        qualifiers: &[Qualifier],
        asset: &Asset,
        digest_function: DigestFunction,
    ) -> Result<(), Status> {
        let reference = new_asset_reference(uris.to_vec(), qualifiers.to_vec());
        self.asset_store
            .put(instance_name.as_str(), &reference, asset, digest_function)
            .await?;
        if uris.len() > 1 {
            for uri in uris {
                let reference = new_asset_reference(vec![uri.clone()], qualifiers.to_vec());
                self.asset_store
                    .put(instance_name.as_str(), &reference, asset, digest_function)
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PushServer for AssetPushServer {
    async fn push_blob(&self, request: PushBlobRequest) -> Result<PushBlobResponse, Status> {
        if request.uris.is_empty() {
            return Err(Status::invalid_argument(
                "PushBlob requires at least one URI",
            ));
        }
        let digest_function =
            resolve_push_digest_function(request.digest_function, request.blob_digest.as_ref())
                .map_err(Status::invalid_argument)?;
        let instance_name = InstanceName::new(&request.instance_name)?;
        if !self.allow_updates_for_instances.contains(&instance_name) {
            return Err(Status::permission_denied(format!(
                "This service does not accept Blobs for instance {:?}",
                request.instance_name
            )));
        }
        let blob_digest = request
            .blob_digest
            .ok_or_else(|| Status::invalid_argument("PushBlob request has no blob digest"))?;

        let asset = new_blob_asset(blob_digest, request.expire_at);
        self.put_bindings(
            &instance_name,
            &request.uris,
            &request.qualifiers,
            &asset,
            digest_function,
        )
        .await?;
        Ok(PushBlobResponse::default())
    }

    async fn push_directory(
        &self,
        request: PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, Status> {
        if request.uris.is_empty() {
            return Err(Status::invalid_argument(
                "PushDirectory requires at least one URI",
            ));
        }
        let digest_function = resolve_push_digest_function(
            request.digest_function,
            request.root_directory_digest.as_ref(),
        )
        .map_err(Status::invalid_argument)?;
        let instance_name = InstanceName::new(&request.instance_name)?;
        if !self.allow_updates_for_instances.contains(&instance_name) {
            return Err(Status::permission_denied(format!(
                "This service does not accept Directories for instance {:?}",
                request.instance_name
            )));
        }
        let root_directory_digest = request.root_directory_digest.ok_or_else(|| {
            Status::invalid_argument("PushDirectory request has no root directory digest")
        })?;

        let asset = new_directory_asset(root_directory_digest, request.expire_at);
        self.put_bindings(
            &instance_name,
            &request.uris,
            &request.qualifiers,
            &asset,
            digest_function,
        )
        .await?;
        Ok(PushDirectoryResponse::default())
    }
}
