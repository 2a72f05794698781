// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use blobstore::{BlobAccess, get_message};
use grpc_util::prost::MessageExt;
use hashing::DigestFunction;
use protos::gen::asset::{Asset, AssetReference};
use tonic::Status;

use crate::{AssetStore, asset_reference_digest};

/// An `AssetStore` that treats a `BlobAccess` as a keyed proto store: the key
/// is the reference digest, the value the serialized `Asset`.
pub struct BlobAccessAssetStore {
    blob_access: Arc<dyn BlobAccess>,
    maximum_message_size_bytes: usize,
}

impl BlobAccessAssetStore {
    pub fn new(
        blob_access: Arc<dyn BlobAccess>,
        maximum_message_size_bytes: usize,
    ) -> BlobAccessAssetStore {
        BlobAccessAssetStore {
            blob_access,
            maximum_message_size_bytes,
        }
    }
}

#[async_trait]
impl AssetStore for BlobAccessAssetStore {
    async fn get(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        digest_function: DigestFunction,
    ) -> Result<Asset, Status> {
        let reference_digest = asset_reference_digest(reference, digest_function);
        get_message(
            self.blob_access.as_ref(),
            instance_name,
            reference_digest,
            self.maximum_message_size_bytes,
        )
        .await
    }

    async fn put(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        asset: &Asset,
        digest_function: DigestFunction,
    ) -> Result<(), Status> {
        let reference_digest = asset_reference_digest(reference, digest_function);
        self.blob_access
            .put(instance_name, reference_digest, asset.to_bytes())
            .await
    }
}
