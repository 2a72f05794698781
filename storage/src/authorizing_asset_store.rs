// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use blobstore::Authorizer;
use hashing::DigestFunction;
use protos::gen::asset::{Asset, AssetReference};
use tonic::Status;

use crate::AssetStore;

/// An `AssetStore` decorator that validates requests against authorizers:
/// reads against the fetch authorizer, writes against the push authorizer.
pub struct AuthorizingAssetStore {
    asset_store: Arc<dyn AssetStore>,
    fetch_authorizer: Arc<dyn Authorizer>,
    push_authorizer: Arc<dyn Authorizer>,
}

impl AuthorizingAssetStore {
    pub fn new(
        asset_store: Arc<dyn AssetStore>,
        fetch_authorizer: Arc<dyn Authorizer>,
        push_authorizer: Arc<dyn Authorizer>,
    ) -> AuthorizingAssetStore {
        AuthorizingAssetStore {
            asset_store,
            fetch_authorizer,
            push_authorizer,
        }
    }
}

#[async_trait]
impl AssetStore for AuthorizingAssetStore {
    async fn get(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        digest_function: DigestFunction,
    ) -> Result<Asset, Status> {
        self.fetch_authorizer.authorize(instance_name).await?;
        self.asset_store
            .get(instance_name, reference, digest_function)
            .await
    }

    async fn put(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        asset: &Asset,
        digest_function: DigestFunction,
    ) -> Result<(), Status> {
        self.push_authorizer.authorize(instance_name).await?;
        self.asset_store
            .put(instance_name, reference, asset, digest_function)
            .await
    }
}
