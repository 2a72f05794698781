// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Persistence of asset-reference → asset bindings. Two interchangeable
//! `AssetStore` backends are provided: one that treats a CAS-style
//! `BlobAccess` as a keyed proto store, and one that reuses a REAPI Action
//! Cache as the binding store so that deployments need no separate state
//! store.

use async_trait::async_trait;
use hashing::DigestFunction;
use protos::gen::asset::{Asset, AssetReference};
use tonic::Status;

mod asset;
pub use crate::asset::{
    new_asset, new_blob_asset, new_directory_asset, now_timestamp, timestamp_is_before,
};
mod asset_reference;
pub use asset_reference::{asset_reference_digest, new_asset_reference};
mod digest;
pub use crate::digest::message_digest;

mod action_cache_asset_store;
pub use action_cache_asset_store::ActionCacheAssetStore;
mod authorizing_asset_store;
pub use authorizing_asset_store::AuthorizingAssetStore;
mod blob_access_asset_store;
pub use blob_access_asset_store::BlobAccessAssetStore;

#[cfg(test)]
mod action_cache_asset_store_tests;
#[cfg(test)]
mod asset_reference_tests;

/// A keyed store of asset-reference → asset bindings. The serialized
/// canonical form of the reference determines the storage key.
#[async_trait]
pub trait AssetStore: Send + Sync + 'static {
    /// Look up the asset bound to `reference`, or `NotFound`.
    async fn get(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        digest_function: DigestFunction,
    ) -> Result<Asset, Status>;

    /// Bind `asset` to `reference`. A successful put must be observable by a
    /// subsequent get in the same (instance, digest function) namespace.
    async fn put(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        asset: &Asset,
        digest_function: DigestFunction,
    ) -> Result<(), Status>;
}
