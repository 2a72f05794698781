// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use grpc_util::{status_ok, status_ref_to_str};
use hashing::DigestFunction;
use prost_types::Timestamp;
use protos::gen::asset::Asset;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use protos::{digest_function_to_proto, resolve_digest_function};
use qualifier::QualifierSet;
use storage::{
    AssetStore, new_asset_reference, new_blob_asset, new_directory_asset, now_timestamp,
    timestamp_is_before,
};
use tonic::Status;

use crate::Fetcher;

/// A read-through/write-through cache over an `AssetStore`, wrapped around an
/// inner fetcher.
///
/// Each URI of the request is looked up as a single-URI reference before the
/// inner fetcher runs. On an inner success the binding is written back both
/// under the URI that served the fetch and, for multi-URI requests, under the
/// full URI set, so later requests hit on either key. Two concurrent misses
/// for one reference may both fetch and both write; the writes are idempotent
/// because the binding value is a function of the artifact bytes.
pub struct CachingFetcher {
    fetcher: Arc<dyn Fetcher>,
    asset_store: Arc<dyn AssetStore>,
}

impl CachingFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, asset_store: Arc<dyn AssetStore>) -> CachingFetcher {
        CachingFetcher {
            fetcher,
            asset_store,
        }
    }

    /// Probe the asset store for each URI in request order. Returns the first
    /// usable hit, or the accumulated per-URI failures.
    async fn lookup(
        &self,
        instance_name: &str,
        uris: &[String],
        qualifiers: &[protos::gen::build::bazel::remote::asset::v1::Qualifier],
        digest_function: DigestFunction,
        oldest_content_accepted: &Timestamp,
    ) -> Result<(String, Asset), Vec<String>> {
        let now = now_timestamp();
        let mut failures = Vec::new();
        for uri in uris {
            let reference = new_asset_reference(vec![uri.clone()], qualifiers.to_vec());
            match self
                .asset_store
                .get(instance_name, &reference, digest_function)
                .await
            {
                Ok(asset) => {
                    if is_expired(&asset, &now) {
                        failures.push(format!("{uri}: cached entry has expired"));
                    } else if is_older_than(&asset, oldest_content_accepted) {
                        failures.push(format!(
                            "{uri}: cached entry is older than the oldest content accepted"
                        ));
                    } else if asset.digest.is_none() {
                        failures.push(format!("{uri}: cached entry has no digest"));
                    } else {
                        return Ok((uri.clone(), asset));
                    }
                }
                Err(err) => failures.push(format!("{uri}: {}", status_ref_to_str(&err))),
            }
        }
        Err(failures)
    }

    fn join_failure(inner: Status, failures: &[String]) -> Status {
        if failures.is_empty() {
            return inner;
        }
        Status::new(
            inner.code(),
            format!(
                "{}; asset cache lookups failed: {}",
                inner.message(),
                failures.join("; ")
            ),
        )
    }
}

fn is_expired(asset: &Asset, now: &Timestamp) -> bool {
    match &asset.expire_at {
        // Unset or zero means the asset never expires.
        None => false,
        Some(expire_at) if expire_at.seconds == 0 && expire_at.nanos == 0 => false,
        Some(expire_at) => timestamp_is_before(expire_at, now),
    }
}

fn is_older_than(asset: &Asset, oldest_content_accepted: &Timestamp) -> bool {
    let last_updated = asset.last_updated.unwrap_or_default();
    timestamp_is_before(&last_updated, oldest_content_accepted)
}

#[async_trait]
impl Fetcher for CachingFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        let digest_function =
            resolve_digest_function(request.digest_function).map_err(Status::invalid_argument)?;
        let oldest_content_accepted = request.oldest_content_accepted.unwrap_or_default();

        let failures = match self
            .lookup(
                &request.instance_name,
                &request.uris,
                &request.qualifiers,
                digest_function,
                &oldest_content_accepted,
            )
            .await
        {
            Ok((uri, asset)) => {
                return Ok(FetchBlobResponse {
                    status: Some(status_ok("Blob fetched successfully from asset cache")),
                    uri,
                    qualifiers: request.qualifiers,
                    expires_at: asset.expire_at,
                    blob_digest: asset.digest,
                    digest_function: digest_function_to_proto(digest_function) as i32,
                });
            }
            Err(failures) => failures,
        };

        let instance_name = request.instance_name.clone();
        let uris = request.uris.clone();
        let qualifiers = request.qualifiers.clone();
        let response = match self.fetcher.fetch_blob(request).await {
            Ok(response) => response,
            Err(err) => return Err(Self::join_failure(err, &failures)),
        };
        if response.status.as_ref().map(|s| s.code) == Some(tonic::Code::Ok as i32) {
            if let Some(digest) = &response.blob_digest {
                let asset = new_blob_asset(digest.clone(), None);
                let reference =
                    new_asset_reference(vec![response.uri.clone()], qualifiers.clone());
                write_through(
                    self.asset_store.as_ref(),
                    &instance_name,
                    &reference,
                    &asset,
                    digest_function,
                )
                .await;
                if uris.len() > 1 {
                    let reference = new_asset_reference(uris, qualifiers);
                    write_through(
                        self.asset_store.as_ref(),
                        &instance_name,
                        &reference,
                        &asset,
                        digest_function,
                    )
                    .await;
                }
            }
        }
        Ok(response)
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        let digest_function =
            resolve_digest_function(request.digest_function).map_err(Status::invalid_argument)?;
        let oldest_content_accepted = request.oldest_content_accepted.unwrap_or_default();

        let failures = match self
            .lookup(
                &request.instance_name,
                &request.uris,
                &request.qualifiers,
                digest_function,
                &oldest_content_accepted,
            )
            .await
        {
            Ok((uri, asset)) => {
                return Ok(FetchDirectoryResponse {
                    status: Some(status_ok(
                        "Directory fetched successfully from asset cache",
                    )),
                    uri,
                    qualifiers: request.qualifiers,
                    expires_at: asset.expire_at,
                    root_directory_digest: asset.digest,
                    digest_function: digest_function_to_proto(digest_function) as i32,
                });
            }
            Err(failures) => failures,
        };

        let instance_name = request.instance_name.clone();
        let uris = request.uris.clone();
        let qualifiers = request.qualifiers.clone();
        let response = match self.fetcher.fetch_directory(request).await {
            Ok(response) => response,
            Err(err) => return Err(Self::join_failure(err, &failures)),
        };
        if response.status.as_ref().map(|s| s.code) == Some(tonic::Code::Ok as i32) {
            if let Some(digest) = &response.root_directory_digest {
                let asset = new_directory_asset(digest.clone(), None);
                let reference =
                    new_asset_reference(vec![response.uri.clone()], qualifiers.clone());
                write_through(
                    self.asset_store.as_ref(),
                    &instance_name,
                    &reference,
                    &asset,
                    digest_function,
                )
                .await;
                if uris.len() > 1 {
                    let reference = new_asset_reference(uris, qualifiers);
                    write_through(
                        self.asset_store.as_ref(),
                        &instance_name,
                        &reference,
                        &asset,
                        digest_function,
                    )
                    .await;
                }
            }
        }
        Ok(response)
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        self.fetcher.check_qualifiers(qualifiers)
    }
}

/// Write a binding back to the asset store. The artifact itself is already
/// durable in the CAS at this point, so a failed binding write downgrades the
/// request to a cache miss for later callers rather than failing it.
async fn write_through(
    asset_store: &dyn AssetStore,
    instance_name: &str,
    reference: &protos::gen::asset::AssetReference,
    asset: &Asset,
    digest_function: DigestFunction,
) {
    if let Err(err) = asset_store
        .put(instance_name, reference, asset, digest_function)
        .await
    {
        log::warn!(
            "Failed to record asset binding for {:?}: {}",
            reference.uris,
            status_ref_to_str(&err)
        );
    }
}
