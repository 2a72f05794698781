// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::HashSet;
use std::sync::Arc;

use blobstore::{Authorizer, InstanceName, StaticAuthorizer};
use fetch::{
    AuthorizingFetcher, CachingFetcher, ErrorFetcher, Fetcher, HttpFetcher, LoggingFetcher,
    MetricsFetcher, RemoteExecutionFetcher, ValidatingFetcher,
};
use push::{
    AssetPushServer, ErrorPushServer, LoggingPusher, MetricsPushServer, PushServer,
    ValidatingPusher,
};
use storage::{
    ActionCacheAssetStore, AssetStore, AuthorizingAssetStore, BlobAccessAssetStore,
};

use crate::{
    AssetCacheConfiguration, AuthorizerConfiguration, Collaborators, FetcherConfiguration,
};

pub fn new_authorizer_from_configuration(
    configuration: Option<&AuthorizerConfiguration>,
) -> Arc<dyn Authorizer> {
    match configuration {
        None | Some(AuthorizerConfiguration::Allow) => Arc::new(StaticAuthorizer::new(true)),
        Some(AuthorizerConfiguration::Deny) => Arc::new(StaticAuthorizer::new(false)),
    }
}

/// Create the `AssetStore` selected by the configuration, guarded by the
/// fetch and push authorizers. A missing asset cache disables caching and
/// the push path.
pub fn new_asset_store_from_configuration(
    configuration: Option<&AssetCacheConfiguration>,
    collaborators: &Collaborators,
    maximum_message_size_bytes: usize,
    fetch_authorizer: Arc<dyn Authorizer>,
    push_authorizer: Arc<dyn Authorizer>,
) -> Result<Option<Arc<dyn AssetStore>>, String> {
    let asset_store: Arc<dyn AssetStore> = match configuration {
        None => return Ok(None),
        Some(AssetCacheConfiguration::BlobAccess { .. }) => {
            let blob_access = collaborators
                .asset_blob_access
                .clone()
                .ok_or("Asset cache is configured to use a blob access, but none was provided")?;
            Arc::new(BlobAccessAssetStore::new(
                blob_access,
                maximum_message_size_bytes,
            ))
        }
        Some(AssetCacheConfiguration::ActionCache { .. }) => {
            let action_cache = collaborators
                .action_cache
                .clone()
                .ok_or("Asset cache is configured to use an action cache, but none was provided")?;
            Arc::new(ActionCacheAssetStore::new(
                action_cache,
                collaborators.content_addressable_storage.clone(),
                maximum_message_size_bytes,
            ))
        }
    };
    Ok(Some(Arc::new(AuthorizingAssetStore::new(
        asset_store,
        fetch_authorizer,
        push_authorizer,
    ))))
}

/// Create the full fetch stack: a source backend selected by the
/// configuration, a caching layer when an asset store exists, and the
/// validation, logging, metrics, and authorization decorators around it.
pub fn new_fetcher_from_configuration(
    configuration: Option<&FetcherConfiguration>,
    asset_store: Option<Arc<dyn AssetStore>>,
    collaborators: &Collaborators,
    maximum_message_size_bytes: usize,
    authorizer: Arc<dyn Authorizer>,
) -> Result<Arc<dyn Fetcher>, String> {
    let mut fetcher: Arc<dyn Fetcher> = match configuration {
        None => Arc::new(ErrorFetcher::unconfigured()),
        Some(FetcherConfiguration::Http { .. }) => Arc::new(HttpFetcher::new(
            collaborators.http_client.clone(),
            collaborators.content_addressable_storage.clone(),
        )),
        Some(FetcherConfiguration::RemoteExecution { .. }) => {
            let execution_client = collaborators.execution_client.clone().ok_or(
                "Fetcher is configured to use remote execution, but no execution client was provided",
            )?;
            Arc::new(RemoteExecutionFetcher::new(
                collaborators.content_addressable_storage.clone(),
                execution_client,
                maximum_message_size_bytes,
            ))
        }
        Some(FetcherConfiguration::Error(status)) => {
            Arc::new(ErrorFetcher::new(status.to_proto()))
        }
    };
    if let Some(asset_store) = asset_store {
        fetcher = Arc::new(CachingFetcher::new(fetcher, asset_store));
    }
    Ok(Arc::new(AuthorizingFetcher::new(
        Arc::new(MetricsFetcher::new(
            Arc::new(LoggingFetcher::new(Arc::new(ValidatingFetcher::new(
                fetcher,
            )))),
            "fetch",
        )),
        authorizer,
    )))
}

/// Create the full push stack over the asset store, or a FailedPrecondition
/// stub when no asset cache is configured.
pub fn new_push_server_from_configuration(
    asset_store: Option<Arc<dyn AssetStore>>,
    allow_updates_for_instances: HashSet<InstanceName>,
) -> Arc<dyn PushServer> {
    let push_server: Arc<dyn PushServer> = match asset_store {
        None => Arc::new(ErrorPushServer::unconfigured()),
        Some(asset_store) => Arc::new(AssetPushServer::new(
            asset_store,
            allow_updates_for_instances,
        )),
    };
    Arc::new(MetricsPushServer::new(
        Arc::new(LoggingPusher::new(Arc::new(ValidatingPusher::new(
            push_server,
        )))),
        "push",
    ))
}
