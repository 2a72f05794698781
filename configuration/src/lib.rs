// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! The JSON configuration model for an asset server, and the factories that
//! assemble the fetch and push decorator stacks from it.
//!
//! The configuration names *which* storage and client backends to use; the
//! construction of those collaborators (gRPC channels, blobstore layers, TLS)
//! belongs to the embedding binary, which passes them in as trait objects.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

mod factories;
pub use factories::{
    new_asset_store_from_configuration, new_authorizer_from_configuration,
    new_fetcher_from_configuration, new_push_server_from_configuration,
};


use blobstore::InstanceName;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationConfiguration {
    #[serde(default)]
    pub global: Option<GlobalConfiguration>,
    #[serde(default)]
    pub grpc_servers: Vec<GrpcServerConfiguration>,
    #[serde(default)]
    pub asset_cache: Option<AssetCacheConfiguration>,
    #[serde(default)]
    pub fetcher: Option<FetcherConfiguration>,
    pub maximum_message_size_bytes: usize,
    #[serde(default)]
    pub allow_updates_for_instances: Vec<String>,
    #[serde(default)]
    pub fetch_authorizer: Option<AuthorizerConfiguration>,
    #[serde(default)]
    pub push_authorizer: Option<AuthorizerConfiguration>,
}

impl ApplicationConfiguration {
    pub fn from_json_str(json: &str) -> Result<ApplicationConfiguration, String> {
        serde_json::from_str(json).map_err(|err| format!("Invalid configuration: {err}"))
    }

    /// The validated set of instance names pushes are accepted for.
    pub fn allowed_instances(&self) -> Result<HashSet<InstanceName>, String> {
        self.allow_updates_for_instances
            .iter()
            .map(|name| InstanceName::new(name).map_err(|err| err.message().to_owned()))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfiguration {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub diagnostics_http_listen_address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrpcServerConfiguration {
    pub listen_addresses: Vec<String>,
}

/// Which `AssetStore` backend to run. The nested blobstore blocks are opaque
/// here: the embedding binary interprets them when constructing the
/// `BlobAccess`/`ActionCache` collaborators.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCacheConfiguration {
    BlobAccess {
        #[serde(default)]
        asset_store: serde_json::Value,
        #[serde(default)]
        content_addressable_storage: serde_json::Value,
    },
    ActionCache {
        #[serde(default)]
        blobstore: serde_json::Value,
    },
}

/// Which source backend the fetch pipeline bottoms out in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetcherConfiguration {
    Http {
        #[serde(default)]
        client: serde_json::Value,
    },
    RemoteExecution {
        #[serde(default)]
        execution_client: serde_json::Value,
    },
    Error(StatusConfiguration),
}

/// A `google.rpc.Status` in configuration form.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfiguration {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl StatusConfiguration {
    pub fn to_proto(&self) -> protos::gen::google::rpc::Status {
        protos::gen::google::rpc::Status {
            code: self.code,
            message: self.message.clone(),
            ..protos::gen::google::rpc::Status::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizerConfiguration {
    Allow,
    Deny,
}

/// The externally constructed collaborators the factories wire together.
pub struct Collaborators {
    pub content_addressable_storage: Arc<dyn blobstore::BlobAccess>,
    /// The keyed store backing a `blob_access` asset cache, when configured.
    pub asset_blob_access: Option<Arc<dyn blobstore::BlobAccess>>,
    /// The action cache backing an `action_cache` asset cache, when
    /// configured.
    pub action_cache: Option<Arc<dyn blobstore::ActionCache>>,
    /// The execution client backing a `remote_execution` fetcher, when
    /// configured.
    pub execution_client: Option<Arc<dyn blobstore::ExecutionClient>>,
    pub http_client: reqwest::Client,
}
