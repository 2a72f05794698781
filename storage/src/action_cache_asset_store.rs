// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use blobstore::{ActionCache, BlobAccess, get_message};
use grpc_util::prost::MessageExt;
use hashing::DigestFunction;
use protos::gen::asset::{Asset, AssetReference, asset::AssetType};
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use protos::require_digest;
use remexec::command::OutputDirectoryFormat;
use tonic::Status;

use crate::{AssetStore, message_digest, new_asset_reference};

/// An `AssetStore` which stores its bindings as ActionResults in a REAPI
/// Action Cache, so that a deployment needs no separate state store.
///
/// The binding key is the digest of a synthetic `Action` derived from the
/// reference: the command is what a fetch of the URIs would run, and the
/// input root is a directory holding the serialized qualifier-only reference,
/// which is how qualifiers contribute to the key independently of the URIs.
/// Every proto the ActionResult refers to is uploaded to the CAS first so
/// that an Action Cache with referential-integrity checks accepts the write.
pub struct ActionCacheAssetStore {
    action_cache: Arc<dyn ActionCache>,
    content_addressable_storage: Arc<dyn BlobAccess>,
    maximum_message_size_bytes: usize,
}

// The protos derived from an asset reference which together form the action
// cache key.
struct ReferenceKey {
    action: remexec::Action,
    command: remexec::Command,
    input_root: remexec::Directory,
    qualifier_reference: AssetReference,
}

impl ActionCacheAssetStore {
    pub fn new(
        action_cache: Arc<dyn ActionCache>,
        content_addressable_storage: Arc<dyn BlobAccess>,
        maximum_message_size_bytes: usize,
    ) -> ActionCacheAssetStore {
        ActionCacheAssetStore {
            action_cache,
            content_addressable_storage,
            maximum_message_size_bytes,
        }
    }

    fn key_command(&self, reference: &AssetReference) -> remexec::Command {
        // A single URI whose qualifiers name a recognized fetch command uses
        // that command, making the key identical to what a remote-execution
        // fetch of the same reference would execute.
        if reference.uris.len() == 1 {
            if let Ok(generator) = qualifier::qualifiers_to_command(&reference.qualifiers) {
                return generator(&reference.uris[0]);
            }
        }
        remexec::Command {
            arguments: reference.uris.clone(),
            output_paths: vec!["out".to_owned()],
            output_directory_format: OutputDirectoryFormat::TreeAndDirectory as i32,
            ..remexec::Command::default()
        }
    }

    fn reference_key(
        &self,
        reference: &AssetReference,
        digest_function: DigestFunction,
    ) -> ReferenceKey {
        let qualifier_reference =
            new_asset_reference(Vec::new(), reference.qualifiers.clone());
        let input_root = remexec::Directory {
            files: vec![remexec::FileNode {
                name: "AssetReference".to_owned(),
                digest: Some(message_digest(&qualifier_reference, digest_function).into()),
                ..remexec::FileNode::default()
            }],
            ..remexec::Directory::default()
        };
        let command = self.key_command(reference);
        let action = remexec::Action {
            command_digest: Some(message_digest(&command, digest_function).into()),
            input_root_digest: Some(message_digest(&input_root, digest_function).into()),
            ..remexec::Action::default()
        };
        ReferenceKey {
            action,
            command,
            input_root,
            qualifier_reference,
        }
    }

    fn action_result_to_asset(&self, result: &remexec::ActionResult) -> Result<Asset, Status> {
        let last_updated = result
            .execution_metadata
            .as_ref()
            .and_then(|metadata| metadata.queued_timestamp);
        for directory in &result.output_directories {
            if directory.path == "out" {
                if let Some(digest) = &directory.root_directory_digest {
                    return Ok(Asset {
                        digest: Some(digest.clone()),
                        expire_at: None,
                        last_updated,
                        r#type: AssetType::Directory as i32,
                    });
                }
            }
        }
        for file in &result.output_files {
            if file.path == "out" {
                if let Some(digest) = &file.digest {
                    return Ok(Asset {
                        digest: Some(digest.clone()),
                        expire_at: None,
                        last_updated,
                        r#type: AssetType::Blob as i32,
                    });
                }
            }
        }
        Err(Status::invalid_argument(
            "ActionResult has no output at path \"out\"",
        ))
    }

    /// Collect the root Directory named by `root_digest` and all of its
    /// transitive children into a Tree, in pre-order. Directory trees are
    /// content-addressed, so cycles cannot exist.
    async fn directory_to_tree(
        &self,
        instance_name: &str,
        root_digest: &remexec::Digest,
    ) -> Result<remexec::Tree, Status> {
        let read_directory = |digest_proto: remexec::Digest| async move {
            let digest = require_digest(&digest_proto).map_err(Status::invalid_argument)?;
            get_message::<remexec::Directory>(
                self.content_addressable_storage.as_ref(),
                instance_name,
                digest,
                self.maximum_message_size_bytes,
            )
            .await
            .map_err(|err| {
                Status::invalid_argument(format!(
                    "Failed to read directory {}/{}: {}",
                    digest_proto.hash,
                    digest_proto.size_bytes,
                    err.message()
                ))
            })
        };

        let root = read_directory(root_digest.clone()).await?;
        let mut children = Vec::new();
        let mut pending: Vec<remexec::Digest> = root
            .directories
            .iter()
            .rev()
            .filter_map(|node| node.digest.clone())
            .collect();
        while let Some(digest_proto) = pending.pop() {
            let directory = read_directory(digest_proto).await?;
            pending.extend(
                directory
                    .directories
                    .iter()
                    .rev()
                    .filter_map(|node| node.digest.clone()),
            );
            children.push(directory);
        }
        Ok(remexec::Tree {
            root: Some(root),
            children,
        })
    }
}

#[async_trait]
impl AssetStore for ActionCacheAssetStore {
    async fn get(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        digest_function: DigestFunction,
    ) -> Result<Asset, Status> {
        let key = self.reference_key(reference, digest_function);
        let action_digest = message_digest(&key.action, digest_function);
        let action_result = self
            .action_cache
            .get_action_result(instance_name, action_digest)
            .await?;
        self.action_result_to_asset(&action_result)
    }

    async fn put(
        &self,
        instance_name: &str,
        reference: &AssetReference,
        asset: &Asset,
        digest_function: DigestFunction,
    ) -> Result<(), Status> {
        let key = self.reference_key(reference, digest_function);

        // Upload everything the action cache entry refers to, so the entry
        // passes referential-integrity checks.
        let cas = self.content_addressable_storage.as_ref();
        for bytes in [
            key.qualifier_reference.to_bytes(),
            key.input_root.to_bytes(),
            key.command.to_bytes(),
            key.action.to_bytes(),
        ] {
            cas.put(instance_name, digest_function.digest(&bytes), bytes)
                .await?;
        }

        let asset_digest = asset
            .digest
            .clone()
            .ok_or_else(|| Status::invalid_argument("Asset has no digest"))?;
        let mut action_result = remexec::ActionResult {
            execution_metadata: Some(remexec::ExecutedActionMetadata {
                queued_timestamp: asset.last_updated,
                ..remexec::ExecutedActionMetadata::default()
            }),
            ..remexec::ActionResult::default()
        };
        match AssetType::try_from(asset.r#type) {
            Ok(AssetType::Directory) => {
                let tree = self.directory_to_tree(instance_name, &asset_digest).await?;
                let tree_bytes = tree.to_bytes();
                let tree_digest = digest_function.digest(&tree_bytes);
                cas.put(instance_name, tree_digest, tree_bytes).await?;
                action_result.output_directories = vec![remexec::OutputDirectory {
                    path: "out".to_owned(),
                    tree_digest: Some(tree_digest.into()),
                    root_directory_digest: Some(asset_digest),
                    ..remexec::OutputDirectory::default()
                }];
            }
            _ => {
                action_result.output_files = vec![remexec::OutputFile {
                    path: "out".to_owned(),
                    digest: Some(asset_digest),
                    ..remexec::OutputFile::default()
                }];
            }
        }

        let action_digest = message_digest(&key.action, digest_function);
        self.action_cache
            .update_action_result(instance_name, action_digest, action_result)
            .await
    }
}
