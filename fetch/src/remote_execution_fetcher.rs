// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use async_trait::async_trait;
use blobstore::{BlobAccess, ExecutionClient, get_message};
use futures::StreamExt;
use grpc_util::prost::MessageExt;
use grpc_util::{status_from_proto, status_ok};
use hashing::DigestFunction;
use prost::Message;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use protos::gen::google::longrunning::operation;
use protos::{digest_function_to_proto, require_digest, resolve_digest_function};
use qualifier::QualifierSet;
use storage::message_digest;
use tonic::Status;

use crate::Fetcher;

/// A source backend that translates fetches into Execute calls on a remote
/// execution service. The qualifier set determines the command each worker
/// runs (git clone, wget); the worker leaves the result at the output path
/// `out`, and its ActionResult points at the artifact in the CAS.
pub struct RemoteExecutionFetcher {
    content_addressable_storage: Arc<dyn BlobAccess>,
    execution_client: Arc<dyn ExecutionClient>,
    maximum_message_size_bytes: usize,
}

impl RemoteExecutionFetcher {
    pub fn new(
        content_addressable_storage: Arc<dyn BlobAccess>,
        execution_client: Arc<dyn ExecutionClient>,
        maximum_message_size_bytes: usize,
    ) -> RemoteExecutionFetcher {
        RemoteExecutionFetcher {
            content_addressable_storage,
            execution_client,
            maximum_message_size_bytes,
        }
    }

    /// Run the fetch command for each URI in turn until one exits zero.
    /// Returns the ActionResult, the URI that succeeded, and the output path
    /// holding the artifact.
    async fn fetch_common(
        &self,
        request: &FetchBlobRequest,
        digest_function: DigestFunction,
    ) -> Result<(remexec::ActionResult, String, String), Status> {
        let command_generator = qualifier::qualifiers_to_command(&request.qualifiers)?;

        for uri in &request.uris {
            let command = command_generator(uri);
            let command_bytes = command.to_bytes();
            let command_digest = digest_function.digest(&command_bytes);
            let action = remexec::Action {
                command_digest: Some(command_digest.into()),
                input_root_digest: Some(digest_function.empty_digest().into()),
                ..remexec::Action::default()
            };
            let action_bytes = action.to_bytes();
            let action_digest = digest_function.digest(&action_bytes);

            // Upload Action and Command so the execution service can read
            // them from the CAS.
            let cas = self.content_addressable_storage.as_ref();
            cas.put(&request.instance_name, action_digest, action_bytes)
                .await?;
            cas.put(&request.instance_name, command_digest, command_bytes)
                .await?;

            let mut stream = self
                .execution_client
                .execute(remexec::ExecuteRequest {
                    instance_name: request.instance_name.clone(),
                    action_digest: Some(action_digest.into()),
                    digest_function: digest_function_to_proto(digest_function) as i32,
                    ..remexec::ExecuteRequest::default()
                })
                .await?;

            let mut response = None;
            while let Some(operation) = stream.next().await {
                let operation = operation?;
                if !operation.done {
                    continue;
                }
                match operation.result {
                    Some(operation::Result::Response(any)) => {
                        let decoded = remexec::ExecuteResponse::decode(any.value.as_slice())
                            .map_err(|err| {
                                Status::internal(format!(
                                    "Failed to unmarshal ExecuteResponse: {err}"
                                ))
                            })?;
                        response = Some(decoded);
                    }
                    Some(operation::Result::Error(status)) => {
                        return Err(status_from_proto(&status));
                    }
                    None => {
                        return Err(Status::internal(
                            "Execution completed without a response",
                        ));
                    }
                }
                break;
            }
            let response = response.ok_or_else(|| {
                Status::internal("Execution stream ended before the operation completed")
            })?;

            let action_result = response.result.unwrap_or_default();
            if action_result.exit_code != 0 {
                log::debug!("Remote execution fetch was unsuccessful for URI: {uri}");
                continue;
            }
            let output_path = command
                .output_paths
                .first()
                .cloned()
                .unwrap_or_else(|| "out".to_owned());
            return Ok((action_result, uri.clone(), output_path));
        }

        Err(Status::not_found(
            "Unable to download blob from any of the provided URIs",
        ))
    }
}

#[async_trait]
impl Fetcher for RemoteExecutionFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        let digest_function =
            resolve_digest_function(request.digest_function).map_err(Status::invalid_argument)?;
        let (action_result, uri, output_path) =
            self.fetch_common(&request, digest_function).await?;

        let file_digest = action_result
            .output_files
            .iter()
            .find(|file| file.path == output_path)
            .and_then(|file| file.digest.clone());
        let Some(digest) = file_digest else {
            if action_result
                .output_directories
                .iter()
                .any(|directory| directory.path == output_path)
            {
                return Err(Status::aborted("Expected blob but downloaded directory"));
            }
            return Err(Status::not_found(
                "Unable to fetch blob from any of the URIs specified",
            ));
        };

        Ok(FetchBlobResponse {
            status: Some(status_ok("Blob fetched successfully!")),
            uri,
            qualifiers: request.qualifiers,
            expires_at: None,
            blob_digest: Some(digest),
            digest_function: digest_function_to_proto(digest_function) as i32,
        })
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        let digest_function =
            resolve_digest_function(request.digest_function).map_err(Status::invalid_argument)?;
        let blob_request = FetchBlobRequest {
            instance_name: request.instance_name.clone(),
            timeout: request.timeout,
            oldest_content_accepted: request.oldest_content_accepted,
            uris: request.uris.clone(),
            qualifiers: request.qualifiers.clone(),
            digest_function: request.digest_function,
        };
        let (action_result, uri, output_path) =
            self.fetch_common(&blob_request, digest_function).await?;

        let tree_digest = action_result
            .output_directories
            .iter()
            .find(|directory| directory.path == output_path)
            .and_then(|directory| directory.tree_digest.clone());
        let Some(tree_digest) = tree_digest else {
            if action_result
                .output_files
                .iter()
                .any(|file| file.path == output_path)
            {
                return Err(Status::aborted("Expected directory but downloaded file"));
            }
            return Err(Status::not_found(
                "Unable to fetch directory from any of the URIs specified",
            ));
        };

        // The ActionResult names a Tree, but the Remote Asset API expects the
        // digest of the root Directory proto. Download the Tree and re-upload
        // its directories individually so the root is addressable standalone.
        let cas = self.content_addressable_storage.as_ref();
        let tree: remexec::Tree = get_message(
            cas,
            &request.instance_name,
            require_digest(&tree_digest).map_err(Status::internal)?,
            self.maximum_message_size_bytes,
        )
        .await?;
        let root = tree
            .root
            .ok_or_else(|| Status::internal("Fetched Tree has no root directory"))?;
        let root_digest = message_digest(&root, digest_function);
        cas.put(&request.instance_name, root_digest, root.to_bytes())
            .await?;
        for child in &tree.children {
            let child_digest = message_digest(child, digest_function);
            cas.put(&request.instance_name, child_digest, child.to_bytes())
                .await?;
        }

        Ok(FetchDirectoryResponse {
            status: Some(status_ok("Directory fetched successfully!")),
            uri,
            qualifiers: request.qualifiers,
            expires_at: None,
            root_directory_digest: Some(root_digest.into()),
            digest_function: digest_function_to_proto(digest_function) as i32,
        })
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        let supported = QualifierSet::from_names([
            "resource_type",
            "vcs.branch",
            "vcs.commit",
            "auth.basic.username",
            "auth.basic.password",
            "checksum.sri",
        ]);
        qualifiers.difference(&supported)
    }
}
