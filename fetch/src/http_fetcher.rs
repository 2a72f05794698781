// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::fmt;
use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blobstore::{BlobAccess, InstanceName};
use bytes::{BufMut, BytesMut};
use futures::TryFutureExt;
use futures::stream::StreamExt;
use hashing::{Digest, DigestFunction, WriterHasher};
use protos::digest_function_to_proto;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse,
};
use qualifier::QualifierSet;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialFactorBackoff};
use tonic::Status;

use crate::Fetcher;
use crate::auth_headers::AuthHeaders;
use crate::sri::{Checksum, checksum_from_qualifiers};

use grpc_util::status_ok;

const DEFAULT_ERROR_DELAY: Duration = Duration::from_millis(100);
const DEFAULT_MAX_ATTEMPTS: usize = 3;

#[derive(Debug)]
enum StreamingError {
    Retryable(String),
    Permanent(String),
}

impl fmt::Display for StreamingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamingError::Retryable(inner) => write!(f, "{} (retryable)", inner.as_str()),
            StreamingError::Permanent(inner) => write!(f, "{} (unretryable)", inner.as_str()),
        }
    }
}

impl std::error::Error for StreamingError {}

impl From<StreamingError> for String {
    fn from(err: StreamingError) -> Self {
        match err {
            StreamingError::Retryable(s) | StreamingError::Permanent(s) => s,
        }
    }
}

fn jitter(duration: Duration) -> Duration {
    duration.mul_f64(rand::random::<f64>())
}

/// A source backend that downloads blobs over HTTP and places them in the
/// CAS. Directory fetching is not supported over HTTP.
pub struct HttpFetcher {
    http_client: reqwest::Client,
    content_addressable_storage: Arc<dyn BlobAccess>,
    error_delay: Duration,
    max_attempts: NonZeroUsize,
}

impl HttpFetcher {
    pub fn new(
        http_client: reqwest::Client,
        content_addressable_storage: Arc<dyn BlobAccess>,
    ) -> HttpFetcher {
        HttpFetcher::new_with_retries(
            http_client,
            content_addressable_storage,
            DEFAULT_ERROR_DELAY,
            NonZeroUsize::new(DEFAULT_MAX_ATTEMPTS).unwrap(),
        )
    }

    pub fn new_with_retries(
        http_client: reqwest::Client,
        content_addressable_storage: Arc<dyn BlobAccess>,
        error_delay: Duration,
        max_attempts: NonZeroUsize,
    ) -> HttpFetcher {
        HttpFetcher {
            http_client,
            content_addressable_storage,
            error_delay,
            max_attempts,
        }
    }

    /// One GET of `uri`, streaming the body through a hasher.
    async fn attempt_download(
        &self,
        uri: &str,
        headers: http::HeaderMap,
        digest_function: DigestFunction,
    ) -> Result<(Digest, bytes::Bytes), StreamingError> {
        let response = self
            .http_client
            .get(uri)
            .headers(headers)
            .send()
            .await
            .map_err(|err| StreamingError::Retryable(format!("Error downloading file: {err}")))
            .and_then(|res| {
                // Handle common HTTP errors.
                if res.status().is_server_error() {
                    Err(StreamingError::Retryable(format!(
                        "Server error ({}) downloading {}",
                        res.status().as_str(),
                        uri,
                    )))
                } else if res.status().is_client_error() {
                    Err(StreamingError::Permanent(format!(
                        "Client error ({}) downloading {}",
                        res.status().as_str(),
                        uri,
                    )))
                } else {
                    Ok(res)
                }
            })?;

        let expected_len = response.content_length().unwrap_or(0) as usize;
        let mut hasher = WriterHasher::new(
            digest_function,
            BytesMut::with_capacity(expected_len).writer(),
        );
        let mut stream = response.bytes_stream();
        while let Some(next_chunk) = stream.next().await {
            let chunk = next_chunk.map_err(|err| {
                StreamingError::Retryable(format!("Error reading URL fetch response: {err}"))
            })?;
            hasher.write_all(&chunk).map_err(|err| {
                StreamingError::Retryable(format!(
                    "Error hashing/capturing URL fetch response: {err}"
                ))
            })?;
        }
        let (digest, writer) = hasher.finish();
        Ok((digest, writer.into_inner().freeze()))
    }

    /// Download one URI with retries, verify it against the checksum, and
    /// place it in the CAS. Errors are per-URI: the caller moves on to the
    /// next URI.
    async fn download_uri(
        &self,
        instance_name: &str,
        uri: &str,
        headers: http::HeaderMap,
        digest_function: DigestFunction,
        expected_checksum: Option<&Checksum>,
    ) -> Result<Digest, String> {
        let mut attempt_number = 0;
        let retry_strategy =
            ExponentialFactorBackoff::from_millis(self.error_delay.as_millis() as u64, 2.0)
                .map(jitter)
                .take(self.max_attempts.get() - 1);
        let (digest, body) = Retry::spawn(retry_strategy, || {
            attempt_number += 1;
            log::debug!("Downloading {} (attempt #{})", uri, attempt_number);
            self.attempt_download(uri, headers.clone(), digest_function)
                .map_err(|err| {
                    log::debug!("Error while downloading {}: {}", uri, err);
                    match err {
                        StreamingError::Retryable(msg) => RetryError::transient(msg),
                        StreamingError::Permanent(msg) => RetryError::permanent(msg),
                    }
                })
        })
        .await?;

        if let Some(checksum) = expected_checksum {
            let matches = if checksum.function == digest_function {
                digest == checksum.digest_of(&body)
            } else {
                checksum.matches(&body)
            };
            if !matches {
                return Err(format!(
                    "Downloaded file did not match the expected checksum.sri hash ({}-…)",
                    checksum.function
                ));
            }
        }

        self.content_addressable_storage
            .put(instance_name, digest, body)
            .await
            .map_err(|err| format!("Failed to store fetched blob: {}", err.message()))?;
        Ok(digest)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        let instance_name = InstanceName::new(&request.instance_name)?;
        let expected_checksum = checksum_from_qualifiers(&request.qualifiers)?;
        // checksum.sri selects the digest function when the request leaves it
        // unset; an explicit request function wins.
        let digest_function = if request.digest_function == 0 {
            expected_checksum
                .as_ref()
                .map(|c| c.function)
                .unwrap_or_default()
        } else {
            protos::digest_function_from_proto(request.digest_function)
                .map_err(Status::invalid_argument)?
        };
        let auth_headers = AuthHeaders::from_qualifiers(&request.uris, &request.qualifiers)?;

        let mut failures = Vec::new();
        for uri in &request.uris {
            let headers = auth_headers.header_map(uri)?;
            match self
                .download_uri(
                    instance_name.as_str(),
                    uri,
                    headers,
                    digest_function,
                    expected_checksum.as_ref(),
                )
                .await
            {
                Ok(digest) => {
                    return Ok(FetchBlobResponse {
                        status: Some(status_ok("Blob fetched successfully!")),
                        uri: uri.clone(),
                        qualifiers: request.qualifiers,
                        expires_at: None,
                        blob_digest: Some(digest.into()),
                        digest_function: digest_function_to_proto(digest_function) as i32,
                    });
                }
                Err(err) => failures.push(format!("{uri}: {err}")),
            }
        }
        Err(Status::not_found(format!(
            "Unable to fetch blob from any of the URIs specified: {}",
            failures.join("; ")
        )))
    }

    async fn fetch_directory(
        &self,
        _request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        Err(Status::permission_denied(
            "HTTP Fetcher does not support directory fetching",
        ))
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        let supported =
            QualifierSet::from_names(["checksum.sri", "bazel.auth_headers", "bazel.canonical_id"]);
        qualifiers.difference_with(&supported, |name| {
            name.starts_with("http_header:") || name.starts_with("http_header_url:")
        })
    }
}
