// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse, Qualifier,
};
use qualifier::QualifierSet;
use tonic::{Code, Status};

use crate::{Fetcher, ValidatingFetcher};

use grpc_util::status_ok;

/// An inner fetcher that supports a fixed qualifier set and records calls.
struct SupportsFetcher {
    supported: QualifierSet,
    calls: AtomicUsize,
}

#[async_trait]
impl Fetcher for SupportsFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchBlobResponse {
            status: Some(status_ok("ok")),
            uri: request.uris[0].clone(),
            ..FetchBlobResponse::default()
        })
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchDirectoryResponse {
            status: Some(status_ok("ok")),
            uri: request.uris[0].clone(),
            ..FetchDirectoryResponse::default()
        })
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        qualifiers.difference(&self.supported)
    }
}

fn new_fixture(supported: &[&str]) -> (Arc<SupportsFetcher>, ValidatingFetcher) {
    let inner = Arc::new(SupportsFetcher {
        supported: QualifierSet::from_names(supported.iter().copied()),
        calls: AtomicUsize::new(0),
    });
    (inner.clone(), ValidatingFetcher::new(inner))
}

fn qualifier(name: &str, value: &str) -> Qualifier {
    Qualifier {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

#[tokio::test]
async fn rejects_requests_without_uris() {
    let (inner, fetcher) = new_fixture(&[]);

    let err = fetcher
        .fetch_blob(FetchBlobRequest::default())
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = fetcher
        .fetch_directory(FetchDirectoryRequest::default())
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);

    assert_eq!(inner.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rejects_unsupported_qualifiers() {
    let (inner, fetcher) = new_fixture(&["checksum.sri"]);

    let request = FetchBlobRequest {
        uris: vec!["https://example.com/x".to_owned()],
        qualifiers: vec![
            qualifier("checksum.sri", "sha256-deadbeef"),
            qualifier("vcs.branch", "main"),
        ],
        ..FetchBlobRequest::default()
    };
    let err = fetcher.fetch_blob(request).await.expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
    assert!(
        err.message().contains("vcs.branch"),
        "Bad error message: {}",
        err.message()
    );
    assert_eq!(inner.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn passes_valid_requests_through() {
    let (inner, fetcher) = new_fixture(&["checksum.sri"]);

    let request = FetchBlobRequest {
        uris: vec!["https://example.com/x".to_owned()],
        qualifiers: vec![qualifier("checksum.sri", "sha256-deadbeef")],
        ..FetchBlobRequest::default()
    };
    let response = fetcher.fetch_blob(request).await.unwrap();
    assert_eq!(response.status.unwrap().code, Code::Ok as i32);
    assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
}
