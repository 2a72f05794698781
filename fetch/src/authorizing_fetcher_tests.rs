// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use blobstore::StaticAuthorizer;
use protos::gen::build::bazel::remote::asset::v1::FetchBlobRequest;
use protos::gen::google::rpc;
use tonic::Code;

use crate::{AuthorizingFetcher, ErrorFetcher, Fetcher};

fn request() -> FetchBlobRequest {
    FetchBlobRequest {
        instance_name: "acme".to_owned(),
        uris: vec!["https://example.com/x".to_owned()],
        ..FetchBlobRequest::default()
    }
}

#[tokio::test]
async fn denial_short_circuits() {
    // The inner fetcher would return Internal; a denial must win, proving the
    // inner fetcher was never consulted.
    let inner = Arc::new(ErrorFetcher::new(rpc::Status {
        code: Code::Internal as i32,
        message: "inner fetcher reached".to_owned(),
        ..rpc::Status::default()
    }));
    let fetcher = AuthorizingFetcher::new(inner, Arc::new(StaticAuthorizer::new(false)));

    let err = fetcher.fetch_blob(request()).await.expect_err("Want err");
    assert_eq!(err.code(), Code::PermissionDenied);
}

#[tokio::test]
async fn allowed_requests_reach_the_inner_fetcher() {
    let inner = Arc::new(ErrorFetcher::new(rpc::Status {
        code: Code::Internal as i32,
        message: "inner fetcher reached".to_owned(),
        ..rpc::Status::default()
    }));
    let fetcher = AuthorizingFetcher::new(inner, Arc::new(StaticAuthorizer::new(true)));

    let err = fetcher.fetch_blob(request()).await.expect_err("Want err");
    assert_eq!(err.code(), Code::Internal);
    assert_eq!(err.message(), "inner fetcher reached");
}

#[tokio::test]
async fn invalid_instance_name_is_rejected() {
    let inner = Arc::new(ErrorFetcher::unconfigured());
    let fetcher = AuthorizingFetcher::new(inner, Arc::new(StaticAuthorizer::new(true)));

    let mut bad = request();
    bad.instance_name = "acme//ci".to_owned();
    let err = fetcher.fetch_blob(bad).await.expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
}
