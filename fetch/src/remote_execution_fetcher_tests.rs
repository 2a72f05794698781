// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use hashing::DigestFunction;
use mock::{InMemoryBlobAccess, StubExecutionClient};
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchDirectoryRequest, Qualifier,
};
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use protos::require_digest;
use qualifier::QualifierSet;
use storage::message_digest;
use testutil::{TestData, TestDirectory, TestTree};
use tonic::Code;

use crate::{Fetcher, RemoteExecutionFetcher};

const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

fn qualifier(name: &str, value: &str) -> Qualifier {
    Qualifier {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

fn octet_stream_qualifiers() -> Vec<Qualifier> {
    vec![qualifier("resource_type", "application/octet-stream")]
}

fn blob_action_result(path: &str, digest: hashing::Digest) -> remexec::ExecuteResponse {
    remexec::ExecuteResponse {
        result: Some(remexec::ActionResult {
            output_files: vec![remexec::OutputFile {
                path: path.to_owned(),
                digest: Some(digest.into()),
                ..remexec::OutputFile::default()
            }],
            exit_code: 0,
            ..remexec::ActionResult::default()
        }),
        ..remexec::ExecuteResponse::default()
    }
}

#[tokio::test]
async fn fetch_blob_executes_generated_command() {
    let cas = Arc::new(InMemoryBlobAccess::new());
    let execution = Arc::new(StubExecutionClient::new(vec![blob_action_result(
        "out",
        TestData::hello().digest(),
    )]));
    let fetcher = RemoteExecutionFetcher::new(cas.clone(), execution.clone(), MAX_MESSAGE_SIZE);

    let uri = "https://example.com/x.bin";
    let response = fetcher
        .fetch_blob(FetchBlobRequest {
            uris: vec![uri.to_owned()],
            qualifiers: octet_stream_qualifiers(),
            ..FetchBlobRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(response.status.unwrap().code, Code::Ok as i32);
    assert_eq!(response.uri, uri);
    assert_eq!(
        response.blob_digest,
        Some(TestData::hello().digest().into())
    );

    // The Action executed refers to the command the qualifiers generate, and
    // both protos were uploaded for the execution service to read.
    let generator = qualifier::qualifiers_to_command(&octet_stream_qualifiers()).unwrap();
    let command = generator(uri);
    let action = remexec::Action {
        command_digest: Some(message_digest(&command, DigestFunction::Sha256).into()),
        input_root_digest: Some(DigestFunction::Sha256.empty_digest().into()),
        ..remexec::Action::default()
    };
    let action_digest = message_digest(&action, DigestFunction::Sha256);
    let requests = execution.requests.lock();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        require_digest(requests[0].action_digest.as_ref()).unwrap(),
        action_digest
    );
    assert!(cas.contains("", action_digest));
    assert!(cas.contains("", message_digest(&command, DigestFunction::Sha256)));
}

#[tokio::test]
async fn fetch_blob_tries_next_uri_on_nonzero_exit() {
    let cas = Arc::new(InMemoryBlobAccess::new());
    let failed = remexec::ExecuteResponse {
        result: Some(remexec::ActionResult {
            exit_code: 1,
            ..remexec::ActionResult::default()
        }),
        ..remexec::ExecuteResponse::default()
    };
    let execution = Arc::new(StubExecutionClient::new(vec![
        failed,
        blob_action_result("out", TestData::hello().digest()),
    ]));
    let fetcher = RemoteExecutionFetcher::new(cas, execution.clone(), MAX_MESSAGE_SIZE);

    let response = fetcher
        .fetch_blob(FetchBlobRequest {
            uris: vec![
                "https://a.example.com/x".to_owned(),
                "https://b.example.com/x".to_owned(),
            ],
            qualifiers: octet_stream_qualifiers(),
            ..FetchBlobRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(response.uri, "https://b.example.com/x");
    assert_eq!(execution.requests.lock().len(), 2);
}

#[tokio::test]
async fn fetch_blob_with_all_uris_failing_is_not_found() {
    let failed = remexec::ExecuteResponse {
        result: Some(remexec::ActionResult {
            exit_code: 1,
            ..remexec::ActionResult::default()
        }),
        ..remexec::ExecuteResponse::default()
    };
    let execution = Arc::new(StubExecutionClient::new(vec![failed]));
    let fetcher = RemoteExecutionFetcher::new(
        Arc::new(InMemoryBlobAccess::new()),
        execution,
        MAX_MESSAGE_SIZE,
    );

    let err = fetcher
        .fetch_blob(FetchBlobRequest {
            uris: vec!["https://example.com/x".to_owned()],
            qualifiers: octet_stream_qualifiers(),
            ..FetchBlobRequest::default()
        })
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::NotFound);
}

#[tokio::test]
async fn fetch_blob_without_resource_type_is_invalid() {
    let execution = Arc::new(StubExecutionClient::new(vec![]));
    let fetcher = RemoteExecutionFetcher::new(
        Arc::new(InMemoryBlobAccess::new()),
        execution,
        MAX_MESSAGE_SIZE,
    );

    let err = fetcher
        .fetch_blob(FetchBlobRequest {
            uris: vec!["https://example.com/x".to_owned()],
            ..FetchBlobRequest::default()
        })
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn fetch_blob_finding_a_directory_is_aborted() {
    let response = remexec::ExecuteResponse {
        result: Some(remexec::ActionResult {
            output_directories: vec![remexec::OutputDirectory {
                path: "out".to_owned(),
                tree_digest: Some(TestTree::nested().digest().into()),
                ..remexec::OutputDirectory::default()
            }],
            exit_code: 0,
            ..remexec::ActionResult::default()
        }),
        ..remexec::ExecuteResponse::default()
    };
    let execution = Arc::new(StubExecutionClient::new(vec![response]));
    let fetcher = RemoteExecutionFetcher::new(
        Arc::new(InMemoryBlobAccess::new()),
        execution,
        MAX_MESSAGE_SIZE,
    );

    let err = fetcher
        .fetch_blob(FetchBlobRequest {
            uris: vec!["https://example.com/x".to_owned()],
            qualifiers: octet_stream_qualifiers(),
            ..FetchBlobRequest::default()
        })
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::Aborted);
}

#[tokio::test]
async fn fetch_directory_returns_root_directory_digest() {
    let cas = Arc::new(InMemoryBlobAccess::new());
    // The execution service produced a Tree; only the Tree is in the CAS.
    let tree = TestTree::nested();
    cas.insert("", tree.digest(), tree.bytes());

    let response = remexec::ExecuteResponse {
        result: Some(remexec::ActionResult {
            output_directories: vec![remexec::OutputDirectory {
                path: "out".to_owned(),
                tree_digest: Some(tree.digest().into()),
                ..remexec::OutputDirectory::default()
            }],
            exit_code: 0,
            ..remexec::ActionResult::default()
        }),
        ..remexec::ExecuteResponse::default()
    };
    let execution = Arc::new(StubExecutionClient::new(vec![response]));
    let fetcher = RemoteExecutionFetcher::new(cas.clone(), execution, MAX_MESSAGE_SIZE);

    let response = fetcher
        .fetch_directory(FetchDirectoryRequest {
            uris: vec!["https://example.com/repo".to_owned()],
            qualifiers: vec![qualifier("resource_type", "application/x-git")],
            ..FetchDirectoryRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(
        response.root_directory_digest,
        Some(TestDirectory::nested().digest().into())
    );
    // The root and every child Directory are now addressable standalone.
    for directory in [
        TestDirectory::nested(),
        TestDirectory::containing_changelog(),
        TestDirectory::containing_license(),
    ] {
        assert!(cas.contains("", directory.digest()));
    }
}

#[test]
fn check_qualifiers_supported_set() {
    let fetcher = RemoteExecutionFetcher::new(
        Arc::new(InMemoryBlobAccess::new()),
        Arc::new(StubExecutionClient::new(vec![])),
        MAX_MESSAGE_SIZE,
    );
    let unsupported = fetcher.check_qualifiers(QualifierSet::from_names([
        "resource_type",
        "vcs.branch",
        "vcs.commit",
        "auth.basic.username",
        "auth.basic.password",
        "checksum.sri",
        "http_header:Accept",
    ]));
    assert_eq!(
        unsupported.sorted_names(),
        vec!["http_header:Accept".to_owned()]
    );
}
