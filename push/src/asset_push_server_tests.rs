// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::HashSet;
use std::sync::Arc;

use blobstore::InstanceName;
use hashing::DigestFunction;
use mock::InMemoryBlobAccess;
use prost_types::Timestamp;
use protos::gen::asset::asset::AssetType;
use protos::gen::build::bazel::remote::asset::v1::{PushBlobRequest, PushDirectoryRequest};
use storage::{AssetStore, BlobAccessAssetStore, new_asset_reference};
use testutil::{TestData, TestDirectory};
use tonic::Code;

use crate::{AssetPushServer, PushServer};

struct Fixture {
    asset_store: Arc<BlobAccessAssetStore>,
    server: AssetPushServer,
}

fn new_fixture(allowed: &[&str]) -> Fixture {
    let asset_store = Arc::new(BlobAccessAssetStore::new(
        Arc::new(InMemoryBlobAccess::new_keyed()),
        16 * 1024 * 1024,
    ));
    let allow_updates_for_instances: HashSet<InstanceName> = allowed
        .iter()
        .map(|name| InstanceName::new(name).unwrap())
        .collect();
    let server = AssetPushServer::new(asset_store.clone(), allow_updates_for_instances);
    Fixture {
        asset_store,
        server,
    }
}

#[tokio::test]
async fn push_blob_writes_set_and_per_uri_bindings() {
    let fixture = new_fixture(&["ok"]);
    let uris = vec![
        "https://a.example.com/x".to_owned(),
        "https://b.example.com/x".to_owned(),
    ];
    fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "ok".to_owned(),
            uris: uris.clone(),
            blob_digest: Some(TestData::hello().digest().into()),
            ..PushBlobRequest::default()
        })
        .await
        .unwrap();

    let expected_references = [
        new_asset_reference(uris.clone(), vec![]),
        new_asset_reference(vec![uris[0].clone()], vec![]),
        new_asset_reference(vec![uris[1].clone()], vec![]),
    ];
    for reference in &expected_references {
        let asset = fixture
            .asset_store
            .get("ok", reference, DigestFunction::Sha256)
            .await
            .unwrap();
        assert_eq!(asset.digest, Some(TestData::hello().digest().into()));
        assert_eq!(asset.r#type, AssetType::Blob as i32);
    }
}

#[tokio::test]
async fn push_blob_single_uri_writes_one_binding() {
    let fixture = new_fixture(&["ok"]);
    fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "ok".to_owned(),
            uris: vec!["https://a.example.com/x".to_owned()],
            blob_digest: Some(TestData::hello().digest().into()),
            ..PushBlobRequest::default()
        })
        .await
        .unwrap();

    let reference = new_asset_reference(vec!["https://a.example.com/x".to_owned()], vec![]);
    fixture
        .asset_store
        .get("ok", &reference, DigestFunction::Sha256)
        .await
        .unwrap();
}

#[tokio::test]
async fn push_blob_to_non_whitelisted_instance_is_denied() {
    let fixture = new_fixture(&["ok"]);
    let err = fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "nope".to_owned(),
            uris: vec!["https://a.example.com/x".to_owned()],
            blob_digest: Some(TestData::hello().digest().into()),
            ..PushBlobRequest::default()
        })
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::PermissionDenied);
}

#[tokio::test]
async fn push_blob_without_uris_is_invalid() {
    let fixture = new_fixture(&["ok"]);
    let err = fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "ok".to_owned(),
            blob_digest: Some(TestData::hello().digest().into()),
            ..PushBlobRequest::default()
        })
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn push_blob_with_bad_instance_name_is_invalid() {
    let fixture = new_fixture(&["ok"]);
    let err = fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "ok//ci".to_owned(),
            uris: vec!["https://a.example.com/x".to_owned()],
            blob_digest: Some(TestData::hello().digest().into()),
            ..PushBlobRequest::default()
        })
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn push_blob_infers_digest_function_from_hash_length() {
    let fixture = new_fixture(&["ok"]);
    let sha1_digest = DigestFunction::Sha1.digest(b"Hello");
    fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "ok".to_owned(),
            uris: vec!["https://a.example.com/x".to_owned()],
            blob_digest: Some(sha1_digest.into()),
            ..PushBlobRequest::default()
        })
        .await
        .unwrap();

    let reference = new_asset_reference(vec!["https://a.example.com/x".to_owned()], vec![]);
    // The binding lives in the SHA-1 keyspace.
    fixture
        .asset_store
        .get("ok", &reference, DigestFunction::Sha1)
        .await
        .unwrap();
    fixture
        .asset_store
        .get("ok", &reference, DigestFunction::Sha256)
        .await
        .expect_err("Want err");
}

#[tokio::test]
async fn push_blob_passes_expire_at_through() {
    let fixture = new_fixture(&["ok"]);
    let expire_at = Timestamp {
        seconds: 4_102_444_800,
        nanos: 0,
    };
    fixture
        .server
        .push_blob(PushBlobRequest {
            instance_name: "ok".to_owned(),
            uris: vec!["https://a.example.com/x".to_owned()],
            blob_digest: Some(TestData::hello().digest().into()),
            expire_at: Some(expire_at),
            ..PushBlobRequest::default()
        })
        .await
        .unwrap();

    let reference = new_asset_reference(vec!["https://a.example.com/x".to_owned()], vec![]);
    let asset = fixture
        .asset_store
        .get("ok", &reference, DigestFunction::Sha256)
        .await
        .unwrap();
    assert_eq!(asset.expire_at, Some(expire_at));
}

#[tokio::test]
async fn push_directory_writes_directory_binding() {
    let fixture = new_fixture(&["ok"]);
    fixture
        .server
        .push_directory(PushDirectoryRequest {
            instance_name: "ok".to_owned(),
            uris: vec!["https://a.example.com/tree".to_owned()],
            root_directory_digest: Some(TestDirectory::nested().digest().into()),
            ..PushDirectoryRequest::default()
        })
        .await
        .unwrap();

    let reference = new_asset_reference(vec!["https://a.example.com/tree".to_owned()], vec![]);
    let asset = fixture
        .asset_store
        .get("ok", &reference, DigestFunction::Sha256)
        .await
        .unwrap();
    assert_eq!(
        asset.digest,
        Some(TestDirectory::nested().digest().into())
    );
    assert_eq!(asset.r#type, AssetType::Directory as i32);
}
