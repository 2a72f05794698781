// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::Arc;

use hashing::DigestFunction;
use mock::{InMemoryActionCache, InMemoryBlobAccess};
use protos::gen::asset::asset::AssetType;
use protos::gen::build::bazel::remote::asset::v1::Qualifier;
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use remexec::command::OutputDirectoryFormat;
use testutil::{TestData, TestDirectory, TestTree};
use tonic::Code;

use crate::{
    ActionCacheAssetStore, AssetStore, message_digest, new_asset_reference, new_blob_asset,
    new_directory_asset,
};

const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

struct Fixture {
    action_cache: Arc<InMemoryActionCache>,
    cas: Arc<InMemoryBlobAccess>,
    store: ActionCacheAssetStore,
}

fn new_fixture() -> Fixture {
    let action_cache = Arc::new(InMemoryActionCache::new());
    let cas = Arc::new(InMemoryBlobAccess::new());
    let store = ActionCacheAssetStore::new(action_cache.clone(), cas.clone(), MAX_MESSAGE_SIZE);
    Fixture {
        action_cache,
        cas,
        store,
    }
}

fn qualifier(name: &str, value: &str) -> Qualifier {
    Qualifier {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

#[tokio::test]
async fn blob_round_trip() {
    let fixture = new_fixture();
    let reference = new_asset_reference(
        vec!["https://example.com/x.txt".to_owned()],
        vec![qualifier("checksum.sri", "sha256-deadbeef")],
    );
    let asset = new_blob_asset(TestData::hello().digest().into(), None);

    fixture
        .store
        .put("", &reference, &asset, DigestFunction::Sha256)
        .await
        .unwrap();
    let loaded = fixture
        .store
        .get("", &reference, DigestFunction::Sha256)
        .await
        .unwrap();

    assert_eq!(loaded.digest, asset.digest);
    assert_eq!(loaded.r#type, AssetType::Blob as i32);
    // last_updated survives the trip through ExecutedActionMetadata.
    assert_eq!(loaded.last_updated, asset.last_updated);
}

#[tokio::test]
async fn action_cache_key_encoding_is_stable() {
    // The action cache key must be derived exactly as other implementations
    // derive it: a Command listing the URIs, and an input root holding the
    // qualifier-only reference under the name "AssetReference".
    let fixture = new_fixture();
    let uris = vec![
        "https://a.example.com/x".to_owned(),
        "https://b.example.com/x".to_owned(),
    ];
    let qualifiers = vec![qualifier("bazel.canonical_id", "tag")];
    let reference = new_asset_reference(uris.clone(), qualifiers.clone());
    let asset = new_blob_asset(TestData::hello().digest().into(), None);

    fixture
        .store
        .put("", &reference, &asset, DigestFunction::Sha256)
        .await
        .unwrap();

    let qualifier_reference = new_asset_reference(Vec::new(), qualifiers);
    let input_root = remexec::Directory {
        files: vec![remexec::FileNode {
            name: "AssetReference".to_owned(),
            digest: Some(message_digest(&qualifier_reference, DigestFunction::Sha256).into()),
            ..remexec::FileNode::default()
        }],
        ..remexec::Directory::default()
    };
    let command = remexec::Command {
        arguments: uris,
        output_paths: vec!["out".to_owned()],
        output_directory_format: OutputDirectoryFormat::TreeAndDirectory as i32,
        ..remexec::Command::default()
    };
    let action = remexec::Action {
        command_digest: Some(message_digest(&command, DigestFunction::Sha256).into()),
        input_root_digest: Some(message_digest(&input_root, DigestFunction::Sha256).into()),
        ..remexec::Action::default()
    };
    let action_digest = message_digest(&action, DigestFunction::Sha256);

    let action_map = fixture.action_cache.action_map.lock();
    assert!(
        action_map.contains_key(&("".to_owned(), action_digest.hash)),
        "Action cache does not contain the expected key"
    );

    // Referential integrity: everything the entry refers to is in the CAS.
    for digest in [
        message_digest(&qualifier_reference, DigestFunction::Sha256),
        message_digest(&input_root, DigestFunction::Sha256),
        message_digest(&command, DigestFunction::Sha256),
        action_digest,
    ] {
        assert!(fixture.cas.contains("", digest), "CAS is missing {digest:?}");
    }
}

#[tokio::test]
async fn single_uri_key_uses_command_generator() {
    // With one URI and a recognized resource_type, the key command is the
    // same command a remote-execution fetch would run.
    let fixture = new_fixture();
    let qualifiers = vec![qualifier("resource_type", "application/x-git")];
    let reference = new_asset_reference(
        vec!["https://example.com/repo.git".to_owned()],
        qualifiers.clone(),
    );
    let asset = new_blob_asset(TestData::hello().digest().into(), None);
    fixture
        .store
        .put("", &reference, &asset, DigestFunction::Sha256)
        .await
        .unwrap();

    let generator = qualifier::qualifiers_to_command(&qualifiers).unwrap();
    let command = generator("https://example.com/repo.git");
    let command_digest: remexec::Digest = message_digest(&command, DigestFunction::Sha256).into();

    let qualifier_reference = new_asset_reference(Vec::new(), qualifiers);
    let input_root = remexec::Directory {
        files: vec![remexec::FileNode {
            name: "AssetReference".to_owned(),
            digest: Some(message_digest(&qualifier_reference, DigestFunction::Sha256).into()),
            ..remexec::FileNode::default()
        }],
        ..remexec::Directory::default()
    };
    let action = remexec::Action {
        command_digest: Some(command_digest),
        input_root_digest: Some(message_digest(&input_root, DigestFunction::Sha256).into()),
        ..remexec::Action::default()
    };
    let action_digest = message_digest(&action, DigestFunction::Sha256);
    let action_map = fixture.action_cache.action_map.lock();
    assert_eq!(action_map.len(), 1);
    assert!(
        action_map.contains_key(&("".to_owned(), action_digest.hash)),
        "Action cache key was not derived from the generated command"
    );
}

#[tokio::test]
async fn directory_round_trip_synthesizes_tree() {
    let fixture = new_fixture();

    // Seed the CAS with the directory protos the asset refers to.
    for directory in [
        TestDirectory::nested(),
        TestDirectory::containing_changelog(),
        TestDirectory::containing_license(),
    ] {
        fixture.cas.insert("", directory.digest(), directory.bytes());
    }

    let reference = new_asset_reference(vec!["https://example.com/tree.tar".to_owned()], vec![]);
    let asset = new_directory_asset(TestDirectory::nested().digest().into(), None);
    fixture
        .store
        .put("", &reference, &asset, DigestFunction::Sha256)
        .await
        .unwrap();

    // The synthesized Tree (root plus pre-order children) was uploaded.
    assert!(fixture.cas.contains("", TestTree::nested().digest()));

    let loaded = fixture
        .store
        .get("", &reference, DigestFunction::Sha256)
        .await
        .unwrap();
    assert_eq!(
        loaded.digest,
        Some(TestDirectory::nested().digest().into())
    );
    assert_eq!(loaded.r#type, AssetType::Directory as i32);
}

#[tokio::test]
async fn directory_put_with_unreadable_child_is_invalid() {
    let fixture = new_fixture();
    // Root is readable but its children are not in the CAS.
    let root = TestDirectory::nested();
    fixture.cas.insert("", root.digest(), root.bytes());

    let reference = new_asset_reference(vec!["https://example.com/tree.tar".to_owned()], vec![]);
    let asset = new_directory_asset(root.digest().into(), None);
    let err = fixture
        .store
        .put("", &reference, &asset, DigestFunction::Sha256)
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn get_prefers_root_directory_digest() {
    let fixture = new_fixture();
    let reference = new_asset_reference(vec!["https://example.com/x".to_owned()], vec![]);

    // Store an ActionResult carrying both an output directory and an output
    // file at "out"; the directory wins.
    let root_digest: remexec::Digest = TestDirectory::containing_changelog().digest().into();
    let action_result = remexec::ActionResult {
        output_directories: vec![remexec::OutputDirectory {
            path: "out".to_owned(),
            tree_digest: Some(TestTree::changelog_only().digest().into()),
            root_directory_digest: Some(root_digest.clone()),
            ..remexec::OutputDirectory::default()
        }],
        output_files: vec![remexec::OutputFile {
            path: "out".to_owned(),
            digest: Some(TestData::hello().digest().into()),
            ..remexec::OutputFile::default()
        }],
        ..remexec::ActionResult::default()
    };
    seed_action_result(&fixture, &reference, action_result);

    let loaded = fixture
        .store
        .get("", &reference, DigestFunction::Sha256)
        .await
        .unwrap();
    assert_eq!(loaded.digest, Some(root_digest));
    assert_eq!(loaded.r#type, AssetType::Directory as i32);
}

#[tokio::test]
async fn get_without_out_output_is_invalid() {
    let fixture = new_fixture();
    let reference = new_asset_reference(vec!["https://example.com/x".to_owned()], vec![]);
    let action_result = remexec::ActionResult {
        output_files: vec![remexec::OutputFile {
            path: "somewhere-else".to_owned(),
            digest: Some(TestData::hello().digest().into()),
            ..remexec::OutputFile::default()
        }],
        ..remexec::ActionResult::default()
    };
    seed_action_result(&fixture, &reference, action_result);

    let err = fixture
        .store
        .get("", &reference, DigestFunction::Sha256)
        .await
        .expect_err("Want err");
    assert_eq!(err.code(), Code::InvalidArgument);
}

/// Store `action_result` under the action cache key the store derives for
/// `reference`, without going through `put`.
fn seed_action_result(
    fixture: &Fixture,
    reference: &protos::gen::asset::AssetReference,
    action_result: remexec::ActionResult,
) {
    let qualifier_reference = new_asset_reference(Vec::new(), reference.qualifiers.clone());
    let input_root = remexec::Directory {
        files: vec![remexec::FileNode {
            name: "AssetReference".to_owned(),
            digest: Some(message_digest(&qualifier_reference, DigestFunction::Sha256).into()),
            ..remexec::FileNode::default()
        }],
        ..remexec::Directory::default()
    };
    let command = remexec::Command {
        arguments: reference.uris.clone(),
        output_paths: vec!["out".to_owned()],
        output_directory_format: OutputDirectoryFormat::TreeAndDirectory as i32,
        ..remexec::Command::default()
    };
    let action = remexec::Action {
        command_digest: Some(message_digest(&command, DigestFunction::Sha256).into()),
        input_root_digest: Some(message_digest(&input_root, DigestFunction::Sha256).into()),
        ..remexec::Action::default()
    };
    let action_digest = message_digest(&action, DigestFunction::Sha256);
    fixture
        .action_cache
        .action_map
        .lock()
        .insert(("".to_owned(), action_digest.hash), action_result);
}
