// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use hashing::DigestFunction;
use protos::gen::build::bazel::remote::asset::v1::Qualifier;

use crate::{asset_reference_digest, new_asset_reference};

fn qualifier(name: &str, value: &str) -> Qualifier {
    Qualifier {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

#[test]
fn creation_sorts_qualifiers() {
    let qualifiers = vec![
        qualifier("foo", "bar"),
        qualifier("bar", "foo"),
        qualifier("foo", "bap"),
    ];
    let sorted_qualifiers = vec![
        qualifier("bar", "foo"),
        qualifier("foo", "bap"),
        qualifier("foo", "bar"),
    ];

    let reference = new_asset_reference(vec!["uri".to_owned()], qualifiers);
    assert_eq!(reference.qualifiers, sorted_qualifiers);
    let sorted_reference = new_asset_reference(vec!["uri".to_owned()], sorted_qualifiers);
    assert_eq!(sorted_reference, reference);
}

#[test]
fn creation_sorts_and_dedupes_uris() {
    let reference = new_asset_reference(
        vec![
            "https://b.example.com".to_owned(),
            "https://a.example.com".to_owned(),
            "https://b.example.com".to_owned(),
        ],
        vec![],
    );
    assert_eq!(
        reference.uris,
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn digest_is_canonical() {
    let a = new_asset_reference(
        vec!["https://b.example.com".to_owned(), "https://a.example.com".to_owned()],
        vec![qualifier("foo", "bar"), qualifier("bar", "foo")],
    );
    let b = new_asset_reference(
        vec![
            "https://a.example.com".to_owned(),
            "https://b.example.com".to_owned(),
            "https://a.example.com".to_owned(),
        ],
        vec![qualifier("bar", "foo"), qualifier("foo", "bar")],
    );
    assert_eq!(
        asset_reference_digest(&a, DigestFunction::Sha256),
        asset_reference_digest(&b, DigestFunction::Sha256)
    );

    let c = new_asset_reference(
        vec!["https://a.example.com".to_owned(), "https://b.example.com".to_owned()],
        vec![qualifier("bar", "foo"), qualifier("foo", "baz")],
    );
    assert_ne!(
        asset_reference_digest(&a, DigestFunction::Sha256),
        asset_reference_digest(&c, DigestFunction::Sha256)
    );
}

#[test]
fn digest_depends_on_digest_function() {
    let reference = new_asset_reference(vec!["https://a.example.com".to_owned()], vec![]);
    let sha256 = asset_reference_digest(&reference, DigestFunction::Sha256);
    let sha1 = asset_reference_digest(&reference, DigestFunction::Sha1);
    assert_ne!(sha256.hash, sha1.hash);
    assert_eq!(sha256.size_bytes, sha1.size_bytes);
}
