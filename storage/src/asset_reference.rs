// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use hashing::{Digest, DigestFunction};
use protos::gen::asset::AssetReference;
use protos::gen::build::bazel::remote::asset::v1::Qualifier;

use crate::message_digest;

/// Create the canonical AssetReference for a URI set and qualifier set: URIs
/// sorted and deduplicated, qualifiers in canonical order. Equivalent inputs
/// always serialize identically, which makes the reference digest usable as a
/// storage key.
pub fn new_asset_reference(
    mut uris: Vec<String>,
    mut qualifiers: Vec<Qualifier>,
) -> AssetReference {
    uris.sort();
    uris.dedup();
    qualifier::sort_qualifiers(&mut qualifiers);
    AssetReference { uris, qualifiers }
}

/// The digest of a canonical AssetReference, used as its storage key.
pub fn asset_reference_digest(
    reference: &AssetReference,
    digest_function: DigestFunction,
) -> Digest {
    message_digest(reference, digest_function)
}
