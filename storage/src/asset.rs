// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::time::{SystemTime, UNIX_EPOCH};

use prost_types::Timestamp;
use protos::gen::asset::{Asset, asset::AssetType};
use protos::gen::build::bazel::remote::execution::v2 as remexec;

/// The current wall-clock time as a proto Timestamp.
pub fn now_timestamp() -> Timestamp {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Timestamp {
        seconds: now.as_secs() as i64,
        nanos: now.subsec_nanos() as i32,
    }
}

/// Whether `a` is strictly before `b`.
pub fn timestamp_is_before(a: &Timestamp, b: &Timestamp) -> bool {
    (a.seconds, a.nanos) < (b.seconds, b.nanos)
}

/// Create an Asset binding value for `digest`, stamped with the current time.
/// An unset `expire_at` means the asset never expires.
pub fn new_asset(
    digest: remexec::Digest,
    asset_type: AssetType,
    expire_at: Option<Timestamp>,
) -> Asset {
    Asset {
        digest: Some(digest),
        expire_at,
        last_updated: Some(now_timestamp()),
        r#type: asset_type as i32,
    }
}

pub fn new_blob_asset(digest: remexec::Digest, expire_at: Option<Timestamp>) -> Asset {
    new_asset(digest, AssetType::Blob, expire_at)
}

pub fn new_directory_asset(digest: remexec::Digest, expire_at: Option<Timestamp>) -> Asset {
    new_asset(digest, AssetType::Directory, expire_at)
}
