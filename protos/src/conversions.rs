// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use hashing::DigestFunction;

use crate::gen::build::bazel::remote::execution::v2 as remexec;
use remexec::digest_function;

impl<'a> From<&'a hashing::Digest> for remexec::Digest {
    fn from(d: &'a hashing::Digest) -> Self {
        Self {
            hash: d.hash.to_hex(),
            size_bytes: d.size_bytes as i64,
        }
    }
}

impl From<hashing::Digest> for remexec::Digest {
    fn from(d: hashing::Digest) -> Self {
        Self {
            hash: d.hash.to_hex(),
            size_bytes: d.size_bytes as i64,
        }
    }
}

impl<'a> TryFrom<&'a remexec::Digest> for hashing::Digest {
    type Error = String;

    fn try_from(d: &remexec::Digest) -> Result<Self, Self::Error> {
        hashing::Fingerprint::from_hex_string(&d.hash)
            .map_err(|err| format!("Bad fingerprint in Digest {:?}: {:?}", &d.hash, err))
            .map(|fingerprint| hashing::Digest::new(fingerprint, d.size_bytes as usize))
    }
}

impl TryFrom<remexec::Digest> for hashing::Digest {
    type Error = String;

    fn try_from(d: remexec::Digest) -> Result<Self, Self::Error> {
        hashing::Digest::try_from(&d)
    }
}

pub fn require_digest<'a, D: Into<Option<&'a remexec::Digest>>>(
    digest_opt: D,
) -> Result<hashing::Digest, String> {
    match digest_opt.into() {
        Some(digest) => hashing::Digest::try_from(digest),
        None => {
            Err("Protocol violation: Digest missing from a Remote Execution API protobuf.".into())
        }
    }
}

/// Convert the wire enum value into a supported digest function, without any
/// fallback for `UNKNOWN`.
pub fn digest_function_from_proto(value: i32) -> Result<DigestFunction, String> {
    match digest_function::Value::try_from(value) {
        Ok(digest_function::Value::Sha256) => Ok(DigestFunction::Sha256),
        Ok(digest_function::Value::Sha1) => Ok(DigestFunction::Sha1),
        Ok(digest_function::Value::Md5) => Ok(DigestFunction::Md5),
        Ok(digest_function::Value::Sha384) => Ok(DigestFunction::Sha384),
        Ok(digest_function::Value::Sha512) => Ok(DigestFunction::Sha512),
        Ok(digest_function::Value::Sha256tree) => Ok(DigestFunction::Sha256Tree),
        Ok(other) => Err(format!("Unsupported digest function: {other:?}")),
        Err(_) => Err(format!("Unrecognized digest function enum value: {value}")),
    }
}

pub fn digest_function_to_proto(function: DigestFunction) -> digest_function::Value {
    match function {
        DigestFunction::Sha256 => digest_function::Value::Sha256,
        DigestFunction::Sha1 => digest_function::Value::Sha1,
        DigestFunction::Md5 => digest_function::Value::Md5,
        DigestFunction::Sha384 => digest_function::Value::Sha384,
        DigestFunction::Sha512 => digest_function::Value::Sha512,
        DigestFunction::Sha256Tree => digest_function::Value::Sha256tree,
    }
}

/// The digest function selected by a fetch request. As per the API spec, an
/// unset function means SHA-256.
pub fn resolve_digest_function(value: i32) -> Result<DigestFunction, String> {
    if value == digest_function::Value::Unknown as i32 {
        return Ok(DigestFunction::default());
    }
    digest_function_from_proto(value)
}

/// The digest function selected by a push request. When the request leaves
/// the function unset, it is inferred from the length of the digest the
/// client sent.
pub fn resolve_push_digest_function(
    value: i32,
    sent_digest: Option<&remexec::Digest>,
) -> Result<DigestFunction, String> {
    if value != digest_function::Value::Unknown as i32 {
        return digest_function_from_proto(value);
    }
    let hash = sent_digest.map(|d| d.hash.as_str()).unwrap_or_default();
    if hash.is_empty() {
        return Ok(DigestFunction::default());
    }
    DigestFunction::from_hash_length(hash.len() / 2)
        .ok_or_else(|| format!("Cannot infer a digest function from hash {hash:?}"))
}
