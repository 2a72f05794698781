// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use grpc_util::prost::MessageExt;
use hashing::{Digest, DigestFunction};
use prost::Message;

/// The digest of a proto message's canonical encoding. Prost encodes fields
/// in tag order, so the encoding is deterministic and digests computed here
/// are stable across processes and implementations.
pub fn message_digest<M: Message>(message: &M, digest_function: DigestFunction) -> Digest {
    digest_function.digest(&message.to_bytes())
}
