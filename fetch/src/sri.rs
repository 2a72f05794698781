// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hashing::{Digest, DigestFunction, Fingerprint};
use protos::gen::build::bazel::remote::asset::v1::Qualifier;
use tonic::Status;

/// A parsed `checksum.sri` qualifier: a Subresource Integrity string of the
/// form `<algo>-<base64-hash>`. It both verifies downloads and, when the
/// request does not name one, selects the digest function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checksum {
    pub function: DigestFunction,
    pub fingerprint: Fingerprint,
}

impl Checksum {
    pub fn parse(sri: &str) -> Result<Checksum, Status> {
        let (algorithm, encoded) = sri.split_once('-').ok_or_else(|| {
            Status::invalid_argument(format!("Malformed checksum.sri value: {sri:?}"))
        })?;
        let function: DigestFunction = algorithm.parse().map_err(|err| {
            Status::invalid_argument(format!("Unsupported checksum.sri algorithm: {err}"))
        })?;
        let decoded = STANDARD.decode(encoded).map_err(|err| {
            Status::invalid_argument(format!(
                "Cannot decode checksum.sri hash {encoded:?}: {err}"
            ))
        })?;
        if decoded.len() != function.hash_length() {
            return Err(Status::invalid_argument(format!(
                "checksum.sri hash is {} bytes long, but {algorithm} hashes are {} bytes",
                decoded.len(),
                function.hash_length()
            )));
        }
        Ok(Checksum {
            function,
            fingerprint: Fingerprint::from_bytes_unsafe(&decoded),
        })
    }

    /// Whether `body` hashes to the expected fingerprint.
    pub fn matches(&self, body: &[u8]) -> bool {
        self.function.hash(body) == self.fingerprint
    }

    /// The digest `body` would have under this checksum's function.
    pub fn digest_of(&self, body: &[u8]) -> Digest {
        Digest::new(self.fingerprint, body.len())
    }
}

/// Extract the checksum from a request's qualifiers. More than one
/// `checksum.sri` qualifier is an error.
pub fn checksum_from_qualifiers(qualifiers: &[Qualifier]) -> Result<Option<Checksum>, Status> {
    let mut values = qualifiers.iter().filter(|q| q.name == "checksum.sri");
    match (values.next(), values.next()) {
        (None, _) => Ok(None),
        (Some(value), None) => Checksum::parse(&value.value).map(Some),
        (Some(_), Some(_)) => Err(Status::invalid_argument(
            "Multiple checksum.sri qualifiers specified",
        )),
    }
}
