// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use digest::DynDigest;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest as Sha256Digest, Sha256, Sha384, Sha512};

pub const EMPTY_FINGERPRINT: Fingerprint = Fingerprint {
    bytes: [
        0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9,
        0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52,
        0xb8, 0x55, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ],
    len: 32,
};
pub const EMPTY_DIGEST: Digest = Digest {
    hash: EMPTY_FINGERPRINT,
    size_bytes: 0,
};

pub const MAX_FINGERPRINT_SIZE: usize = 64;

/// The hash part of a Digest.
///
/// Remote Asset API requests select a digest function per request, so unlike a
/// store that is configured for a single hash function, a Fingerprint here may
/// be anywhere from 16 bytes (MD5) to 64 bytes (SHA-512) long. The backing
/// array is fixed-size with the tail zeroed, so the type stays `Copy` and the
/// derived equality/ordering/hashing remain correct.
#[derive(Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Fingerprint {
    bytes: [u8; MAX_FINGERPRINT_SIZE],
    len: u8,
}

fn is_valid_hash_length(len: usize) -> bool {
    matches!(len, 16 | 20 | 32 | 48 | 64)
}

impl Fingerprint {
    pub fn from_bytes_unsafe(bytes: &[u8]) -> Fingerprint {
        if !is_valid_hash_length(bytes.len()) {
            panic!(
                "Input value was not a fingerprint; had length: {}",
                bytes.len()
            );
        }

        let mut fingerprint = [0; MAX_FINGERPRINT_SIZE];
        fingerprint[..bytes.len()].clone_from_slice(bytes);
        Fingerprint {
            bytes: fingerprint,
            len: bytes.len() as u8,
        }
    }

    pub fn from_hex_string(hex_string: &str) -> Result<Fingerprint, String> {
        let bytes = hex::decode(hex_string).map_err(|e| format!("{e:?}"))?;
        if !is_valid_hash_length(bytes.len()) {
            return Err(format!(
                "Unrecognized fingerprint length: {} bytes",
                bytes.len()
            ));
        }
        Ok(Fingerprint::from_bytes_unsafe(&bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn to_hex(&self) -> String {
        let mut s = String::new();
        for &byte in self.as_bytes() {
            fmt::Write::write_fmt(&mut s, format_args!("{byte:02x}")).unwrap();
        }
        s
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint<{}>", self.to_hex())
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl FromStr for Fingerprint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fingerprint::from_hex_string(s)
    }
}

impl TryFrom<&str> for Fingerprint {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Fingerprint::from_hex_string(s)
    }
}

///
/// A Digest is a fingerprint, as well as the size in bytes of the plaintext for which that is the
/// fingerprint.
///
/// It is equivalent to a Bazel Remote Execution Digest, but without the overhead (and awkward API)
/// of needing to create an entire protobuf to pass around the two fields.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Digest {
    pub hash: Fingerprint,
    pub size_bytes: usize,
}

impl Digest {
    pub fn new(hash: Fingerprint, size_bytes: usize) -> Digest {
        Digest { hash, size_bytes }
    }

    /// The SHA-256 digest of `bytes`. Use `DigestFunction::digest` when the
    /// hash function is selected by a request.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        DigestFunction::Sha256.digest(bytes)
    }
}

/// The hash functions admitted by the Remote Execution API.
///
/// SHA256TREE hashes content as a binary Merkle tree of SHA-256 over
/// 1024-byte chunks; its fingerprints are the same length as SHA-256's.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DigestFunction {
    /// The Remote Execution API default when a request leaves the function
    /// unset.
    #[default]
    Sha256,
    Sha1,
    Md5,
    Sha384,
    Sha512,
    Sha256Tree,
}

impl DigestFunction {
    /// The length of this function's fingerprints, in bytes.
    pub fn hash_length(&self) -> usize {
        match self {
            DigestFunction::Md5 => 16,
            DigestFunction::Sha1 => 20,
            DigestFunction::Sha256 | DigestFunction::Sha256Tree => 32,
            DigestFunction::Sha384 => 48,
            DigestFunction::Sha512 => 64,
        }
    }

    /// Infer the digest function from the length of a hash, in bytes. Where
    /// lengths collide (SHA256 vs SHA256TREE) the non-chunked function wins.
    pub fn from_hash_length(len: usize) -> Option<DigestFunction> {
        match len {
            16 => Some(DigestFunction::Md5),
            20 => Some(DigestFunction::Sha1),
            32 => Some(DigestFunction::Sha256),
            48 => Some(DigestFunction::Sha384),
            64 => Some(DigestFunction::Sha512),
            _ => None,
        }
    }

    pub fn hash(&self, bytes: &[u8]) -> Fingerprint {
        let mut hasher = Hasher::new(*self);
        hasher.update(bytes);
        hasher.finish().hash
    }

    pub fn digest(&self, bytes: &[u8]) -> Digest {
        let mut hasher = Hasher::new(*self);
        hasher.update(bytes);
        hasher.finish()
    }

    pub fn empty_digest(&self) -> Digest {
        self.digest(&[])
    }
}

impl fmt::Display for DigestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DigestFunction::Sha256 => "sha256",
            DigestFunction::Sha1 => "sha1",
            DigestFunction::Md5 => "md5",
            DigestFunction::Sha384 => "sha384",
            DigestFunction::Sha512 => "sha512",
            DigestFunction::Sha256Tree => "sha256tree",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DigestFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(DigestFunction::Sha256),
            "sha1" => Ok(DigestFunction::Sha1),
            "md5" => Ok(DigestFunction::Md5),
            "sha384" => Ok(DigestFunction::Sha384),
            "sha512" => Ok(DigestFunction::Sha512),
            "sha256tree" => Ok(DigestFunction::Sha256Tree),
            other => Err(format!("Unknown digest function: {other:?}")),
        }
    }
}

const SHA256TREE_CHUNK_SIZE: usize = 1024;

/// Incremental SHA256TREE state: hashes of the completed chunks, plus the
/// bytes of the final partial chunk.
struct TreeHasher {
    chunk: Vec<u8>,
    chunk_hashes: Vec<[u8; 32]>,
}

impl TreeHasher {
    fn new() -> TreeHasher {
        TreeHasher {
            chunk: Vec::with_capacity(SHA256TREE_CHUNK_SIZE),
            chunk_hashes: Vec::new(),
        }
    }

    fn update(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            let wanted = SHA256TREE_CHUNK_SIZE - self.chunk.len();
            let taken = wanted.min(bytes.len());
            self.chunk.extend_from_slice(&bytes[..taken]);
            bytes = &bytes[taken..];
            if self.chunk.len() == SHA256TREE_CHUNK_SIZE {
                self.chunk_hashes.push(Sha256::digest(&self.chunk).into());
                self.chunk.clear();
            }
        }
    }

    fn finish(mut self) -> Fingerprint {
        if !self.chunk.is_empty() || self.chunk_hashes.is_empty() {
            self.chunk_hashes.push(Sha256::digest(&self.chunk).into());
        }
        let mut level = self.chunk_hashes;
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for pair in level.chunks(2) {
                if let [left, right] = pair {
                    let mut hasher = Sha256::new();
                    digest::Digest::update(&mut hasher, left);
                    digest::Digest::update(&mut hasher, right);
                    next.push(hasher.finalize().into());
                } else {
                    // Odd node is promoted to the next level unchanged.
                    next.push(pair[0]);
                }
            }
            level = next;
        }
        Fingerprint::from_bytes_unsafe(&level[0])
    }
}

enum HasherImpl {
    Dynamic(Box<dyn DynDigest + Send>),
    Tree(TreeHasher),
}

/// An incremental hasher for a chosen digest function.
pub struct Hasher {
    imp: HasherImpl,
    byte_count: usize,
}

impl Hasher {
    pub fn new(function: DigestFunction) -> Hasher {
        let imp = match function {
            DigestFunction::Sha256 => HasherImpl::Dynamic(Box::new(Sha256::default())),
            DigestFunction::Sha1 => HasherImpl::Dynamic(Box::new(Sha1::default())),
            DigestFunction::Md5 => HasherImpl::Dynamic(Box::new(Md5::default())),
            DigestFunction::Sha384 => HasherImpl::Dynamic(Box::new(Sha384::default())),
            DigestFunction::Sha512 => HasherImpl::Dynamic(Box::new(Sha512::default())),
            DigestFunction::Sha256Tree => HasherImpl::Tree(TreeHasher::new()),
        };
        Hasher { imp, byte_count: 0 }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        match &mut self.imp {
            HasherImpl::Dynamic(hasher) => hasher.update(bytes),
            HasherImpl::Tree(hasher) => hasher.update(bytes),
        }
        self.byte_count += bytes.len();
    }

    pub fn finish(self) -> Digest {
        let fingerprint = match self.imp {
            HasherImpl::Dynamic(hasher) => Fingerprint::from_bytes_unsafe(&hasher.finalize()),
            HasherImpl::Tree(hasher) => hasher.finish(),
        };
        Digest::new(fingerprint, self.byte_count)
    }
}

///
/// A Write instance that fingerprints all data that passes through it.
///
pub struct WriterHasher<T> {
    hasher: Hasher,
    inner: T,
}

impl<T> WriterHasher<T> {
    pub fn new(function: DigestFunction, inner: T) -> WriterHasher<T> {
        WriterHasher {
            hasher: Hasher::new(function),
            inner: inner,
        }
    }

    ///
    /// Returns the result of fingerprinting this stream, and Drops the stream.
    ///
    pub fn finish(self) -> (Digest, T) {
        (self.hasher.finish(), self.inner)
    }
}

impl<W: Write> Write for WriterHasher<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        // Hash the bytes that were successfully written.
        self.hasher.update(&buf[0..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod fingerprint_tests;


#[cfg(test)]
mod hasher_tests;
