// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

use ::prost::Message;
use bytes::{Bytes, BytesMut};

/// Extension methods on `prost::Message`.
pub trait MessageExt: Message
where
    Self: Sized,
{
    /// The canonical encoding of this message, as `bytes::Bytes`.
    ///
    /// Reference and action digests are computed over these bytes, and they
    /// are what gets uploaded to the CAS when an `AssetReference`, `Action`,
    /// `Command`, `Directory`, or `Tree` is persisted, so the encoding is a
    /// storage format: prost emits fields in tag order, which keeps it
    /// deterministic across processes.
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf)
            .expect("encoding a message into a buffer sized by encoded_len cannot fail");
        buf.freeze()
    }
}

impl<M: ::prost::Message> MessageExt for M {}
