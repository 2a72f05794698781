// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! In-process implementations of the outbound `blobstore` traits, for tests:
//! a digest-verifying CAS, an action cache, and an execution client that
//! replays scripted responses. All of them count calls and can be switched
//! into an always-failing mode.

mod action_cache;
pub use action_cache::InMemoryActionCache;
mod blob_access;
pub use blob_access::InMemoryBlobAccess;
mod execution_client;
pub use execution_client::StubExecutionClient;
