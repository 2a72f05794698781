// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

#![deny(unused_must_use)]
// See https://github.com/hyperium/tonic/issues/1056
#![allow(clippy::derive_partial_eq_without_eq)]

mod conversions;
pub use conversions::{
    digest_function_from_proto, digest_function_to_proto, require_digest,
    resolve_digest_function, resolve_push_digest_function,
};


pub mod gen {
    // NOTE: The nested module structure mirrors the proto packages because
    // the generated code refers to messages in other packages via `super`
    // chains (e.g., `super::super::execution::v2::Digest`).
    pub mod google {
        pub mod longrunning {
            include!("gen/google.longrunning.rs");
        }
        pub mod rpc {
            include!("gen/google.rpc.rs");
        }
    }
    pub mod build {
        pub mod bazel {
            pub mod remote {
                pub mod asset {
                    pub mod v1 {
                        include!("gen/build.bazel.remote.asset.v1.rs");
                    }
                }
                pub mod execution {
                    pub mod v2 {
                        include!("gen/build.bazel.remote.execution.v2.rs");
                    }
                }
            }
        }
    }
    pub mod asset {
        include!("gen/asset.rs");
    }
}
