// This file contains the message bindings for build.bazel.remote.asset.v1
// (remote_asset.proto), in the form emitted by `prost-build`.

/// Qualifiers are used to disambiguate or sub-select content that shares a
/// URI. This may include specifying a particular commit or branch, in the
/// case of URIs referencing a repository; or specifying a particular target
/// and configuration to select an artifact from a URI referencing multiple
/// artifacts.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Qualifier {
    /// The "name" of the qualifier, for example "resource_type".
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    /// The "value" of the qualifier. Semantics will be dictated by the name.
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}
/// A request message for \[Fetch.FetchBlob\].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchBlobRequest {
    /// The instance of the execution system to operate against.
    #[prost(string, tag = "1")]
    pub instance_name: ::prost::alloc::string::String,
    /// The timeout for the underlying fetch, if content needs to be retrieved
    /// from origin.
    #[prost(message, optional, tag = "2")]
    pub timeout: ::core::option::Option<::prost_types::Duration>,
    /// The oldest content the client is willing to accept, as measured from
    /// the time it was last updated.
    #[prost(message, optional, tag = "3")]
    pub oldest_content_accepted: ::core::option::Option<::prost_types::Timestamp>,
    /// The URI(s) of the content to fetch. These may be resources that the
    /// server can directly fetch from origin, in which case multiple URIs
    /// SHOULD represent the same content available at different locations.
    #[prost(string, repeated, tag = "4")]
    pub uris: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Qualifiers sub-specifying the content to fetch.
    #[prost(message, repeated, tag = "5")]
    pub qualifiers: ::prost::alloc::vec::Vec<Qualifier>,
    /// The digest function the server must use to compute the blob digest.
    #[prost(
        enumeration = "super::super::execution::v2::digest_function::Value",
        tag = "6"
    )]
    pub digest_function: i32,
}
/// A response message for \[Fetch.FetchBlob\].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchBlobResponse {
    /// If the status has a code other than `OK`, it indicates that the
    /// operation was unable to be completed for reasons outside the servers'
    /// control.
    #[prost(message, optional, tag = "1")]
    pub status: ::core::option::Option<super::super::super::super::super::google::rpc::Status>,
    /// The uri from the request that resulted in a successful retrieval, or
    /// from which the error indicated in `status` was obtained.
    #[prost(string, tag = "2")]
    pub uri: ::prost::alloc::string::String,
    /// Any qualifiers known to the server and of interest to clients.
    #[prost(message, repeated, tag = "3")]
    pub qualifiers: ::prost::alloc::vec::Vec<Qualifier>,
    /// A minimum timestamp the content is expected to be available through.
    #[prost(message, optional, tag = "4")]
    pub expires_at: ::core::option::Option<::prost_types::Timestamp>,
    /// The result of the fetch, if the status had code `OK`.
    #[prost(message, optional, tag = "5")]
    pub blob_digest: ::core::option::Option<super::super::execution::v2::Digest>,
    /// The digest function of the blob digest.
    #[prost(
        enumeration = "super::super::execution::v2::digest_function::Value",
        tag = "6"
    )]
    pub digest_function: i32,
}
/// A request message for \[Fetch.FetchDirectory\].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchDirectoryRequest {
    /// The instance of the execution system to operate against.
    #[prost(string, tag = "1")]
    pub instance_name: ::prost::alloc::string::String,
    /// The timeout for the underlying fetch, if content needs to be retrieved
    /// from origin.
    #[prost(message, optional, tag = "2")]
    pub timeout: ::core::option::Option<::prost_types::Duration>,
    /// The oldest content the client is willing to accept, as measured from
    /// the time it was last updated.
    #[prost(message, optional, tag = "3")]
    pub oldest_content_accepted: ::core::option::Option<::prost_types::Timestamp>,
    /// The URI(s) of the content to fetch.
    #[prost(string, repeated, tag = "4")]
    pub uris: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Qualifiers sub-specifying the content to fetch.
    #[prost(message, repeated, tag = "5")]
    pub qualifiers: ::prost::alloc::vec::Vec<Qualifier>,
    /// The digest function the server must use to compute all digests.
    #[prost(
        enumeration = "super::super::execution::v2::digest_function::Value",
        tag = "6"
    )]
    pub digest_function: i32,
}
/// A response message for \[Fetch.FetchDirectory\].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FetchDirectoryResponse {
    /// If the status has a code other than `OK`, it indicates that the
    /// operation was unable to be completed for reasons outside the servers'
    /// control.
    #[prost(message, optional, tag = "1")]
    pub status: ::core::option::Option<super::super::super::super::super::google::rpc::Status>,
    /// The uri from the request that resulted in a successful retrieval, or
    /// from which the error indicated in `status` was obtained.
    #[prost(string, tag = "2")]
    pub uri: ::prost::alloc::string::String,
    /// Any qualifiers known to the server and of interest to clients.
    #[prost(message, repeated, tag = "3")]
    pub qualifiers: ::prost::alloc::vec::Vec<Qualifier>,
    /// A minimum timestamp the content is expected to be available through.
    #[prost(message, optional, tag = "4")]
    pub expires_at: ::core::option::Option<::prost_types::Timestamp>,
    /// The result of the fetch, if the status had code `OK`.
    #[prost(message, optional, tag = "5")]
    pub root_directory_digest: ::core::option::Option<super::super::execution::v2::Digest>,
    /// The digest function of the root directory digest.
    #[prost(
        enumeration = "super::super::execution::v2::digest_function::Value",
        tag = "6"
    )]
    pub digest_function: i32,
}
/// A request message for \[Push.PushBlob\].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PushBlobRequest {
    /// The instance of the execution system to operate against.
    #[prost(string, tag = "1")]
    pub instance_name: ::prost::alloc::string::String,
    /// The URI(s) of the content to associate.
    #[prost(string, repeated, tag = "2")]
    pub uris: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Qualifiers sub-specifying the content that is being pushed.
    #[prost(message, repeated, tag = "3")]
    pub qualifiers: ::prost::alloc::vec::Vec<Qualifier>,
    /// A time after which this content should stop being returned via
    /// \[FetchBlob\].
    #[prost(message, optional, tag = "4")]
    pub expire_at: ::core::option::Option<::prost_types::Timestamp>,
    /// The blob to associate.
    #[prost(message, optional, tag = "5")]
    pub blob_digest: ::core::option::Option<super::super::execution::v2::Digest>,
    /// Referenced blobs needed by the blob.
    #[prost(message, repeated, tag = "6")]
    pub references_blobs: ::prost::alloc::vec::Vec<super::super::execution::v2::Digest>,
    /// Referenced directories needed by the blob.
    #[prost(message, repeated, tag = "7")]
    pub references_directories: ::prost::alloc::vec::Vec<super::super::execution::v2::Digest>,
    /// The digest function that was used to compute the blob digest.
    #[prost(
        enumeration = "super::super::execution::v2::digest_function::Value",
        tag = "8"
    )]
    pub digest_function: i32,
}
/// A response message for \[Push.PushBlob\].
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PushBlobResponse {}
/// A request message for \[Push.PushDirectory\].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PushDirectoryRequest {
    /// The instance of the execution system to operate against.
    #[prost(string, tag = "1")]
    pub instance_name: ::prost::alloc::string::String,
    /// The URI(s) of the content to associate.
    #[prost(string, repeated, tag = "2")]
    pub uris: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// Qualifiers sub-specifying the content that is being pushed.
    #[prost(message, repeated, tag = "3")]
    pub qualifiers: ::prost::alloc::vec::Vec<Qualifier>,
    /// A time after which this content should stop being returned via
    /// \[FetchDirectory\].
    #[prost(message, optional, tag = "4")]
    pub expire_at: ::core::option::Option<::prost_types::Timestamp>,
    /// The root directory to associate.
    #[prost(message, optional, tag = "5")]
    pub root_directory_digest: ::core::option::Option<super::super::execution::v2::Digest>,
    /// Referenced blobs needed by the directory.
    #[prost(message, repeated, tag = "6")]
    pub references_blobs: ::prost::alloc::vec::Vec<super::super::execution::v2::Digest>,
    /// Referenced directories needed by the directory.
    #[prost(message, repeated, tag = "7")]
    pub references_directories: ::prost::alloc::vec::Vec<super::super::execution::v2::Digest>,
    /// The digest function that was used to compute the root directory digest.
    #[prost(
        enumeration = "super::super::execution::v2::digest_function::Value",
        tag = "8"
    )]
    pub digest_function: i32,
}
/// A response message for \[Push.PushDirectory\].
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PushDirectoryResponse {}
