// Message bindings for the internal asset storage schema, in the form emitted
// by `prost-build`. Field numbers are part of the storage format: stored
// references and assets must decode identically across server versions and
// implementations.

/// A canonical (URIs, qualifiers) key under which an asset is stored.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AssetReference {
    /// The URIs referring to the asset, sorted and deduplicated.
    #[prost(string, repeated, tag = "1")]
    pub uris: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    /// The qualifiers sub-specifying the asset, in canonical order.
    #[prost(message, repeated, tag = "2")]
    pub qualifiers:
        ::prost::alloc::vec::Vec<super::build::bazel::remote::asset::v1::Qualifier>,
}
/// The value bound to an AssetReference: the digest of the artifact in the
/// Content Addressable Storage, plus freshness metadata.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Asset {
    /// The digest of the artifact.
    #[prost(message, optional, tag = "1")]
    pub digest: ::core::option::Option<super::build::bazel::remote::execution::v2::Digest>,
    /// A time after which this asset should no longer be returned. Unset
    /// means the asset never expires.
    #[prost(message, optional, tag = "2")]
    pub expire_at: ::core::option::Option<::prost_types::Timestamp>,
    /// When the asset was last pushed or fetched.
    #[prost(message, optional, tag = "3")]
    pub last_updated: ::core::option::Option<::prost_types::Timestamp>,
    /// Whether the digest refers to a blob or a Directory message.
    #[prost(enumeration = "asset::AssetType", tag = "4")]
    pub r#type: i32,
}
/// Nested message and enum types in `Asset`.
pub mod asset {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum AssetType {
        /// The digest names an opaque byte object.
        Blob = 0,
        /// The digest names a Directory message forming the root of a tree.
        Directory = 1,
    }
}
