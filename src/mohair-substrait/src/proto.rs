//! Protobuf messages carried in compiled plans.
//!
//! [`substrait`] is the Substrait algebra from the `substrait` crate. [`mohair`]
//! holds the extension payload packed into an extension leaf's `detail`.

pub use prost_types::Any;

/// Substrait plan and relation messages.
pub use ::substrait::proto as substrait;

/// Mohair extension payloads.
pub mod mohair {
    /// Type URL [`SkyRel`] is packed under.
    pub const SKY_REL_TYPE_URL: &str = "type.googleapis.com/mohair.SkyRel";

    /// Logical read of a partition held by a storage service.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SkyRel {
        #[prost(string, tag = "1")]
        pub domain: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub partition: ::prost::alloc::string::String,
        #[prost(int32, repeated, tag = "3")]
        pub slices: ::prost::alloc::vec::Vec<i32>,
        #[prost(message, optional, tag = "4")]
        pub execstats: ::core::option::Option<ExecutionStats>,
    }

    /// Whether a relation has been executed downstream.
    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct ExecutionStats {
        #[prost(bool, tag = "1")]
        pub executed: bool,
    }
}
