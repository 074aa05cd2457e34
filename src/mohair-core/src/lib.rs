//! Partition data model for mohair.
//!
//! This crate provides the types that describe a partitioned table:
//!
//! - [`PartitionDomain`]: logical namespace that mints partitions
//! - [`PartitionMetadata`]: schema and layout descriptor of a partition
//! - [`PartitionSlice`]: an addressable chunk of row data
//! - [`Partition`]: domain + metadata + ordered slice collection
//!
//! # Lifecycle
//!
//! A partition is created EMPTY by [`PartitionDomain::partition_for`] and
//! becomes LOADED once [`Partition::load`] has set its schema, layout and
//! slices in a single step. Readers (including encoders) must only observe a
//! partition after it is loaded; share it behind an `Arc` once loading is done.
//!
//! ```rust
//! use std::sync::Arc;
//! use mohair_core::PartitionDomain;
//!
//! let domain = Arc::new(PartitionDomain::new("test"));
//! let partition = domain.partition_for("sample");
//!
//! assert_eq!(partition.name(), "test/sample");
//! assert!(!partition.is_loaded());
//! ```

mod domain;
mod metadata;
mod partition;
mod slice;

pub use domain::PartitionDomain;
pub use metadata::{
    PARTITION_COUNT_KEY, PartitionMetadata, STRIPE_SIZE_KEY, SchemaMetadata, encode_meta_key,
    encode_partition_count, encode_stripe_size,
};
pub use partition::Partition;
pub use slice::PartitionSlice;

/// Schema descriptor attached to partitions.
pub type SchemaDescriptor = arrow_schema::SchemaRef;
