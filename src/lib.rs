//! Mohair - Substrait extension relations for partitioned Arrow tables
//!
//! Mohair lets a partition held by a storage service appear as a leaf in a
//! portable Substrait plan. The plan consumer sees an `ExtensionLeafRel` whose
//! opaque payload names the domain, partition and slices to read.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export workspace crates
pub use common_config as config;
pub use common_error as error;
pub use mohair_core as core;
pub use mohair_substrait as substrait;

pub use common_error::{MohairError, MohairResult};
pub use mohair_core::{Partition, PartitionDomain, PartitionMetadata, PartitionSlice};
pub use mohair_substrait::{SkyTable, SubstraitCompiler, encode_partition};

/// Mohair version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
