//! Substrait extension relations for mohair partitions.
//!
//! This crate lets a [`Partition`](mohair_core::Partition) appear as a leaf in
//! a Substrait plan without the plan consumer knowing anything about the
//! storage behind it:
//!
//! - [`ExtensionRelationEncoder`]: partition → `ExtensionLeafRel` carrying a packed [`SkyRel`]
//! - [`SkyTable`]: the table descriptor (`name()`, `schema()`, partition) a compiler sees
//! - [`TranslatorRegistry`]: explicit, type-keyed translator dispatch
//! - [`SubstraitCompiler`]: table descriptor → relation / plan
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arrow_schema::{DataType, Field, Schema};
//! use mohair_core::PartitionDomain;
//! use mohair_substrait::{SkyTable, SubstraitCompiler, decode_sky_rel, encode_partition};
//!
//! let mut partition = Arc::new(PartitionDomain::new("test")).partition_for("sample");
//! let schema = Arc::new(Schema::new(vec![Field::new("gene_id", DataType::Utf8, true)]));
//! partition.load(schema, vec![]);
//!
//! let rel = encode_partition(&partition)?;
//! assert_eq!(decode_sky_rel(&rel)?.partition, "sample");
//!
//! let plan = SubstraitCompiler::default().compile(&SkyTable::from(partition))?;
//! assert_eq!(plan.relations.len(), 1);
//! # Ok::<(), common_error::MohairError>(())
//! ```

mod compiler;
mod encoder;
mod explain;
pub mod proto;
mod registry;
mod table;

pub use compiler::SubstraitCompiler;
pub use encoder::{ExtensionRelationEncoder, decode_sky_rel, encode_partition};
pub use explain::{explain_plan, explain_rel};
pub use proto::mohair::{ExecutionStats, SKY_REL_TYPE_URL, SkyRel};
pub use proto::substrait::{Plan, Rel};
pub use registry::{
    Kwargs, RelTranslator, SkyRelTranslator, TranslatorRegistry, register_mohair_translators,
};
pub use table::{SkyTable, TableDescriptor};
