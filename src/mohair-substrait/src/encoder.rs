//! Encoding partitions as Substrait extension leaf relations.
//!
//! A loaded [`Partition`] becomes a leaf [`Rel`]:
//!
//! ```text
//! Rel {
//!   extension_leaf: ExtensionLeafRel {
//!     common: RelCommon { direct: {} }
//!     detail: Any[SkyRel { domain, partition, slices, execstats { executed: false } }]
//!   }
//! }
//! ```
//!
//! Encoding reads the partition and nothing else: it is deterministic and may
//! run concurrently on a shared, fully loaded partition.

use log::trace;
use prost::Message;

use common_config::{EmptySlicePolicy, EncoderConfig};
use common_error::{MohairError, MohairResult, ensure};
use mohair_core::Partition;

use crate::proto::Any;
use crate::proto::mohair::{ExecutionStats, SKY_REL_TYPE_URL, SkyRel};
use crate::proto::substrait::{ExtensionLeafRel, Rel, RelCommon, rel, rel_common};

/// Builds extension leaf relations from loaded partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionRelationEncoder {
    empty_slices: EmptySlicePolicy,
}

impl ExtensionRelationEncoder {
    /// Create an encoder from configuration.
    pub fn new(config: &EncoderConfig) -> Self {
        Self {
            empty_slices: config.empty_slices,
        }
    }

    /// Encode `partition` as an extension leaf relation.
    ///
    /// Fails with `MissingSchema` if the partition has no schema and with
    /// `EmptyPartition` if it has no slice collection (or, under
    /// [`EmptySlicePolicy::Reject`], no present slices).
    pub fn encode(&self, partition: &Partition) -> MohairResult<Rel> {
        let sky_rel = self.sky_rel(partition)?;

        Ok(Rel {
            rel_type: Some(rel::RelType::ExtensionLeaf(ExtensionLeafRel {
                common: Some(RelCommon {
                    emit_kind: Some(rel_common::EmitKind::Direct(rel_common::Direct {})),
                    ..Default::default()
                }),
                detail: Some(Any {
                    type_url: SKY_REL_TYPE_URL.to_string(),
                    value: sky_rel.encode_to_vec(),
                }),
            })),
        })
    }

    /// Build the extension payload for `partition`.
    pub fn sky_rel(&self, partition: &Partition) -> MohairResult<SkyRel> {
        ensure!(
            partition.schema().is_some(),
            MissingSchema: "cannot encode partition '{partition}' without a schema"
        );
        ensure!(
            partition.slices().is_some(),
            EmptyPartition: "cannot encode partition '{partition}' without a slice collection"
        );

        let slices = partition
            .slice_indices()
            .map(|ndx| {
                i32::try_from(ndx).map_err(|_| {
                    MohairError::value_error(format!(
                        "slice index {ndx} of partition '{partition}' does not fit in int32"
                    ))
                })
            })
            .collect::<MohairResult<Vec<_>>>()?;

        ensure!(
            !slices.is_empty() || self.empty_slices == EmptySlicePolicy::Allow,
            EmptyPartition: "partition '{partition}' has no slices"
        );

        trace!("Encoding partition '{partition}' with slices {slices:?}");

        Ok(SkyRel {
            domain: partition.domain().key().to_string(),
            partition: partition.meta().key().to_string(),
            slices,
            execstats: Some(ExecutionStats { executed: false }),
        })
    }
}

/// Encode `partition` with the default encoder configuration.
pub fn encode_partition(partition: &Partition) -> MohairResult<Rel> {
    ExtensionRelationEncoder::default().encode(partition)
}

/// Unpack the [`SkyRel`] payload of an extension leaf relation.
///
/// Fails with `PayloadError` if `rel` is not an extension leaf, has no detail,
/// or carries a payload of another type.
pub fn decode_sky_rel(rel: &Rel) -> MohairResult<SkyRel> {
    let Some(rel::RelType::ExtensionLeaf(leaf)) = &rel.rel_type else {
        return Err(MohairError::payload("relation is not an extension leaf"));
    };
    let detail = leaf
        .detail
        .as_ref()
        .ok_or_else(|| MohairError::payload("extension leaf has no detail"))?;

    if detail.type_url != SKY_REL_TYPE_URL {
        return Err(MohairError::payload(format!(
            "expected detail of type '{SKY_REL_TYPE_URL}', found '{}'",
            detail.type_url
        )));
    }

    Ok(SkyRel::decode(detail.value.as_slice())?)
}
