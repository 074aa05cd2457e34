//! Sample schema, partition population and plan output.

use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::info;
use prost::Message;

use common_error::MohairResult;
use mohair_core::{
    PARTITION_COUNT_KEY, Partition, STRIPE_SIZE_KEY, SchemaMetadata, encode_meta_key,
    encode_partition_count, encode_stripe_size,
};
use mohair_substrait::Plan;

/// Schema of the sample expression data.
pub fn sample_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("gene_id", DataType::Utf8, true),
        Field::new("cell_id", DataType::Utf8, true),
        Field::new("expression", DataType::Float32, true),
    ]))
}

/// Schema metadata recording the slice count and a stripe size of one.
pub fn sample_metadata(slice_count: usize) -> SchemaMetadata {
    SchemaMetadata::from([
        (
            encode_meta_key(PARTITION_COUNT_KEY),
            encode_partition_count(slice_count as u64),
        ),
        (encode_meta_key(STRIPE_SIZE_KEY), encode_stripe_size(1)),
    ])
}

/// Replace the contents of `partition` with `batches`, one slice per batch.
///
/// Returns the partition schema augmented with [`sample_metadata`].
pub fn set_partition_data(
    partition: &mut Partition,
    batches: Vec<RecordBatch>,
) -> MohairResult<SchemaRef> {
    let schema = batches
        .first()
        .map(RecordBatch::schema)
        .unwrap_or_else(sample_schema);

    partition.load(schema, batches);
    let slice_count = partition.meta().slice_count();
    partition.meta_mut().with_metadata(sample_metadata(slice_count))
}

/// Serialize `plan` to `path`, returning the number of bytes written.
pub fn write_plan(plan: &Plan, path: impl AsRef<Path>) -> MohairResult<usize> {
    let bytes = plan.encode_to_vec();
    std::fs::write(path.as_ref(), &bytes)?;

    info!("Wrote {} byte plan to {}", bytes.len(), path.as_ref().display());
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mohair_core::PartitionDomain;

    use super::*;

    #[test]
    fn test_sample_metadata() {
        let meta = sample_metadata(4);

        assert_eq!(meta[b"partition_count".as_slice()], vec![0, 0, 0, 0, 0, 0, 0, 4]);
        assert_eq!(meta[b"stripe_size".as_slice()], vec![1]);
    }

    #[test]
    fn test_set_partition_data_without_batches() {
        let mut partition = Arc::new(PartitionDomain::new("test")).partition_for("sample");

        let schema = set_partition_data(&mut partition, Vec::new()).unwrap();
        assert!(partition.is_loaded());
        assert_eq!(partition.meta().slice_count(), 0);
        assert_eq!(partition.meta().slice_width(), 3);
        assert_eq!(schema.metadata()["partition_count"].as_bytes(), &[0u8; 8]);
    }
}
