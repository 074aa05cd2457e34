//! Partition metadata and schema metadata encoding.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use common_error::{MohairError, MohairResult};

use crate::SchemaDescriptor;

/// Metadata key holding the number of slices in a partition.
pub const PARTITION_COUNT_KEY: &str = "partition_count";

/// Metadata key holding the stripe size of a partition.
pub const STRIPE_SIZE_KEY: &str = "stripe_size";

/// Byte-keyed schema metadata.
///
/// Iteration order is the lexicographic order of the key bytes.
pub type SchemaMetadata = BTreeMap<Vec<u8>, Vec<u8>>;

/// Encode a metadata key as UTF-8 bytes.
pub fn encode_meta_key(key_name: &str) -> Vec<u8> {
    key_name.as_bytes().to_vec()
}

/// Encode a partition count as an 8-byte big-endian value.
pub fn encode_partition_count(count: u64) -> Vec<u8> {
    count.to_be_bytes().to_vec()
}

/// Encode a stripe size as a single byte.
pub fn encode_stripe_size(stripe_size: u8) -> Vec<u8> {
    vec![stripe_size]
}

/// Schema and layout descriptor of a partition.
#[derive(Debug, Clone, Default)]
pub struct PartitionMetadata {
    key: String,
    schema: Option<SchemaDescriptor>,
    schema_meta: Option<SchemaMetadata>,
    slice_width: usize,
    slice_count: usize,
}

impl PartitionMetadata {
    /// Create metadata for the partition `key` with no schema and an empty layout.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Partition key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Schema, if one has been set.
    pub fn schema(&self) -> Option<&SchemaDescriptor> {
        self.schema.as_ref()
    }

    /// Schema metadata attached by [`Self::with_metadata`].
    pub fn schema_meta(&self) -> Option<&SchemaMetadata> {
        self.schema_meta.as_ref()
    }

    /// Number of columns per slice.
    pub fn slice_width(&self) -> usize {
        self.slice_width
    }

    /// Number of present slices.
    pub fn slice_count(&self) -> usize {
        self.slice_count
    }

    pub(crate) fn set_schema(&mut self, schema: SchemaDescriptor) {
        self.slice_width = schema.fields().len();
        self.schema = Some(schema);
    }

    pub(crate) fn set_slice_count(&mut self, slice_count: usize) {
        self.slice_count = slice_count;
    }

    /// Replace the schema metadata and return the schema augmented with it.
    ///
    /// The stored schema is left as is; the returned schema is a new value.
    /// Fails with `InvalidState` if no schema is set, and with `ValueError` if
    /// a key or value is not UTF-8 (Arrow schema metadata is string-keyed).
    /// Nothing is modified on failure.
    pub fn with_metadata(&mut self, new_meta: SchemaMetadata) -> MohairResult<SchemaDescriptor> {
        let Some(schema) = self.schema.as_ref() else {
            return Err(MohairError::invalid_state(format!(
                "cannot attach metadata to partition '{}' before its schema is set",
                self.key
            )));
        };

        let arrow_meta = to_arrow_metadata(&new_meta)?;
        let augmented = Arc::new(schema.as_ref().clone().with_metadata(arrow_meta));

        self.schema_meta = Some(new_meta);
        Ok(augmented)
    }
}

fn to_arrow_metadata(meta: &SchemaMetadata) -> MohairResult<HashMap<String, String>> {
    meta.iter()
        .map(|(key, value)| {
            let key = String::from_utf8(key.clone()).map_err(|e| {
                MohairError::value_error(format!("schema metadata key is not UTF-8: {e}"))
            })?;
            let value = String::from_utf8(value.clone()).map_err(|e| {
                MohairError::value_error(format!(
                    "schema metadata value for '{key}' is not UTF-8: {e}"
                ))
            })?;
            Ok((key, value))
        })
        .collect()
}
