//! Partition slices.

use arrow_array::RecordBatch;

use common_error::{MohairError, MohairResult};

/// An independently addressable, contiguous chunk of a partition's rows.
///
/// Each slice exclusively owns its payload, so slices are not `Clone`: a
/// cloned `RecordBatch` shares its buffers.
#[derive(Debug)]
pub struct PartitionSlice {
    slice_index: usize,
    key: String,
    data: Option<RecordBatch>,
}

impl PartitionSlice {
    /// Create a slice holding `data`.
    pub fn new(slice_index: usize, key: impl Into<String>, data: RecordBatch) -> Self {
        Self {
            slice_index,
            key: key.into(),
            data: Some(data),
        }
    }

    /// Create a slice with no payload attached yet.
    pub fn without_data(slice_index: usize, key: impl Into<String>) -> Self {
        Self {
            slice_index,
            key: key.into(),
            data: None,
        }
    }

    /// Position of this slice within its partition.
    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    /// Globally addressable key, `"{domain}/{partition};{index}"` by convention.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The row payload, if attached.
    pub fn data(&self) -> Option<&RecordBatch> {
        self.data.as_ref()
    }

    /// Number of rows in the payload.
    pub fn num_rows(&self) -> MohairResult<usize> {
        Ok(self.payload()?.num_rows())
    }

    /// Number of columns in the payload.
    pub fn num_columns(&self) -> MohairResult<usize> {
        Ok(self.payload()?.num_columns())
    }

    fn payload(&self) -> MohairResult<&RecordBatch> {
        self.data.as_ref().ok_or_else(|| {
            MohairError::invalid_state(format!("slice '{}' has no data attached", self.key))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow_array::{ArrayRef, Float32Array, StringArray};

    use super::*;

    fn batch(rows: usize) -> RecordBatch {
        let genes: ArrayRef = Arc::new(StringArray::from(vec!["g"; rows]));
        let exprs: ArrayRef = Arc::new(Float32Array::from(vec![1.0f32; rows]));
        RecordBatch::try_from_iter(vec![("gene_id", genes), ("expression", exprs)]).unwrap()
    }

    #[test]
    fn test_dimensions_delegate_to_payload() {
        let slice = PartitionSlice::new(2, "test/sample;2", batch(5));

        assert_eq!(slice.slice_index(), 2);
        assert_eq!(slice.key(), "test/sample;2");
        assert_eq!(slice.num_rows().unwrap(), 5);
        assert_eq!(slice.num_columns().unwrap(), 2);
    }

    #[test]
    fn test_dimensions_without_payload_fail() {
        let slice = PartitionSlice::without_data(0, "test/sample;0");

        assert!(slice.data().is_none());
        assert!(matches!(slice.num_rows(), Err(MohairError::InvalidState(_))));
        assert!(matches!(
            slice.num_columns(),
            Err(MohairError::InvalidState(_))
        ));
    }
}
