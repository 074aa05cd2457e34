//! Partitions: the unit extension relations are built from.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use arrow_array::RecordBatch;
use log::debug;

use common_error::{MohairResult, ensure};

use crate::SchemaDescriptor;
use crate::domain::PartitionDomain;
use crate::metadata::PartitionMetadata;
use crate::slice::PartitionSlice;

/// A named, schema-bearing subdivision of a domain, split into slices.
///
/// Identity is content-independent: two partitions are equal (and hash
/// identically) iff their domain keys and partition keys are equal, whatever
/// slices they hold.
///
/// The slice collection is `None` until the partition is loaded. Once loaded it
/// may contain holes (`None` entries) left by [`Partition::remove_slice`];
/// removal never shifts the remaining slices.
#[derive(Debug)]
pub struct Partition {
    domain: Arc<PartitionDomain>,
    meta: PartitionMetadata,
    slices: Option<Vec<Option<PartitionSlice>>>,
}

impl Partition {
    pub(crate) fn new(domain: Arc<PartitionDomain>, partition_key: impl Into<String>) -> Self {
        Self {
            domain,
            meta: PartitionMetadata::new(partition_key),
            slices: None,
        }
    }

    /// The domain this partition belongs to.
    pub fn domain(&self) -> &PartitionDomain {
        &self.domain
    }

    /// Partition metadata.
    pub fn meta(&self) -> &PartitionMetadata {
        &self.meta
    }

    /// Mutable partition metadata, for attaching schema metadata.
    pub fn meta_mut(&mut self) -> &mut PartitionMetadata {
        &mut self.meta
    }

    /// `"{domain}/{partition}"`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.domain.key(), self.meta.key())
    }

    /// The partition schema, if loaded.
    pub fn schema(&self) -> Option<&SchemaDescriptor> {
        self.meta.schema()
    }

    /// The slice collection, including holes. `None` if never loaded.
    pub fn slices(&self) -> Option<&[Option<PartitionSlice>]> {
        self.slices.as_deref()
    }

    /// The present slice with the given slice index.
    pub fn slice(&self, slice_index: usize) -> Option<&PartitionSlice> {
        self.present_slices()
            .find(|slice| slice.slice_index() == slice_index)
    }

    /// Present slices, in collection order.
    pub fn present_slices(&self) -> impl Iterator<Item = &PartitionSlice> + '_ {
        self.slices.iter().flatten().flatten()
    }

    /// Slice indices of every present slice, in collection order.
    ///
    /// The sequence is not sorted: callers wanting `0..N` must insert slices in
    /// that order.
    pub fn slice_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.present_slices().map(PartitionSlice::slice_index)
    }

    /// Key of the slice at `slice_index`: `"{domain}/{partition};{slice_index}"`.
    pub fn slice_key(&self, slice_index: usize) -> String {
        format!("{};{slice_index}", self.name())
    }

    /// Whether the partition has a schema and a slice collection.
    pub fn is_loaded(&self) -> bool {
        self.meta.schema().is_some() && self.slices.is_some()
    }

    /// Set the schema and slice width, leaving the slice collection as is.
    ///
    /// Prefer [`Self::load`], which sets everything in one step.
    pub fn set_schema(&mut self, schema: SchemaDescriptor) {
        self.meta.set_schema(schema);
    }

    /// Load the partition from row batches.
    ///
    /// Batch `i` becomes the slice with index `i`, keyed by [`Self::slice_key`].
    /// Schema, slice width, slice count and slices are replaced together, and
    /// any previous schema metadata is kept. Batches are not checked against
    /// `schema`.
    pub fn load(&mut self, schema: SchemaDescriptor, batches: impl IntoIterator<Item = RecordBatch>) {
        let slices: Vec<_> = batches
            .into_iter()
            .enumerate()
            .map(|(ndx, batch)| Some(PartitionSlice::new(ndx, self.slice_key(ndx), batch)))
            .collect();

        self.install(schema, slices);
    }

    /// Load the partition from an explicit slice collection, which may be sparse.
    ///
    /// Fails with `InvalidState`, leaving the partition untouched, if two
    /// present slices share a slice index.
    pub fn load_slices(
        &mut self,
        schema: SchemaDescriptor,
        slices: Vec<Option<PartitionSlice>>,
    ) -> MohairResult<()> {
        let mut seen = HashSet::new();
        for slice in slices.iter().flatten() {
            ensure!(
                seen.insert(slice.slice_index()),
                format!(
                    "partition '{}' has duplicate slice index {}",
                    self.name(),
                    slice.slice_index()
                )
            );
        }

        self.install(schema, slices);
        Ok(())
    }

    fn install(&mut self, schema: SchemaDescriptor, slices: Vec<Option<PartitionSlice>>) {
        let present = slices.iter().flatten().count();

        self.meta.set_schema(schema);
        self.meta.set_slice_count(present);
        self.slices = Some(slices);

        debug!(
            "Loaded partition '{}': {} slice(s), width {}",
            self.name(),
            present,
            self.meta.slice_width()
        );
    }

    /// Remove the slice with `slice_index`, leaving a hole in its place.
    ///
    /// Returns the removed slice, or `None` if no present slice has that index.
    pub fn remove_slice(&mut self, slice_index: usize) -> Option<PartitionSlice> {
        let entry = self
            .slices
            .as_mut()?
            .iter_mut()
            .find(|entry| matches!(entry, Some(slice) if slice.slice_index() == slice_index))?;

        let removed = entry.take();
        self.meta
            .set_slice_count(self.meta.slice_count().saturating_sub(1));
        removed
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.domain.key() == other.domain.key() && self.meta.key() == other.meta.key()
    }
}

impl Eq for Partition {}

impl Hash for Partition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.key().hash(state);
        self.meta.key().hash(state);
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain.key(), self.meta.key())
    }
}
