//! Table descriptors handed to the plan compiler.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use common_error::{MohairError, MohairResult};
use mohair_core::{Partition, SchemaDescriptor};

/// A table node the compiler can translate into a relation.
///
/// The compiler reads `name()` and `schema()` to declare the relation's output,
/// and dispatches on the concrete type (via `as_any`) to find a translator.
pub trait TableDescriptor: fmt::Debug + Send + Sync {
    /// Table name.
    fn name(&self) -> String;

    /// Output schema.
    fn schema(&self) -> MohairResult<SchemaDescriptor>;

    /// The partition backing this table, if any.
    fn partition(&self) -> Option<&Partition> {
        None
    }

    /// Upcast for type-keyed dispatch.
    fn as_any(&self) -> &dyn Any;
}

/// Table view of a loaded partition.
///
/// Name, schema and encoded payload all come from the same shared partition,
/// so the declared schema cannot drift from what the encoder reads.
#[derive(Debug, Clone)]
pub struct SkyTable {
    partition: Arc<Partition>,
    name: String,
}

impl SkyTable {
    /// Wrap a partition.
    pub fn new(partition: Arc<Partition>) -> Self {
        let name = partition.name();
        Self { partition, name }
    }
}

impl From<Partition> for SkyTable {
    fn from(partition: Partition) -> Self {
        Self::new(Arc::new(partition))
    }
}

impl TableDescriptor for SkyTable {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn schema(&self) -> MohairResult<SchemaDescriptor> {
        self.partition.schema().cloned().ok_or_else(|| {
            MohairError::missing_schema(format!("table '{}' has no schema", self.name))
        })
    }

    fn partition(&self) -> Option<&Partition> {
        Some(&self.partition)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use arrow_schema::{DataType, Field, Schema};

    use mohair_core::PartitionDomain;

    use super::*;

    #[test]
    fn test_sky_table_surface() {
        let mut partition = Arc::new(PartitionDomain::new("test")).partition_for("sample");
        let schema = Arc::new(Schema::new(vec![Field::new("gene_id", DataType::Utf8, true)]));
        partition.load(schema.clone(), vec![]);

        let table = SkyTable::from(partition);
        assert_eq!(table.name(), "test/sample");
        assert_eq!(table.schema().unwrap(), schema);
        assert_eq!(table.partition().unwrap().meta().key(), "sample");
        assert!(table.as_any().downcast_ref::<SkyTable>().is_some());
    }

    #[test]
    fn test_sky_table_without_schema() {
        let partition = Arc::new(PartitionDomain::new("test")).partition_for("sample");
        let table = SkyTable::new(Arc::new(partition));

        assert_eq!(table.name(), "test/sample");
        assert!(matches!(table.schema(), Err(MohairError::MissingSchema(_))));
    }
}
