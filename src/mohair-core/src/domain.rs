//! Partition domains.

use std::sync::Arc;

use crate::partition::Partition;

/// Logical namespace grouping the partitions of a dataset.
///
/// A domain's key is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionDomain {
    key: String,
}

impl PartitionDomain {
    /// Create a domain with the given namespace key.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The namespace key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mint an empty partition scoped to this domain.
    ///
    /// The partition has its metadata key set, no schema, and no slice
    /// collection.
    pub fn partition_for(self: &Arc<Self>, partition_key: impl Into<String>) -> Partition {
        Partition::new(Arc::clone(self), partition_key)
    }
}

impl Default for PartitionDomain {
    fn default() -> Self {
        Self::new("public")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain() {
        assert_eq!(PartitionDomain::default().key(), "public");
    }

    #[test]
    fn test_partition_for() {
        let domain = Arc::new(PartitionDomain::new("test"));
        let partition = domain.partition_for("sample");

        assert_eq!(partition.domain().key(), "test");
        assert_eq!(partition.meta().key(), "sample");
        assert!(partition.schema().is_none());
        assert!(partition.slices().is_none());
    }
}
