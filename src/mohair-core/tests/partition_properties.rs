//! Property tests for the partition data model.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use proptest::prelude::*;

use mohair_core::{Partition, PartitionDomain, PartitionSlice, SchemaDescriptor};

fn schema() -> SchemaDescriptor {
    Arc::new(Schema::new(vec![Field::new("v", DataType::Int32, false)]))
}

fn batch(value: i32) -> RecordBatch {
    let values: ArrayRef = Arc::new(Int32Array::from(vec![value]));
    RecordBatch::try_new(schema(), vec![values]).unwrap()
}

/// Load a partition whose collection has a hole wherever `present` is false.
fn sparse_partition(present: &[bool]) -> Partition {
    let mut partition = Arc::new(PartitionDomain::new("d")).partition_for("p");
    let slices = present
        .iter()
        .enumerate()
        .map(|(ndx, keep)| {
            keep.then(|| PartitionSlice::new(ndx, partition.slice_key(ndx), batch(ndx as i32)))
        })
        .collect();
    partition.load_slices(schema(), slices).unwrap();
    partition
}

proptest! {
    #[test]
    fn prop_name_joins_domain_and_partition(domain in "[a-z0-9_]{1,16}", key in "[a-z0-9_]{1,16}") {
        let partition = Arc::new(PartitionDomain::new(domain.clone())).partition_for(key.clone());
        prop_assert_eq!(partition.name(), format!("{domain}/{key}"));
    }

    #[test]
    fn prop_slice_indices_match_present_entries(present in prop::collection::vec(any::<bool>(), 0..32)) {
        let partition = sparse_partition(&present);

        let expected: Vec<usize> = present
            .iter()
            .enumerate()
            .filter_map(|(ndx, keep)| keep.then_some(ndx))
            .collect();

        prop_assert_eq!(partition.slice_indices().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(partition.meta().slice_count(), expected.len());
    }

    #[test]
    fn prop_removal_never_shifts(nslices in 1usize..16, remove in any::<prop::sample::Index>()) {
        let mut partition = Arc::new(PartitionDomain::new("d")).partition_for("p");
        partition.load(schema(), (0..nslices).map(|ndx| batch(ndx as i32)));

        let target = remove.index(nslices);
        partition.remove_slice(target).unwrap();

        prop_assert_eq!(partition.slices().unwrap().len(), nslices);
        prop_assert_eq!(partition.meta().slice_count(), nslices - 1);
        for ndx in partition.slice_indices() {
            prop_assert_ne!(ndx, target);
            prop_assert_eq!(partition.slice(ndx).unwrap().key(), format!("d/p;{ndx}"));
        }
    }

    #[test]
    fn prop_identity_ignores_slice_data(a in 0usize..8, b in 0usize..8) {
        let domain = Arc::new(PartitionDomain::new("d"));
        let mut left = domain.partition_for("p");
        let mut right = domain.partition_for("p");
        left.load(schema(), (0..a).map(|ndx| batch(ndx as i32)));
        right.load(schema(), (0..b).map(|ndx| batch(-(ndx as i32))));

        prop_assert_eq!(&left, &right);

        let mut set = HashSet::new();
        set.insert(left);
        prop_assert!(set.contains(&right));
    }
}

#[test]
fn test_partitions_from_distinct_domains_differ() {
    let a = Arc::new(PartitionDomain::new("a")).partition_for("p");
    let b = Arc::new(PartitionDomain::new("b")).partition_for("p");

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 2);
}
