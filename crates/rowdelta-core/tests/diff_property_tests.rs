//! Diff Property Tests
//!
//! Generated start/end tables checked against a straightforward model of
//! the classification rules.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::snapshot;
use proptest::prelude::*;
use rowdelta_core::{diff_snapshots, ChangeType, RawValue, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

type Table = BTreeMap<i64, (i64, String)>;

fn table_strategy() -> impl Strategy<Value = Table> {
    prop::collection::btree_map(0i64..20, (0i64..3, "[ab]{0,2}"), 0..12)
}

fn to_snapshot(table: &Table) -> Snapshot {
    let rows = table
        .iter()
        .map(|(id, (n, s))| vec![RawValue::Int(*id), RawValue::Int(*n), RawValue::from(s.as_str())])
        .collect();
    snapshot("t", &["id", "n", "s"], &["id"], rows)
}

fn key(change: &rowdelta_core::Change) -> i64 {
    match change.pk_values()[0].raw() {
        RawValue::Int(i) => *i,
        other => panic!("unexpected key {:?}", other),
    }
}

proptest! {
    #[test]
    fn diff_is_idempotent(a in table_strategy(), b in table_strategy()) {
        let (sa, sb) = (to_snapshot(&a), to_snapshot(&b));
        let first = diff_snapshots(&sa, &sb).unwrap();
        let second = diff_snapshots(&sa, &sb).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn diff_against_itself_is_empty(a in table_strategy()) {
        let sa = to_snapshot(&a);
        prop_assert!(diff_snapshots(&sa, &sa).unwrap().is_empty());
    }

    #[test]
    fn classification_matches_model(a in table_strategy(), b in table_strategy()) {
        let changes = diff_snapshots(&to_snapshot(&a), &to_snapshot(&b)).unwrap();

        let keys: Vec<i64> = changes.iter().map(key).collect();
        let unique: BTreeSet<i64> = keys.iter().copied().collect();
        prop_assert_eq!(keys.len(), unique.len(), "one change per key");

        for change in &changes {
            let id = key(change);
            match change.change_type() {
                ChangeType::Creation => {
                    prop_assert!(!a.contains_key(&id) && b.contains_key(&id));
                    prop_assert!(change.row_at_start().is_none());
                }
                ChangeType::Deletion => {
                    prop_assert!(a.contains_key(&id) && !b.contains_key(&id));
                    prop_assert!(change.row_at_end().is_none());
                }
                ChangeType::Modification => {
                    let (before, after) = (&a[&id], &b[&id]);
                    let mut expected = Vec::new();
                    if before.0 != after.0 {
                        expected.push("n");
                    }
                    if before.1 != after.1 {
                        expected.push("s");
                    }
                    prop_assert!(!expected.is_empty());
                    prop_assert_eq!(change.modified_column_names(), expected);
                }
            }
        }

        let expected_count = a.keys().chain(b.keys()).collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|id| a.get(*id) != b.get(*id))
            .count();
        prop_assert_eq!(changes.len(), expected_count);
    }
}
