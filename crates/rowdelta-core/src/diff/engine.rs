//! Change classification between two snapshots of one data source.
//!
//! The entry point is [`diff_snapshots`]. It is a pure function of its two
//! inputs: running it twice on the same snapshots yields the same list.

use crate::diff::key::{self, RowKey};
use crate::errors::{DeltaError, Result};
use crate::model::{Change, ChangeType, Row};
use crate::snapshot::Snapshot;
use std::collections::{HashMap, VecDeque};

/// Classify every difference between `start` and `end`.
///
/// Ordering: rows of `start` in capture order (yielding DELETION or
/// MODIFICATION), then rows found only in `end`, in capture order
/// (yielding CREATION).
///
/// Sources without a primary key are matched by complete row content;
/// they never yield MODIFICATION.
///
/// Key identity normalizes numbers across representations but not text, so
/// a key stored as `'1'` at the start and `1` at the end is a DELETION plus
/// a CREATION.
///
/// # Errors
///
/// - `DuplicatePrimaryKey` if a key tuple repeats within either snapshot
pub fn diff_snapshots(start: &Snapshot, end: &Snapshot) -> Result<Vec<Change>> {
    let changes = if start.has_primary_key() {
        diff_by_key(start, end)?
    } else {
        diff_by_content(start, end)
    };

    tracing::debug!(
        source = start.source_name(),
        creations = count(&changes, ChangeType::Creation),
        modifications = count(&changes, ChangeType::Modification),
        deletions = count(&changes, ChangeType::Deletion),
        "snapshots diffed"
    );
    Ok(changes)
}

fn diff_by_key(start: &Snapshot, end: &Snapshot) -> Result<Vec<Change>> {
    let start_keys = index_by_key(start)?;
    let end_keys = index_by_key(end)?;

    let mut matched = vec![false; end.len()];
    let mut changes = Vec::new();

    for (row, row_key) in start.rows().iter().zip(&start_keys.0) {
        match end_keys.1.get(row_key) {
            None => changes.push(Change::deletion(row.clone())),
            Some(&j) => {
                matched[j] = true;
                let end_row = &end.rows()[j];
                let modified = modified_columns(row, end_row);
                if !modified.is_empty() {
                    changes.push(Change::modification(
                        row.clone(),
                        end_row.clone(),
                        modified,
                    ));
                }
            }
        }
    }

    push_unmatched_creations(end, &matched, &mut changes);
    Ok(changes)
}

fn diff_by_content(start: &Snapshot, end: &Snapshot) -> Vec<Change> {
    let mut pending: HashMap<RowKey, VecDeque<usize>> = HashMap::new();
    for (j, row) in end.rows().iter().enumerate() {
        pending.entry(key::content(row)).or_default().push_back(j);
    }

    let mut matched = vec![false; end.len()];
    let mut changes = Vec::new();

    for row in start.rows() {
        match pending
            .get_mut(&key::content(row))
            .and_then(VecDeque::pop_front)
        {
            Some(j) => matched[j] = true,
            None => changes.push(Change::deletion(row.clone())),
        }
    }

    push_unmatched_creations(end, &matched, &mut changes);
    changes
}

fn push_unmatched_creations(end: &Snapshot, matched: &[bool], changes: &mut Vec<Change>) {
    changes.extend(
        end.rows()
            .iter()
            .zip(matched)
            .filter(|(_, m)| !**m)
            .map(|(row, _)| Change::creation(row.clone())),
    );
}

/// Keys of every row in order, plus the row index of each key.
fn index_by_key(snapshot: &Snapshot) -> Result<(Vec<RowKey>, HashMap<RowKey, usize>)> {
    let mut keys = Vec::with_capacity(snapshot.len());
    let mut index = HashMap::with_capacity(snapshot.len());
    for (i, row) in snapshot.rows().iter().enumerate() {
        let row_key = key::primary_key(row);
        if let Some(&first_row) = index.get(&row_key) {
            return Err(DeltaError::DuplicatePrimaryKey {
                source_name: snapshot.source_name().to_string(),
                key: key::describe(&row.pk_values()),
                first_row,
                second_row: i,
            });
        }
        index.insert(row_key.clone(), i);
        keys.push(row_key);
    }
    Ok((keys, index))
}

/// Non-key columns of `end` whose value differs from `start`'s.
///
/// Columns are paired by name; a column absent from `start` counts as
/// modified.
fn modified_columns(start: &Row, end: &Row) -> Vec<usize> {
    let end_layout = end.layout();
    let positional = start.column_names() == end.column_names();

    (0..end_layout.len())
        .filter(|&i| !end_layout.is_pk_index(i))
        .filter(|&i| {
            let start_index = if positional {
                Some(i)
            } else {
                start.layout().index_of(&end_layout.column_names()[i]).ok()
            };
            match start_index {
                Some(s) => !start.values()[s].same_as(&end.values()[i]),
                None => true,
            }
        })
        .collect()
}

fn count(changes: &[Change], change_type: ChangeType) -> usize {
    changes
        .iter()
        .filter(|c| c.change_type() == change_type)
        .count()
}
