use rowdelta_core::config::LetterCase;
use rowdelta_core::model::RowLayout;
use rowdelta_core::{MemoryProvider, RawValue, Snapshot};
use std::sync::Arc;

/// The `movie` table holding {1, "Test2"} and {2, "Test3"}
#[allow(dead_code)]
pub fn movie_provider() -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.create_table("movie", ["id", "title"], ["id"]);
    provider
        .insert("movie", vec![1.into(), "Test2".into()])
        .unwrap();
    provider
        .insert("movie", vec![2.into(), "Test3".into()])
        .unwrap();
    provider
}

/// Apply the reference mutation: add 5, retitle 1, remove 2
#[allow(dead_code)]
pub fn mutate_movies(provider: &mut MemoryProvider) {
    provider
        .insert("movie", vec![5.into(), "Test".into()])
        .unwrap();
    provider
        .update_where("movie", "id", &1.into(), "title", "Test4".into())
        .unwrap();
    provider.delete_where("movie", "id", &2.into()).unwrap();
}

/// A snapshot of `source` with the given columns, key and rows
#[allow(dead_code)]
pub fn snapshot(
    source: &str,
    columns: &[&str],
    pk: &[&str],
    rows: Vec<Vec<RawValue>>,
) -> Snapshot {
    let layout = RowLayout::new(
        source,
        columns.iter().map(|c| c.to_string()).collect(),
        pk.iter().map(|c| c.to_string()).collect(),
        LetterCase::default(),
    )
    .unwrap();
    Snapshot::from_raw_rows(Arc::new(layout), rows).unwrap()
}
