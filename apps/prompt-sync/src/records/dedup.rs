use std::collections::{HashMap, HashSet};

use crate::models::PromptRecord;

/// Concatenates `existing` then `incoming` and keeps one record per title.
///
/// On a title collision the later record wins, and the survivor sits where
/// its title was last seen, not where it first appeared.
pub fn merge_by_title(
    existing: Vec<PromptRecord>,
    incoming: Vec<PromptRecord>,
) -> Vec<PromptRecord> {
    let all: Vec<PromptRecord> = existing.into_iter().chain(incoming).collect();

    let mut last_seen: HashMap<&str, usize> = HashMap::with_capacity(all.len());
    for (idx, record) in all.iter().enumerate() {
        last_seen.insert(record.title.as_str(), idx);
    }
    let keep: Vec<bool> = all
        .iter()
        .enumerate()
        .map(|(idx, record)| last_seen[record.title.as_str()] == idx)
        .collect();

    all.into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

/// Titles that appear in both inputs, in `incoming` order.
pub fn colliding_titles<'a>(
    existing: &'a [PromptRecord],
    incoming: &'a [PromptRecord],
) -> Vec<&'a str> {
    let known: HashSet<&str> = existing.iter().map(|r| r.title.as_str()).collect();
    incoming
        .iter()
        .map(|r| r.title.as_str())
        .filter(|t| known.contains(t))
        .collect()
}
