//! Run-length grouping of line cells.
//!
//! Consecutive columns with identical attributes are folded into a single
//! [`Run`]. A gap in the column sequence always starts a new run, even when
//! the attributes on both sides match.

/// Maximal contiguous run of items sharing the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<K, T> {
    /// First column of the run
    pub start: usize,
    /// Attributes shared by every item in the run
    pub key: K,
    pub items: Vec<T>,
}

impl<K, T> Run<K, T> {
    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Column right after the run.
    fn end(&self) -> usize {
        self.start + self.items.len()
    }
}

/// Group `(column, item)` pairs into maximal runs keyed by `key`.
///
/// Columns must be increasing; the fold state is the last run, which carries
/// the group start, the last index (`end() - 1`) and the last attributes.
pub fn consecutive_runs<I, T, K, F>(items: I, key: F) -> Vec<Run<K, T>>
where
    I: IntoIterator<Item = (usize, T)>,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    items
        .into_iter()
        .fold(Vec::new(), |mut runs: Vec<Run<K, T>>, (column, item)| {
            let item_key = key(&item);
            match runs.last_mut() {
                Some(run) if run.end() == column && run.key == item_key => run.items.push(item),
                _ => runs.push(Run {
                    start: column,
                    key: item_key,
                    items: vec![item],
                }),
            }
            runs
        })
}
