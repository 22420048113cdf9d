//! Ranking and selection
//!
//! Two independent orders over the admitted connections: by score for the
//! primary view and by geographic distance for the spatial view.

use crate::explain::Connection;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

fn by_score_desc(a: &Connection, b: &Connection) -> Ordering {
    OrderedFloat(b.score)
        .cmp(&OrderedFloat(a.score))
        .then_with(|| a.candidate.cmp(&b.candidate))
}

/// Sort by score descending, ties by candidate name ascending
pub fn rank_by_score(mut connections: Vec<Connection>) -> Vec<Connection> {
    connections.sort_by(by_score_desc);
    connections
}

/// Connections with a known distance, nearest first
///
/// Connections without coordinates are left out, not sorted last.
pub fn rank_by_distance(connections: &[Connection]) -> Vec<&Connection> {
    let mut located: Vec<(OrderedFloat<f64>, &Connection)> = connections
        .iter()
        .filter_map(|c| c.distance.map(|d| (OrderedFloat(d), c)))
        .collect();
    located.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.candidate.cmp(&b.candidate)));
    located.into_iter().map(|(_, c)| c).collect()
}

/// The first `n` items, or all of them if there are fewer
#[inline]
pub fn top_n<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}
