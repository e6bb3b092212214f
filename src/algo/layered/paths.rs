use std::collections::BTreeSet;

use fxhash::FxHashSet;
use log::trace;

use super::*;

/// Recovers the augmenting paths encoded in `tags` ("Find-Paths-From-Tags").
///
/// Every frontier vertex whose tag is not `Dead` starts a walk along its tags until a vertex
/// points to itself. Walks that hit a missing or `Dead` tag, or revisit a vertex, are discarded.
/// The tags only carry vertex identities, so a walk is kept only if every one of its edges is
/// confirmed by one pass over `stream`.
///
/// Returns the normalized edges of all kept paths.
pub fn paths_from_tags<S>(stream: &S, frontier: &[Node], tags: &NodeMap<Tag>) -> BTreeSet<Edge>
where
    S: EdgeStream + ?Sized,
{
    let walks: Vec<Vec<Edge>> = frontier
        .iter()
        .filter_map(|&start| walk_tags(start, tags))
        .collect();

    if walks.is_empty() {
        return BTreeSet::new();
    }

    let candidates: FxHashSet<Edge> = walks.iter().flatten().copied().collect();
    let confirmed: FxHashSet<Edge> = stream
        .pass()
        .map(|e| e.normalized())
        .filter(|e| candidates.contains(e))
        .collect();

    let paths: Vec<Vec<Edge>> = walks
        .into_iter()
        .filter(|walk| walk.iter().all(|e| confirmed.contains(e)))
        .collect();

    trace!("recovered {} augmenting paths", paths.len());
    paths.into_iter().flatten().collect()
}

/// Follows the tags from `start`; `None` if the walk does not end in a fixed point
fn walk_tags(start: Node, tags: &NodeMap<Tag>) -> Option<Vec<Edge>> {
    let mut visited = NodeSet::default();
    let mut walk = Vec::new();
    let mut v = start;

    loop {
        match *tags.get(&v)? {
            Tag::Dead => return None,
            Tag::Next(w) if w == v => return Some(walk),
            Tag::Next(w) => {
                if !visited.insert(v) {
                    return None;
                }
                walk.push(Edge(v, w).normalized());
                v = w;
            }
        }
    }
}
