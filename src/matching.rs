/*!
# Matchings and Matching Utilities

A *matching* is a set of edges without shared endpoints.
- A **maximal matching** cannot be extended by adding another edge, but may not be optimal in size.
- A **maximum matching** is the largest possible matching.

This module provides the [`Matching`] type used as the result of every matcher as well as the
stateless helpers both streaming algorithms build upon:
- [`maximal_matching`]: greedy single-pass maximal matching,
- [`is_matching`]: validity check used as an assertion after every construction step,
- [`symmetric_difference`]: applies a set of augmenting paths to a matching.
*/

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{error::*, prelude::*};

/// A set of pairwise vertex-disjoint edges.
///
/// Edges are stored normalized (smaller endpoint first) and iterate in lexicographic order,
/// which makes matchings directly comparable and their iteration order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    edges: BTreeSet<Edge>,
}

impl Matching {
    /// Creates an empty matching
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matching from the given edges.
    /// Returns `InvariantViolation` if two edges share an endpoint.
    pub fn try_from_edges<I, E>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let edges: BTreeSet<Edge> = edges.into_iter().map(|e| e.into().normalized()).collect();
        match first_conflict(edges.iter().copied()) {
            Some(u) => Err(MatchingError::covered_twice(u, "matching construction")),
            None => Ok(Self { edges }),
        }
    }

    /// Wraps an edge set that the caller already verified
    pub(crate) fn from_verified(edges: BTreeSet<Edge>) -> Self {
        debug_assert!(is_matching(edges.iter()));
        Self { edges }
    }

    /// Number of edges in the matching
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* if the matching contains no edge
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns *true* if the edge (in either orientation) is part of the matching
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(&edge.normalized())
    }

    /// Iterates over the normalized edges in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Returns the underlying edge set
    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    /// Consumes the matching and returns its edges in lexicographic order
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges.into_iter().collect_vec()
    }

    /// Maps every matched vertex to its partner
    pub fn mates(&self) -> NodeMap<Node> {
        let mut mates = NodeMap::default();
        mates.reserve(2 * self.len());
        for &Edge(u, v) in &self.edges {
            mates.insert(u, v);
            mates.insert(v, u);
        }
        mates
    }

    /// Returns all vertices covered by the matching
    pub fn covered_vertices(&self) -> NodeSet {
        self.edges.iter().flat_map(|&Edge(u, v)| [u, v]).collect()
    }

    /// Returns *true* if every edge of the matching is an edge of `stream` (costs one pass)
    pub fn is_subset_of_stream<S: EdgeStream + ?Sized>(&self, stream: &S) -> bool {
        let mut missing = self.edges.clone();
        for e in stream.pass() {
            missing.remove(&e.normalized());
        }
        missing.is_empty()
    }
}

impl<'a> IntoIterator for &'a Matching {
    type Item = &'a Edge;
    type IntoIter = std::collections::btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Returns the first vertex that is covered by more than one edge
fn first_conflict<I>(edges: I) -> Option<Node>
where
    I: IntoIterator<Item = Edge>,
{
    let mut covered = NodeSet::default();
    for Edge(u, v) in edges {
        if !covered.insert(u) {
            return Some(u);
        }
        if !covered.insert(v) {
            return Some(v);
        }
    }
    None
}

/// Returns *true* if no vertex appears in more than one of the given edges.
///
/// Stops at the first edge whose endpoint was already seen.
///
/// # Example
/// ```rust
/// use streammatch::prelude::*;
///
/// assert!(is_matching([Edge(0, 1), Edge(2, 3)]));
/// assert!(!is_matching([Edge(0, 1), Edge(1, 2)]));
/// ```
pub fn is_matching<I, E>(edges: I) -> bool
where
    I: IntoIterator<Item = E>,
    E: Into<Edge>,
{
    first_conflict(edges.into_iter().map(Into::into)).is_none()
}

/// Checks that `edges` form a matching and wraps them; `step` names the producing step in the error
pub(crate) fn verify_matching(edges: BTreeSet<Edge>, step: &str) -> Result<Matching> {
    match first_conflict(edges.iter().copied()) {
        Some(u) => Err(MatchingError::covered_twice(u, step)),
        None => Ok(Matching { edges }),
    }
}

/// Computes the edges contained in exactly one of `a` and `b`.
///
/// Edges are compared as unordered pairs; the result is normalized.
///
/// # Example
/// ```rust
/// use streammatch::prelude::*;
///
/// let diff = symmetric_difference([Edge(1, 2)], [Edge(0, 1), Edge(2, 1), Edge(2, 3)]);
/// assert_eq!(diff.into_iter().collect::<Vec<_>>(), vec![Edge(0, 1), Edge(2, 3)]);
/// ```
pub fn symmetric_difference<A, B, EA, EB>(a: A, b: B) -> BTreeSet<Edge>
where
    A: IntoIterator<Item = EA>,
    B: IntoIterator<Item = EB>,
    EA: Into<Edge>,
    EB: Into<Edge>,
{
    let a: BTreeSet<Edge> = a.into_iter().map(|e| e.into().normalized()).collect();
    let b: BTreeSet<Edge> = b.into_iter().map(|e| e.into().normalized()).collect();
    a.symmetric_difference(&b).copied().collect()
}

/// Greedy maximal matching in a single pass: an edge is accepted iff neither endpoint is covered.
/// Self-loops are never accepted.
///
/// Deterministic for a fixed stream order.
pub fn maximal_matching<S>(stream: &S) -> Matching
where
    S: EdgeStream + ?Sized,
{
    let mut covered = NodeSet::default();
    let mut edges = BTreeSet::new();

    for e @ Edge(u, v) in stream.pass() {
        if u != v && !covered.contains(&u) && !covered.contains(&v) {
            covered.insert(u);
            covered.insert(v);
            edges.insert(e.normalized());
        }
    }

    Matching::from_verified(edges)
}

/// Matching-related queries implemented on every [`EdgeStream`].
pub trait StreamMatching: EdgeStream {
    /// Computes a greedy **maximal matching** in one pass (see [`maximal_matching`])
    fn maximal_matching(&self) -> Matching {
        maximal_matching(self)
    }

    /// Returns all vertices of the stream not covered by `matching`, in order of first appearance
    fn free_vertices(&self, matching: &Matching) -> Vec<Node> {
        let covered = matching.covered_vertices();
        let mut seen = NodeSet::default();
        let mut free = Vec::new();

        for Edge(u, v) in self.pass() {
            for x in [u, v] {
                if !covered.contains(&x) && seen.insert(x) {
                    free.push(x);
                }
            }
        }

        free
    }
}

impl<S> StreamMatching for S where S: EdgeStream + ?Sized {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn maximal_matching_on_path() {
        // 0 - 1 - 2 - 3
        let stream = vec![Edge(0, 1), Edge(1, 2), Edge(2, 3)];
        let matching = stream.maximal_matching();
        assert_eq!(matching.into_edges(), vec![Edge(0, 1), Edge(2, 3)]);

        let stream = vec![Edge(1, 2), Edge(0, 1), Edge(2, 3)];
        let matching = stream.maximal_matching();
        assert_eq!(matching.into_edges(), vec![Edge(1, 2)]);
    }

    #[test]
    fn maximal_matching_is_maximal() {
        let stream = vec![Edge(0, 1), Edge(0, 2), Edge(3, 2), Edge(4, 1), Edge(5, 6), Edge(6, 4)];
        let matching = stream.maximal_matching();
        let covered = matching.covered_vertices();

        assert!(is_matching(matching.iter()));
        for Edge(u, v) in stream.pass() {
            assert!(covered.contains(&u) || covered.contains(&v));
        }
    }

    #[test]
    fn validity() {
        assert!(is_matching(Vec::<Edge>::new()));
        assert!(is_matching([(0, 1), (2, 3), (4, 5)]));
        assert!(!is_matching([(0, 1), (2, 3), (3, 4)]));
        assert!(!is_matching([(0, 1), (1, 0)]));

        assert!(Matching::try_from_edges([(0, 1), (3, 2)]).is_ok());
        assert!(matches!(
            Matching::try_from_edges([(0, 1), (2, 1)]),
            Err(MatchingError::InvariantViolation(_))
        ));
    }

    #[test]
    fn symmetric_difference_applies_augmenting_path() {
        // path 0 - 1 = 2 - 3 with matched edge (1, 2)
        let matching = Matching::try_from_edges([(2, 1)]).unwrap();
        let path = [Edge(0, 1), Edge(1, 2), Edge(3, 2)];
        let augmented = verify_matching(
            symmetric_difference(matching.iter(), path),
            "augmentation",
        )
        .unwrap();

        assert_eq!(augmented.len(), 2);
        assert!(augmented.contains(&Edge(1, 0)));
        assert!(augmented.contains(&Edge(2, 3)));

        let unchanged = symmetric_difference(matching.iter(), Vec::<Edge>::new());
        assert_eq!(&unchanged, matching.edges());
    }

    #[test]
    fn free_vertices_in_stream_order() {
        let stream = vec![Edge(5, 1), Edge(1, 2), Edge(2, 7), Edge(7, 9)];
        let matching = Matching::try_from_edges([(1, 2)]).unwrap();
        assert_eq!(stream.free_vertices(&matching), vec![5, 7, 9]);

        let mates = matching.mates();
        assert_eq!(mates.get(&1), Some(&2));
        assert_eq!(mates.get(&2), Some(&1));
        assert!(matching.is_subset_of_stream(&stream));
        assert!(!Matching::try_from_edges([(1, 9)]).unwrap().is_subset_of_stream(&stream));
    }
}
