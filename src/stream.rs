/*!
# Edge Streams

An [`EdgeStream`] is an ordered, **replayable** sequence of undirected edges.
Every call to [`EdgeStream::pass`] performs one full left-to-right scan and must yield the same
edges in the same order; the matchers rely on this as they scan the stream many times.

Apart from plain slices and vectors, the crate provides
- [`EdgeList`]: a validated stream without self-loops and without repeated endpoint pairs,
- [`PassCounter`]: a wrapper counting how many passes an algorithm performed.
*/

use std::sync::atomic::{AtomicUsize, Ordering};

use fxhash::FxHashSet;

use crate::{error::*, prelude::*};

/// A replayable sequence of undirected edges.
///
/// Implementors must return the identical sequence on every pass for as long as they are borrowed.
pub trait EdgeStream {
    /// Performs one full pass over the stream
    fn pass(&self) -> impl Iterator<Item = Edge> + '_;

    /// Returns the number of edges in the stream (costs one pass by default)
    fn number_of_edges(&self) -> NumEdges {
        self.pass().count()
    }

    /// Returns the set of vertices incident to at least one edge (costs one pass)
    fn vertex_set(&self) -> NodeSet {
        let mut vertices = NodeSet::default();
        for Edge(u, v) in self.pass() {
            vertices.insert(u);
            vertices.insert(v);
        }
        vertices
    }
}

impl EdgeStream for [Edge] {
    fn pass(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter().copied()
    }

    fn number_of_edges(&self) -> NumEdges {
        self.len()
    }
}

impl EdgeStream for Vec<Edge> {
    fn pass(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter().copied()
    }

    fn number_of_edges(&self) -> NumEdges {
        self.len()
    }
}

impl<S> EdgeStream for &S
where
    S: EdgeStream + ?Sized,
{
    fn pass(&self) -> impl Iterator<Item = Edge> + '_ {
        (**self).pass()
    }

    fn number_of_edges(&self) -> NumEdges {
        (**self).number_of_edges()
    }
}

/// A validated in-memory edge stream.
///
/// - Self-loops are rejected.
/// - An endpoint pair that was seen before (in either orientation) is dropped, so that edge
///   identity coincides with endpoint-pair identity. The first occurrence keeps its position.
///
/// # Example
/// ```rust
/// use streammatch::prelude::*;
///
/// let stream = EdgeList::try_from_edges([(0, 1), (1, 2), (2, 1)]).unwrap();
/// assert_eq!(stream.number_of_edges(), 2);
/// assert!(EdgeList::try_from_edges([(3, 3)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    /// Creates an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stream from the given edges in order; fails on self-loops
    pub fn try_from_edges<I, E>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut seen = FxHashSet::default();
        let mut list = Self::new();

        for e in edges {
            let e: Edge = e.into();
            if e.is_loop() {
                return Err(MatchingError::InvalidGraph(format!(
                    "self-loop {e} cannot be part of a matching stream"
                )));
            }
            if seen.insert(e.normalized()) {
                list.edges.push(e);
            }
        }

        Ok(list)
    }

    /// Returns the edges in stream order
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Consumes the stream and returns its edges in stream order
    pub fn into_inner(self) -> Vec<Edge> {
        self.edges
    }
}

impl EdgeStream for EdgeList {
    fn pass(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    fn number_of_edges(&self) -> NumEdges {
        self.edges.len()
    }
}

impl FromIterator<Edge> for EdgeList {
    /// Collects edges, silently skipping self-loops and repeated endpoint pairs
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut seen = FxHashSet::default();
        Self {
            edges: iter
                .into_iter()
                .filter(|e| !e.is_loop() && seen.insert(e.normalized()))
                .collect(),
        }
    }
}

/// Wraps a stream and counts every pass performed over it.
///
/// The counter is atomic, so the wrapper can be shared between threads just like the inner stream.
#[derive(Debug, Default)]
pub struct PassCounter<S> {
    inner: S,
    passes: AtomicUsize,
}

impl<S: EdgeStream> PassCounter<S> {
    /// Wraps `inner` with a fresh counter
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            passes: AtomicUsize::new(0),
        }
    }

    /// Returns the number of passes performed so far
    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::Relaxed)
    }

    /// Resets the counter to zero
    pub fn reset(&self) {
        self.passes.store(0, Ordering::Relaxed);
    }

    /// Returns the wrapped stream
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EdgeStream> EdgeStream for PassCounter<S> {
    fn pass(&self) -> impl Iterator<Item = Edge> + '_ {
        self.passes.fetch_add(1, Ordering::Relaxed);
        self.inner.pass()
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn edge_list_deduplicates() {
        let stream = EdgeList::try_from_edges([(0, 1), (2, 3), (1, 0), (3, 2), (0, 2)]).unwrap();
        assert_eq!(
            stream.pass().collect_vec(),
            vec![Edge(0, 1), Edge(2, 3), Edge(0, 2)]
        );
        assert_eq!(stream.vertex_set().len(), 4);
    }

    #[test]
    fn edge_list_rejects_loops() {
        assert!(matches!(
            EdgeList::try_from_edges([(0, 1), (1, 1)]),
            Err(MatchingError::InvalidGraph(_))
        ));

        let collected: EdgeList = [Edge(0, 1), Edge(1, 1), Edge(1, 0)].into_iter().collect();
        assert_eq!(collected.as_slice(), &[Edge(0, 1)]);
    }

    #[test]
    fn passes_are_replayable() {
        let stream = vec![Edge(4, 9), Edge(9, 1), Edge(1, 4)];
        let first = stream.pass().collect_vec();
        let second = stream.pass().collect_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn pass_counter() {
        let stream = PassCounter::new(vec![Edge(0, 1), Edge(1, 2)]);
        assert_eq!(stream.passes(), 0);
        assert_eq!(stream.pass().count(), 2);
        let _ = stream.vertex_set();
        assert_eq!(stream.passes(), 2);
        stream.reset();
        assert_eq!(stream.passes(), 0);
    }
}
