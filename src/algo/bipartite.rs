/*!
# Bipartite Streams

This module provides the bipartiteness machinery the auction matcher depends on:
- Testing whether a stream describes a bipartite graph (BFS 2-colouring),
- Computing a valid bipartition if one exists,
- Classifying vertices into *bidders* and *items* with the greedy online rule.

The 2-colouring is the only place in the crate that materializes an adjacency structure.
It is performed once, when an [`AuctionMatcher`](super::AuctionMatcher) is constructed.
*/

use std::collections::VecDeque;

use super::*;

/// The class a vertex belongs to in a [`Bipartition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Vertices that bid on items
    Bidder,
    /// Vertices that are being bid on
    Item,
}

impl Role {
    /// Returns the opposite class
    pub fn opposite(self) -> Self {
        match self {
            Role::Bidder => Role::Item,
            Role::Item => Role::Bidder,
        }
    }
}

/// A partition of the vertices of a stream into bidders and items.
///
/// A bipartition is *consistent* with a stream if every edge has exactly one endpoint in each class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bipartition {
    roles: NodeMap<Role>,
}

impl Bipartition {
    /// Classifies the vertices of `stream` with the greedy online rule in one pass:
    /// - an edge with a classified endpoint is oriented consistently with it
    ///   (checking the first endpoint before the second),
    /// - an edge without classified endpoints makes its first endpoint a bidder.
    ///
    /// A vertex keeps the role it received first. The result may be inconsistent if two
    /// independently oriented parts of the stream are joined later on; check with
    /// [`Bipartition::is_consistent_with`].
    pub fn classify_online<S>(stream: &S) -> Self
    where
        S: EdgeStream + ?Sized,
    {
        let mut roles: NodeMap<Role> = NodeMap::default();

        for Edge(u, v) in stream.pass() {
            let role_of_u = match (roles.get(&u), roles.get(&v)) {
                (Some(&ru), _) => ru,
                (None, Some(&rv)) => rv.opposite(),
                (None, None) => Role::Bidder,
            };

            roles.entry(u).or_insert(role_of_u);
            roles.entry(v).or_insert(role_of_u.opposite());
        }

        Self { roles }
    }

    /// Returns the role of `u` or `None` if `u` is unknown
    pub fn role_of(&self, u: Node) -> Option<Role> {
        self.roles.get(&u).copied()
    }

    /// Returns *true* if `u` is a bidder
    pub fn is_bidder(&self, u: Node) -> bool {
        self.role_of(u) == Some(Role::Bidder)
    }

    /// Returns *true* if `u` is an item
    pub fn is_item(&self, u: Node) -> bool {
        self.role_of(u) == Some(Role::Item)
    }

    /// Orients an edge as `(bidder, item)`.
    /// Returns `None` if the endpoints are not in opposite classes.
    pub fn orient(&self, Edge(u, v): Edge) -> Option<(Node, Node)> {
        match (self.role_of(u)?, self.role_of(v)?) {
            (Role::Bidder, Role::Item) => Some((u, v)),
            (Role::Item, Role::Bidder) => Some((v, u)),
            _ => None,
        }
    }

    /// Returns *true* if every edge of the stream connects a bidder with an item (costs one pass)
    pub fn is_consistent_with<S>(&self, stream: &S) -> bool
    where
        S: EdgeStream + ?Sized,
    {
        stream.pass().all(|e| self.orient(e).is_some())
    }

    /// Iterates over all bidders (in arbitrary but deterministic order)
    pub fn bidders(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes_with_role(Role::Bidder)
    }

    /// Iterates over all items (in arbitrary but deterministic order)
    pub fn items(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes_with_role(Role::Item)
    }

    /// Number of classified vertices
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns *true* if no vertex is classified
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    fn nodes_with_role(&self, role: Role) -> impl Iterator<Item = Node> + '_ {
        self.roles
            .iter()
            .filter_map(move |(&u, &r)| (r == role).then_some(u))
    }
}

/// Bipartiteness queries implemented on every [`EdgeStream`].
pub trait BipartiteTest: EdgeStream {
    /// Tests whether the given candidate partition is a valid bipartition of the stream.
    fn is_bipartition(&self, bipartition: &Bipartition) -> bool {
        bipartition.is_consistent_with(self)
    }

    /// Computes a valid bipartition of the stream, if one exists.
    /// Returns `None` if the stream is not bipartite.
    ///
    /// # Example
    /// ```rust
    /// use streammatch::{prelude::*, algo::*};
    ///
    /// let path = vec![Edge(0, 1), Edge(1, 2), Edge(2, 3)];
    /// let bip = path.compute_bipartition().unwrap();
    /// assert_ne!(bip.role_of(0), bip.role_of(1));
    ///
    /// let triangle = vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)];
    /// assert!(triangle.compute_bipartition().is_none());
    /// ```
    fn compute_bipartition(&self) -> Option<Bipartition> {
        let bipartition = propose_possibly_illegal_bipartition(self);
        self.is_bipartition(&bipartition).then_some(bipartition)
    }

    /// Tests whether the stream is bipartite.
    fn is_bipartite(&self) -> bool {
        self.compute_bipartition().is_some()
    }
}

impl<S> BipartiteTest for S where S: EdgeStream + ?Sized {}

/// Computes a candidate bipartition using BFS 2-colouring.
///
/// - If the stream is bipartite, the returned partition is valid
/// - If the stream is not bipartite, the returned partition may be invalid
///
/// Components are explored in order of first appearance in the stream; the first vertex of each
/// component becomes a bidder.
fn propose_possibly_illegal_bipartition<S>(stream: &S) -> Bipartition
where
    S: EdgeStream + ?Sized,
{
    let mut order = Vec::new();
    let mut adjacency: NodeMap<Vec<Node>> = NodeMap::default();
    for Edge(u, v) in stream.pass() {
        for (x, y) in [(u, v), (v, u)] {
            adjacency
                .entry(x)
                .or_insert_with(|| {
                    order.push(x);
                    Vec::new()
                })
                .push(y);
        }
    }

    let mut roles = NodeMap::default();
    roles.reserve(order.len());
    let mut queue = VecDeque::new();

    for start in order {
        if roles.contains_key(&start) {
            continue;
        }

        roles.insert(start, Role::Bidder);
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            let role = roles[&u].opposite();
            for &v in &adjacency[&u] {
                if !roles.contains_key(&v) {
                    roles.insert(v, role);
                    queue.push_back(v);
                }
            }
        }
    }

    Bipartition { roles }
}
