use std::fmt::{Debug, Display};

use crate::node::Node;

/// An edge is defined by two nodes/endpoints.
///
/// Streams are undirected: `Edge(u, v)` and `Edge(v, u)` denote the same edge.
/// Use [`Edge::normalized`] whenever edges are compared or stored in sets.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// Number of edges in a stream
pub type NumEdges = usize;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Returns true if `u` is one of the endpoints
    pub fn is_incident_to(&self, u: Node) -> bool {
        self.0 == u || self.1 == u
    }

    /// Returns the endpoint opposite to `u`, or `None` if `u` is not incident to the edge
    pub fn other(&self, u: Node) -> Option<Node> {
        if self.0 == u {
            Some(self.1)
        } else if self.1 == u {
            Some(self.0)
        } else {
            None
        }
    }

    /// Returns true if both edges share at least one endpoint
    pub fn shares_endpoint_with(&self, other: &Edge) -> bool {
        self.is_incident_to(other.0) || self.is_incident_to(other.1)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}
