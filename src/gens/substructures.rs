/*!
# Substructure Generators

Deterministic building blocks for edge streams:

- **Paths**
- **Cycles**
- **Cliques**
- **Complete bipartite graphs**

# Example

```rust
use streammatch::{prelude::*, gens::*};

let mut stream: Vec<Edge> = Vec::new();
stream.connect_path([0, 1, 2]);
stream.connect_cycle([2, 3, 4]);

assert_eq!(
    stream,
    vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(3, 4), Edge(4, 2)]
);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for appending additional **substructures** (paths, cycles, cliques) to a stream.
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given nodes with a **cycle**: consecutive nodes are connected and the last
    /// node is connected back to the first. Fewer than three nodes do not form a cycle and
    /// degenerate to a path.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>;

    /// Connects all given nodes into a **clique** (edges emitted as `(u, v)` with `u` before `v`).
    fn connect_clique(&mut self, nodes: &[Node]);

    /// Connects every node of `left` with every node of `right`.
    fn connect_biclique(&mut self, left: &[Node], right: &[Node]);
}

impl GeneratorSubstructures for Vec<Edge> {
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.push(Edge(u, v));
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>,
    {
        let nodes = nodes_in_cycle.into_iter().collect_vec();
        self.connect_path(nodes.iter().copied());

        if nodes.len() > 2 {
            self.push(Edge(nodes[nodes.len() - 1], nodes[0]));
        }
    }

    fn connect_clique(&mut self, nodes: &[Node]) {
        for (i, &u) in nodes.iter().enumerate() {
            for &v in &nodes[i + 1..] {
                self.push(Edge(u, v));
            }
        }
    }

    fn connect_biclique(&mut self, left: &[Node], right: &[Node]) {
        for &u in left {
            for &v in right {
                self.push(Edge(u, v));
            }
        }
    }
}

/// The complete graph on `0..n`
#[derive(Debug, Copy, Clone, Default)]
pub struct CompleteGraph {
    n: NumNodes,
}

impl CompleteGraph {
    /// Creates a new empty generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates all `n choose 2` edges in lexicographic order
    pub fn generate(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = Vec::with_capacity(self.n * self.n.saturating_sub(1) / 2);
        edges.connect_clique(&(0..self.n as Node).collect_vec());
        edges
    }
}

impl NumNodesGen for CompleteGraph {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

/// The complete bipartite graph between `0..left` and `left..left + right`
#[derive(Debug, Copy, Clone, Default)]
pub struct CompleteBipartite {
    left: NumNodes,
    right: NumNodes,
}

impl CompleteBipartite {
    /// Creates a new empty generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sizes of both vertex classes
    pub fn sides(mut self, left: NumNodes, right: NumNodes) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    /// Generates all `left * right` edges, left endpoint first
    pub fn generate(&self) -> Vec<Edge> {
        let left = (0..self.left as Node).collect_vec();
        let right = (self.left as Node..(self.left + self.right) as Node).collect_vec();

        let mut edges: Vec<Edge> = Vec::with_capacity(left.len() * right.len());
        edges.connect_biclique(&left, &right);
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_path() {
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_path([]);
        edges.connect_path([1]);
        assert!(edges.is_empty());

        edges.connect_path([0, 3, 1, 4]);
        assert_eq!(edges, vec![Edge(0, 3), Edge(3, 1), Edge(1, 4)]);
    }

    #[test]
    fn test_connect_cycle() {
        let mut edges: Vec<Edge> = Vec::new();
        edges.connect_cycle([1]);
        assert!(edges.is_empty());

        edges.connect_cycle([0, 3, 1, 4]);
        assert_eq!(edges, vec![Edge(0, 3), Edge(3, 1), Edge(1, 4), Edge(4, 0)]);
    }

    #[test]
    fn complete_graphs() {
        assert_eq!(CompleteGraph::new().nodes(20).generate().len(), 190);
        assert!(CompleteGraph::new().nodes(1).generate().is_empty());

        let edges = CompleteBipartite::new().sides(3, 4).generate();
        assert_eq!(edges.len(), 12);
        assert!(edges.iter().all(|&Edge(u, v)| u < 3 && (3..7).contains(&v)));
    }
}
