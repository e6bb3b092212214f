/*!
# Stream Generators

This module provides builder-style generators for edge streams, used to produce test and benchmark
instances for the matchers.

The typical usage workflow is:

1. Create a generator instance (e.g., `Gnp::new()`).
2. Set parameters using builder methods (e.g., `.nodes(n).prob(p)`).
3. Generate edges via `generate(rng)` or `stream(rng)`.

Supported models include:
- G(n,p): Erdős–Rényi model with independent edge probability
- bipartite G(n,m,p): every edge between two fixed vertex classes exists with probability `p`
- deterministic substructures (paths, cycles, cliques, complete bipartite graphs)

All generated streams are simple: no self-loops and every unordered pair appears at most once.
Edges are emitted in lexicographic order unless `.shuffled(true)` is requested.
*/

use rand::{Rng, seq::SliceRandom};

use crate::prelude::*;

mod substructures;

pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen {
    /// Sets the number of nodes in the generated stream.
    fn nodes(self, n: NumNodes) -> Self;
}

/// General trait for a configurable random edge stream generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of edges.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    ///
    /// This collects the full result from `stream()` into a `Vec<Edge>` as default.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

fn assert_probability(prob: f64) {
    assert!(
        (0.0..=1.0).contains(&prob),
        "{prob} is not a valid probability"
    );
}

/// `G(n,p)` streams contain every unordered pair of `0..n` independently with probability `p`.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use streammatch::gens::*;
///
/// let rng = &mut rand::rngs::StdRng::seed_from_u64(1);
/// let stream = Gnp::new().nodes(20).prob(0.7).generate(rng);
/// assert!(stream.iter().all(|e| e.0 < e.1 && e.1 < 20));
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: NumNodes,
    p: f64,
    shuffled: bool,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p`
    pub fn prob(mut self, prob: f64) -> Self {
        assert_probability(prob);
        self.p = prob;
        self
    }

    /// If set, [`GraphGenerator::generate`] returns the edges in random order
    pub fn shuffled(mut self, shuffled: bool) -> Self {
        self.shuffled = shuffled;
        self
    }
}

impl NumNodesGen for Gnp {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl GraphGenerator for Gnp {
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        let mut edges: Vec<Edge> = self.stream(rng).collect();
        if self.shuffled {
            edges.shuffle(rng);
        }
        edges
    }

    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let n = self.n as Node;
        let p = self.p;

        (0..n)
            .flat_map(move |u| (u + 1..n).map(move |v| Edge(u, v)))
            .filter(move |_| rng.random_bool(p))
    }
}

/// Random bipartite streams between the classes `0..left` and `left..left + right`.
///
/// Every edge is emitted with its left endpoint first.
#[derive(Debug, Copy, Clone, Default)]
pub struct BipartiteGnp {
    left: NumNodes,
    right: NumNodes,
    p: f64,
    shuffled: bool,
}

impl BipartiteGnp {
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

    /// Updates `p`
    pub fn prob(mut self, prob: f64) -> Self {
        assert_probability(prob);
        self.p = prob;
        self
    }

    /// If set, [`GraphGenerator::generate`] returns the edges in random order
    pub fn shuffled(mut self, shuffled: bool) -> Self {
        self.shuffled = shuffled;
        self
    }
}

impl GraphGenerator for BipartiteGnp {
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        let mut edges: Vec<Edge> = self.stream(rng).collect();
        if self.shuffled {
            edges.shuffle(rng);
        }
        edges
    }

    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let left = self.left as Node;
        let total = (self.left + self.right) as Node;
        let p = self.p;

        (0..left)
            .flat_map(move |u| (left..total).map(move |v| Edge(u, v)))
            .filter(move |_| rng.random_bool(p))
    }
}
