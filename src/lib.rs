/*!
`streammatch` is a library of **semi-streaming** algorithms for approximate maximum matchings.

The input graph is never stored: it is only ever seen as an **edge stream** that can be replayed
from the beginning, one full scan at a time (a *pass*). Algorithms keep state proportional to the
number of vertices, not to the number of edges.

# Representation

We represent **nodes** as `u32`. In contrast to dense graph libraries, identifiers in a stream need
not be contiguous, so all per-vertex state lives in hash maps keyed by `Node`.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`; a stream is undirected, so
`Edge(u, v)` and `Edge(v, u)` describe the same edge (we normalize edges often).

Streams are anything implementing [`EdgeStream`](crate::stream::EdgeStream): slices and vectors
of edges, the deduplicating [`EdgeList`](crate::stream::EdgeList), or wrappers such as
[`PassCounter`](crate::stream::PassCounter).

# Algorithms

- [`AuctionMatcher`](crate::algo::AuctionMatcher): a deterministic price-based auction for
  **bipartite** streams that returns a `(1 - eps)`-approximate maximum matching after
  `ceil(2 / eps^2)` rounds of two passes each.
- [`LayeredPathMatcher`](crate::algo::LayeredPathMatcher): a randomized search for short
  augmenting paths in randomly layered subgraphs of **general** streams that returns a
  `1 / (1 + eps)`-approximate maximum matching with good probability.

Both start from (or are checked against) the single-pass utilities in [`matching`]:
greedy maximal matching, matching validation and symmetric difference.

# Design

All algorithms are provided as configurable structs over a borrowed stream that one can alter
using the *Builder* / *Setter* pattern before calling the configured algorithm.
Randomized algorithms take the random source as an explicit argument, so results are reproducible
for a fixed seed. Failures are reported as [`MatchingError`](crate::error::MatchingError); the
matchers emit `debug`/`trace` records through the [`log`] facade.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, streams, matchings and errors,
- [`algo`] includes both matchers as well as bipartiteness checks on streams,
- [`gens`] includes random stream generators (and deterministic substructures such as
  paths/cycles/cliques) to produce instances at runtime,
- [`io`] includes a reader and writer for edge-list files.

In most use-cases, `use streammatch::{prelude::*, algo::*};` suffices for your needs.

```rust
use rand::SeedableRng;
use streammatch::{prelude::*, algo::*, gens::*};

let rng = &mut rand::rngs::StdRng::seed_from_u64(5);

let bipartite = BipartiteGnp::new().sides(40, 40).prob(0.1).generate(rng);
let auction = AuctionMatcher::new(&bipartite).unwrap();
let matching = auction.find_approximate_matching(0.2).unwrap();
assert!(is_matching(matching.iter()));

let general = Gnp::new().nodes(30).prob(0.2).generate(rng);
let matching = LayeredPathMatcher::new(&general)
    .max_rounds(20)
    .find_approximate_matching(0.5, rng)
    .unwrap();
assert!(matching.len() >= general.maximal_matching().len());
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod matching;
pub mod node;
pub mod stream;
#[cfg(test)]
pub(crate) mod testing;

/// `streammatch::prelude` includes definitions for nodes, edges, streams, matchings and errors.
pub mod prelude {
    pub use super::{edge::*, error::MatchingError, matching::*, node::*, stream::*};
}
