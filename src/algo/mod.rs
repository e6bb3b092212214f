/*!
# Matching Algorithms

This module provides the streaming matchers of this crate together with the bipartiteness
machinery they depend on. All algorithms are re-exported at the top level of this module, so you
can simply do:
```rust
use streammatch::algo::*;
```
and gain access to:
- [`AuctionMatcher`]: deterministic `(1 - eps)`-approximation for bipartite streams,
- [`LayeredPathMatcher`]: randomized `1 / (1 + eps)`-approximation for general streams,
- [`BipartiteTest`] and [`Bipartition`]: 2-colouring and bidder/item classification of streams.

Matchers are configured as structs over a borrowed [`EdgeStream`](crate::stream::EdgeStream) and
own all of their intermediate state per call.
*/

mod auction;
mod bipartite;
mod layered;

use crate::prelude::*;

pub use auction::*;
pub use bipartite::*;
pub use layered::*;
