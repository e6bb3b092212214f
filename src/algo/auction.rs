/*!
# Auction Matcher

A price-based streaming algorithm for **bipartite** streams that yields a `(1 - eps)`-approximate
maximum matching. Vertices are split into *bidders* and *items*; every item carries a price in
`[0, 1]`. In each of the `ceil(2 / eps^2)` rounds

1. every bidder computes its *best offer*, the cheapest price among its incident items,
2. unallocated bidders are greedily matched (in stream order) to items priced exactly at their
   best offer and below `1`, using every vertex at most once per round,
3. every accepted bid evicts the item's previous owner and raises the item's price by `eps`.

Popular items thus become expensive and push bidders towards less contested ones.
The algorithm is deterministic for a fixed stream order.
*/

use std::collections::BTreeSet;

use log::{debug, trace};

use super::*;
use crate::{error::*, matching::verify_matching};

/// Computes approximate maximum matchings on bipartite streams via price bidding.
///
/// # Example
/// ```rust
/// use streammatch::{prelude::*, algo::*};
///
/// let stream = vec![Edge(0, 10), Edge(0, 11), Edge(1, 10), Edge(2, 11)];
/// let matcher = AuctionMatcher::new(&stream).unwrap();
/// let matching = matcher.find_approximate_matching(0.25).unwrap();
///
/// assert!(is_matching(matching.iter()));
/// assert_eq!(matching.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AuctionMatcher<'a, S: ?Sized> {
    stream: &'a S,
    bipartition: Bipartition,
}

/// Per-call auction state; discarded when the call returns
#[derive(Debug, Default)]
struct AuctionState {
    prices: NodeMap<f64>,
    /// bidder -> item
    allocation: NodeMap<Node>,
    /// item -> bidder
    owners: NodeMap<Node>,
}

impl AuctionState {
    fn price_of(&self, item: Node) -> f64 {
        self.prices.get(&item).copied().unwrap_or(0.0)
    }

    fn is_allocated(&self, bidder: Node) -> bool {
        self.allocation.contains_key(&bidder)
    }

    /// Hands `item` to `bidder`, evicting the previous owner, and raises the price by `eps`
    fn settle(&mut self, bidder: Node, item: Node, eps: f64) {
        if let Some(previous) = self.owners.insert(item, bidder) {
            self.allocation.remove(&previous);
        }
        self.allocation.insert(bidder, item);

        let price = self.prices.entry(item).or_insert(0.0);
        *price = (*price + eps).min(1.0);
    }
}

impl<'a, S> AuctionMatcher<'a, S>
where
    S: EdgeStream + ?Sized,
{
    /// Creates a matcher over `stream`.
    ///
    /// Fails with `InvalidGraph` if the stream is not bipartite. The bidder/item classification
    /// is computed once with the greedy online rule; should that rule produce an inconsistent
    /// classification, the BFS 2-colouring of the stream is used instead.
    pub fn new(stream: &'a S) -> Result<Self> {
        let Some(coloring) = stream.compute_bipartition() else {
            return Err(MatchingError::InvalidGraph(
                "the auction matcher requires a bipartite edge stream".into(),
            ));
        };

        let online = Bipartition::classify_online(stream);
        let bipartition = if online.is_consistent_with(stream) {
            online
        } else {
            debug!("online bidder/item classification is inconsistent; using 2-colouring");
            coloring
        };

        Ok(Self {
            stream,
            bipartition,
        })
    }

    /// Returns the bidder/item classification used by this matcher
    pub fn bipartition(&self) -> &Bipartition {
        &self.bipartition
    }

    /// Number of price-update rounds performed for `eps`, i.e. `ceil(2 / eps^2)`
    pub fn rounds_for(eps: f64) -> Result<u64> {
        let eps = validate_eps(eps)?;
        Ok((2.0 / (eps * eps)).ceil() as u64)
    }

    /// Computes a `(1 - eps)`-approximate maximum matching.
    ///
    /// Fails with `InvalidArgument` unless `0 < eps < 1`.
    pub fn find_approximate_matching(&self, eps: f64) -> Result<Matching> {
        let rounds = Self::rounds_for(eps)?;
        debug!("auction: eps = {eps}, rounds = {rounds}");

        let mut state = AuctionState::default();

        for round in 0..rounds {
            let offers = self.best_offers(&state);
            let bids = self.maximal_bid_matching(&state, &offers)?;

            trace!("auction round {round}: {} accepted bids", bids.len());

            // no bid leaves prices and allocation untouched, so every later round is identical
            if bids.is_empty() {
                debug!("auction reached a fixed point after {round} rounds");
                break;
            }

            for (bidder, item) in bids {
                state.settle(bidder, item, eps);
            }
        }

        let matching = self.recover_allocation(&state)?;
        debug!("auction: matching of size {}", matching.len());
        Ok(matching)
    }

    /// Demand pass: cheapest incident item price for every bidder
    fn best_offers(&self, state: &AuctionState) -> NodeMap<f64> {
        let mut offers: NodeMap<f64> = NodeMap::default();

        for (bidder, item) in self.oriented_pass() {
            let price = state.price_of(item);
            offers
                .entry(bidder)
                .and_modify(|best| *best = best.min(price))
                .or_insert(price);
        }

        offers
    }

    /// Maximal-bid-matching pass: greedy maximal matching over edges from unallocated bidders
    /// to items priced at their best offer and below `1`
    fn maximal_bid_matching(
        &self,
        state: &AuctionState,
        offers: &NodeMap<f64>,
    ) -> Result<Vec<(Node, Node)>> {
        let mut covered = NodeSet::default();
        let mut bids = Vec::new();

        for (bidder, item) in self.oriented_pass() {
            if state.is_allocated(bidder) || covered.contains(&bidder) || covered.contains(&item)
            {
                continue;
            }

            let price = state.price_of(item);
            if price < 1.0 && offers.get(&bidder) == Some(&price) {
                covered.insert(bidder);
                covered.insert(item);
                bids.push((bidder, item));
            }
        }

        if !is_matching(bids.iter()) {
            return Err(MatchingError::InvariantViolation(
                "bids of one round share a vertex".into(),
            ));
        }

        Ok(bids)
    }

    /// Recovery pass: keeps the stream edges whose endpoints form an active allocation
    fn recover_allocation(&self, state: &AuctionState) -> Result<Matching> {
        let edges: BTreeSet<Edge> = self
            .stream
            .pass()
            .filter(|&e| {
                self.bipartition
                    .orient(e)
                    .is_some_and(|(bidder, item)| state.allocation.get(&bidder) == Some(&item))
            })
            .map(|e| e.normalized())
            .collect();

        verify_matching(edges, "allocation recovery")
    }

    /// One pass over the stream yielding `(bidder, item)` pairs
    fn oriented_pass(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.stream.pass().filter_map(|e| {
            let oriented = self.bipartition.orient(e);
            debug_assert!(oriented.is_some(), "edge {e} is not bipartite");
            oriented
        })
    }
}
