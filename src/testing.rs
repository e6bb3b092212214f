//! Exact reference matchings and shared assertions for unit tests.

use itertools::Itertools;

use crate::{algo::Bipartition, prelude::*};

/// Asserts that `matching` is a matching and only uses edges of `stream`
pub(crate) fn assert_valid_matching<S>(matching: &Matching, stream: &S)
where
    S: EdgeStream + ?Sized,
{
    assert!(
        is_matching(matching.iter()),
        "{:?} is not a matching",
        matching.edges()
    );
    assert!(
        matching.is_subset_of_stream(stream),
        "{:?} uses edges outside of the stream",
        matching.edges()
    );
}

/// Size of a maximum matching of a bipartite stream (Kuhn's augmenting path search)
pub(crate) fn maximum_bipartite_matching_size<S>(stream: &S, bipartition: &Bipartition) -> usize
where
    S: EdgeStream + ?Sized,
{
    let mut adjacency: NodeMap<Vec<Node>> = NodeMap::default();
    for e in stream.pass() {
        let (bidder, item) = bipartition.orient(e).expect("stream is not bipartite");
        adjacency.entry(bidder).or_default().push(item);
    }

    fn try_kuhn(
        u: Node,
        adjacency: &NodeMap<Vec<Node>>,
        visited: &mut NodeSet,
        owner: &mut NodeMap<Node>,
    ) -> bool {
        for &v in &adjacency[&u] {
            if !visited.insert(v) {
                continue;
            }
            let free_or_movable = match owner.get(&v) {
                None => true,
                Some(&w) => try_kuhn(w, adjacency, visited, owner),
            };
            if free_or_movable {
                owner.insert(v, u);
                return true;
            }
        }
        false
    }

    let mut owner = NodeMap::default();
    adjacency
        .keys()
        .copied()
        .sorted()
        .filter(|&u| try_kuhn(u, &adjacency, &mut NodeSet::default(), &mut owner))
        .count()
}

/// Size of a maximum matching of a small general stream (at most 24 vertices), via dynamic
/// programming over vertex subsets
pub(crate) fn maximum_matching_size<S>(stream: &S) -> usize
where
    S: EdgeStream + ?Sized,
{
    let vertices = stream.vertex_set().into_iter().sorted().collect_vec();
    let n = vertices.len();
    assert!(n <= 24, "too many vertices for the exact reference: {n}");

    let index: NodeMap<usize> = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let mut neighbors = vec![0u32; n];
    for Edge(u, v) in stream.pass() {
        let (i, j) = (index[&u], index[&v]);
        neighbors[i] |= 1 << j;
        neighbors[j] |= 1 << i;
    }

    // best[mask] = maximum matching within the vertices of `mask`
    let mut best = vec![0u8; 1 << n];
    for mask in 1usize..(1 << n) {
        let v = mask.trailing_zeros() as usize;
        let rest = mask & !(1 << v);

        let mut value = best[rest];
        let mut candidates = neighbors[v] as usize & rest;
        while candidates != 0 {
            let u = candidates.trailing_zeros() as usize;
            value = value.max(best[rest & !(1 << u)] + 1);
            candidates &= candidates - 1;
        }
        best[mask] = value;
    }

    best[(1 << n) - 1] as usize
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{algo::BipartiteTest, gens::*};

    #[test]
    fn reference_sizes() {
        let mut path: Vec<Edge> = Vec::new();
        path.connect_path([0, 1, 2, 3, 4]);
        assert_eq!(maximum_matching_size(&path), 2);

        let mut cycle: Vec<Edge> = Vec::new();
        cycle.connect_cycle([10, 11, 12, 13, 14, 15]);
        assert_eq!(maximum_matching_size(&cycle), 3);
        let bipartition = cycle.compute_bipartition().unwrap();
        assert_eq!(maximum_bipartite_matching_size(&cycle, &bipartition), 3);

        assert_eq!(maximum_matching_size(&CompleteGraph::new().nodes(7).generate()), 3);

        let biclique = CompleteBipartite::new().sides(4, 9).generate();
        let bipartition = biclique.compute_bipartition().unwrap();
        assert_eq!(maximum_bipartite_matching_size(&biclique, &bipartition), 4);
        assert_eq!(maximum_matching_size(&biclique), 4);

        let empty: Vec<Edge> = Vec::new();
        assert_eq!(maximum_matching_size(&empty), 0);
    }
}
