use rand::Rng;

use super::*;

/// Position of a vertex within its matched pair at some layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The endpoint reached from the layer above (free vertices are always `A`)
    A,
    /// The matched partner of an `A` vertex; the search continues from here towards lower layers
    B,
}

/// Layer index and side tag of a vertex in a random layering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerLabel {
    /// Layer in `0..=i + 1`
    pub layer: usize,
    /// Side within the matched pair (or `A` for free vertices)
    pub side: Side,
}

impl LayerLabel {
    /// Shorthand for an `A` vertex at `layer`
    pub const fn a(layer: usize) -> Self {
        Self {
            layer,
            side: Side::A,
        }
    }

    /// Shorthand for a `B` vertex at `layer`
    pub const fn b(layer: usize) -> Self {
        Self {
            layer,
            side: Side::B,
        }
    }
}

/// A random layering of the free and matched vertices for augmenting paths of length `2i + 1`.
///
/// - free vertices are placed in layer `0` or `i + 1` by a fair coin flip,
/// - every matched edge is placed in a uniform layer of `1..=i` and randomly oriented into
///   an `A` and a `B` endpoint.
///
/// An augmenting path whose vertices happen to land on strictly decreasing layers with the
/// right orientations can then be found by walking down from layer `i + 1` to layer `0`.
#[derive(Debug, Clone)]
pub struct LayerGraph {
    /// Labels of all free and matched vertices
    pub labels: NodeMap<LayerLabel>,
    /// Free vertices in layer `i + 1` in order of first appearance; the search starts here
    pub frontier: Vec<Node>,
    /// Partner of every matched vertex
    pub mates: NodeMap<Node>,
    /// Number of free vertices plus matched edges per layer, indexed `0..=i + 1`
    pub layer_sizes: Vec<usize>,
    /// Augmenting path parameter this layering was built for
    pub i: usize,
}

impl LayerGraph {
    /// Builds a random layering ("Create-Layer-Graph").
    ///
    /// `free` must list the free vertices of the stream w.r.t. `matching` in a fixed order.
    pub fn create<R>(matching: &Matching, free: &[Node], i: usize, rng: &mut R) -> Self
    where
        R: Rng,
    {
        debug_assert!(i >= 1);

        let mut labels = NodeMap::default();
        labels.reserve(free.len() + 2 * matching.len());
        let mut layer_sizes = vec![0; i + 2];
        let mut frontier = Vec::new();

        for &v in free {
            let layer = if rng.random_bool(0.5) { 0 } else { i + 1 };
            labels.insert(v, LayerLabel::a(layer));
            layer_sizes[layer] += 1;
            if layer == i + 1 {
                frontier.push(v);
            }
        }

        for &Edge(u, v) in matching {
            let layer = rng.random_range(1..=i);
            let (a, b) = if rng.random_bool(0.5) { (u, v) } else { (v, u) };
            labels.insert(a, LayerLabel::a(layer));
            labels.insert(b, LayerLabel::b(layer));
            layer_sizes[layer] += 1;
        }

        Self {
            labels,
            frontier,
            mates: matching.mates(),
            layer_sizes,
            i,
        }
    }

    /// Returns the label of `u`, or `None` if `u` is neither free nor matched
    pub fn label_of(&self, u: Node) -> Option<LayerLabel> {
        self.labels.get(&u).copied()
    }

    /// Returns the matched partner of `u`
    pub fn mate_of(&self, u: Node) -> Option<Node> {
        self.mates.get(&u).copied()
    }

    /// Number of free vertices plus matched edges in `layer`
    pub fn layer_size(&self, layer: usize) -> usize {
        self.layer_sizes.get(layer).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn labels_are_consistent() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);
        let matching = Matching::try_from_edges([(1, 2), (3, 4), (5, 6)]).unwrap();
        let free: [Node; 4] = [0, 7, 8, 9];

        for i in 1..5 {
            let layers = LayerGraph::create(&matching, &free, i, rng);

            assert_eq!(layers.labels.len(), 10);
            assert_eq!(layers.layer_sizes.iter().sum::<usize>(), 4 + 3);
            assert_eq!(
                layers.frontier.len(),
                layers.layer_size(i + 1),
                "only free vertices live on the top layer"
            );

            for &v in &free {
                let label = layers.label_of(v).unwrap();
                assert_eq!(label.side, Side::A);
                assert!(label.layer == 0 || label.layer == i + 1);
                assert_eq!(label.layer == i + 1, layers.frontier.contains(&v));
            }

            for &Edge(u, v) in &matching {
                let (lu, lv) = (layers.label_of(u).unwrap(), layers.label_of(v).unwrap());
                assert_eq!(lu.layer, lv.layer);
                assert!((1..=i).contains(&lu.layer));
                assert_ne!(lu.side, lv.side);
                assert_eq!(layers.mate_of(u), Some(v));
            }

            assert_eq!(layers.label_of(100), None);
        }
    }

    #[test]
    fn reproducible_for_fixed_seed() {
        let matching = Matching::try_from_edges([(1, 2), (3, 4)]).unwrap();
        let free: [Node; 3] = [0, 5, 6];

        let first = LayerGraph::create(&matching, &free, 2, &mut Pcg64Mcg::seed_from_u64(1));
        let second = LayerGraph::create(&matching, &free, 2, &mut Pcg64Mcg::seed_from_u64(1));
        assert_eq!(first.labels, second.labels);
        assert_eq!(first.frontier, second.frontier);
    }
}
