/*!
# Layered Augmenting Paths

A randomized multi-pass streaming algorithm for **general** streams that yields a
`1 / (1 + eps)`-approximate maximum matching with good probability.

Starting from a greedy maximal matching, each of the `r` rounds tries every path parameter
`i = 1..=k` and keeps the largest resulting matching (the lowest `i` wins ties):

1. [`LayerGraph::create`] places free vertices in layer `0` or `i + 1` and every matched edge in
   a random layer of `1..=i` with a random orientation,
2. [`SearchContext`] recursively collects vertex-disjoint paths from layer `i + 1` down to
   layer `0`, marking vertices with [`Tag`]s,
3. [`paths_from_tags`] recovers these augmenting paths and checks them against the stream,
4. the paths are applied to the matching by symmetric difference.

Matchings never shrink: a search that finds nothing leaves the matching untouched.

The derived round count `r` (see [`LayeredParams`]) is enormous even for moderate `eps`; use
[`LayeredPathMatcher::max_rounds`] to cap it. Rounds also stop as soon as fewer than two free
vertices remain, since no augmenting path can exist afterwards.
*/

mod layering;
mod params;
mod paths;
mod search;

use log::{debug, trace};
use rand::Rng;

use crate::{error::*, matching::verify_matching, prelude::*};

pub use layering::*;
pub use params::*;
pub use paths::*;
pub use search::*;

/// Computes approximate maximum matchings on arbitrary streams via layered augmenting paths.
///
/// Randomness is injected per call, so a fixed seed reproduces the result.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use streammatch::{prelude::*, algo::*};
///
/// let stream = vec![Edge(1, 2), Edge(0, 1), Edge(2, 3)];
/// let rng = &mut rand::rngs::StdRng::seed_from_u64(3);
///
/// let matching = LayeredPathMatcher::new(&stream)
///     .max_rounds(200)
///     .find_approximate_matching(0.5, rng)
///     .unwrap();
///
/// assert!(is_matching(matching.iter()));
/// assert!(matching.len() >= 1);
/// ```
#[derive(Debug, Clone)]
pub struct LayeredPathMatcher<'a, S: ?Sized> {
    stream: &'a S,
    max_rounds: Option<u64>,
}

impl<'a, S> LayeredPathMatcher<'a, S>
where
    S: EdgeStream + ?Sized,
{
    /// Creates a matcher over `stream`; there are no preconditions on the stream
    pub fn new(stream: &'a S) -> Self {
        Self {
            stream,
            max_rounds: None,
        }
    }

    /// Caps the number of outer rounds at `rounds` (default: the full derived `r`)
    pub fn max_rounds(mut self, rounds: u64) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Parameters derived from `eps`
    pub fn params(&self, eps: f64) -> Result<LayeredParams> {
        LayeredParams::from_eps(eps)
    }

    /// Computes an approximate maximum matching.
    ///
    /// Fails with `InvalidArgument` unless `0 < eps < 1` and with `ParameterOverflow` if the
    /// derived round count does not fit a `u64`.
    pub fn find_approximate_matching<R>(&self, eps: f64, rng: &mut R) -> Result<Matching>
    where
        R: Rng,
    {
        let params = self.params(eps)?;
        let rounds = self.max_rounds.map_or(params.r, |cap| cap.min(params.r));
        debug!(
            "layered paths: eps = {eps}, k = {}, r = {}, running {rounds} rounds",
            params.k, params.r
        );

        let mut matching = self.stream.maximal_matching();
        debug!("initial maximal matching of size {}", matching.len());

        for round in 0..rounds {
            let free = self.stream.free_vertices(&matching);
            if free.len() < 2 {
                debug!("fewer than two free vertices left after {round} rounds");
                break;
            }

            let mut best: Option<Matching> = None;
            for i in 1..=params.k as usize {
                let candidate = self.augment_with(&matching, &free, i, params.delta, rng)?;
                if best.as_ref().is_none_or(|b| candidate.len() > b.len()) {
                    best = Some(candidate);
                }
            }

            if let Some(best) = best {
                if best.len() > matching.len() {
                    trace!("round {round}: matching grew to {}", best.len());
                }
                matching = best;
            }
        }

        debug!("layered paths: matching of size {}", matching.len());
        Ok(matching)
    }

    /// Runs a single augmenting-path search ("Find-Aug-Paths") with path parameter `i` for the
    /// parameters derived from `eps` and returns `matching` with all found paths applied.
    pub fn augment_once<R>(
        &self,
        matching: &Matching,
        eps: f64,
        i: usize,
        rng: &mut R,
    ) -> Result<Matching>
    where
        R: Rng,
    {
        let params = self.params(eps)?;
        if i == 0 {
            return Err(MatchingError::InvalidPathParameter { i });
        }

        let free = self.stream.free_vertices(matching);
        self.augment_with(matching, &free, i, params.delta, rng)
    }

    fn augment_with<R>(
        &self,
        matching: &Matching,
        free: &[Node],
        i: usize,
        delta: f64,
        rng: &mut R,
    ) -> Result<Matching>
    where
        R: Rng,
    {
        let layers = LayerGraph::create(matching, free, i, rng);
        let tags = SearchContext::new(self.stream, &layers).run(delta);
        let paths = paths_from_tags(self.stream, &layers.frontier, &tags);

        if paths.is_empty() {
            return Ok(matching.clone());
        }

        verify_matching(
            symmetric_difference(matching.iter(), paths),
            "augmenting path application",
        )
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{gens::*, testing::*};

    #[test]
    fn rejects_invalid_eps() {
        let stream = vec![Edge(0, 1)];
        let matcher = LayeredPathMatcher::new(&stream);
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for eps in [0.0, 1.0, -0.2, 7.0, f64::NAN] {
            assert!(matches!(
                matcher.find_approximate_matching(eps, rng),
                Err(MatchingError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn rejects_overflowing_parameters() {
        let stream = vec![Edge(0, 1)];
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        assert_eq!(
            LayeredPathMatcher::new(&stream).find_approximate_matching(0.05, rng),
            Err(MatchingError::ParameterOverflow { k: 21 })
        );
    }

    #[test]
    fn empty_stream() {
        let stream: Vec<Edge> = Vec::new();
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let matching = LayeredPathMatcher::new(&stream)
            .find_approximate_matching(0.5, rng)
            .unwrap();
        assert!(matching.is_empty());
    }

    #[test]
    fn augments_path_of_length_three() {
        // the greedy pass picks the middle edge {1, 2} first
        let stream = vec![Edge(1, 2), Edge(0, 1), Edge(2, 3)];
        assert_eq!(stream.maximal_matching().len(), 1);

        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let matching = LayeredPathMatcher::new(&stream)
            .max_rounds(50)
            .find_approximate_matching(0.5, rng)
            .unwrap();

        assert_valid_matching(&matching, &stream);
        assert_eq!(matching.len(), 2);
    }

    #[test]
    fn single_search_finds_exposed_path_eventually() {
        let stream = vec![Edge(1, 2), Edge(0, 1), Edge(2, 3)];
        let matcher = LayeredPathMatcher::new(&stream);
        let initial = stream.maximal_matching();
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        // the path is exposed with probability 1/4 per attempt
        let found = (0..200).any(|_| {
            let next = matcher.augment_once(&initial, 0.5, 1, rng).unwrap();
            assert!(next.len() >= initial.len());
            next.len() == 2
        });
        assert!(found);
    }

    #[test]
    fn idempotent_without_augmenting_paths() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        // a star has a maximum matching of size one, so nothing can be augmented
        let mut star: Vec<Edge> = Vec::new();
        for v in 1..8 {
            star.push(Edge(0, v));
        }
        let initial = star.maximal_matching();
        let matcher = LayeredPathMatcher::new(&star);

        for i in 1..=3 {
            for _ in 0..20 {
                let next = matcher.augment_once(&initial, 0.5, i, rng).unwrap();
                assert_eq!(next, initial);
            }
        }

        // a perfect matching has no free vertices at all
        let mut path: Vec<Edge> = Vec::new();
        path.connect_path([0, 1, 2, 3]);
        let perfect = Matching::try_from_edges([(0, 1), (2, 3)]).unwrap();
        let next = LayeredPathMatcher::new(&path)
            .augment_once(&perfect, 0.5, 2, rng)
            .unwrap();
        assert_eq!(next, perfect);
    }

    #[test]
    fn rejects_zero_path_parameter() {
        let stream = vec![Edge(0, 1)];
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let matching = Matching::new();
        assert_eq!(
            LayeredPathMatcher::new(&stream).augment_once(&matching, 0.5, 0, rng),
            Err(MatchingError::InvalidPathParameter { i: 0 })
        );
    }

    #[test]
    fn never_shrinks() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for _ in 0..5 {
            let stream = Gnp::new().nodes(30).prob(0.1).shuffled(true).generate(rng);
            let matcher = LayeredPathMatcher::new(&stream);
            let initial = stream.maximal_matching();

            for i in 1..=3 {
                let next = matcher.augment_once(&initial, 0.5, i, rng).unwrap();
                assert_valid_matching(&next, &stream);
                assert!(next.len() >= initial.len());
            }
        }
    }

    #[test]
    fn dense_gnp_gives_valid_matching() {
        // greedy takes {0, 1} and {2, 3}, ..., {16, 17}, leaving the leaves 18 and 19 free,
        // so only the path 18 - 0 - 1 - 19 completes the matching
        let rng = &mut Pcg64Mcg::seed_from_u64(20);
        let stream: EdgeList = (0..10)
            .map(|i| Edge(2 * i, 2 * i + 1))
            .filter(|&e| e != Edge(18, 19))
            .chain(Gnp::new().nodes(18).prob(0.7).generate(rng))
            .chain([Edge(0, 18), Edge(1, 19)])
            .collect();

        let greedy = stream.maximal_matching();
        assert_eq!(greedy.len(), 9);
        assert_eq!(maximum_matching_size(&stream), 10);

        let matching = LayeredPathMatcher::new(&stream)
            .max_rounds(1000)
            .find_approximate_matching(0.95, rng)
            .unwrap();

        assert_valid_matching(&matching, &stream);
        assert_eq!(matching.len(), 10);
        assert!(matching.contains(&Edge(0, 18)) && matching.contains(&Edge(1, 19)));
    }

    #[test]
    fn reproducible_for_fixed_seed() {
        let stream = Gnp::new()
            .nodes(24)
            .prob(0.15)
            .shuffled(true)
            .generate(&mut Pcg64Mcg::seed_from_u64(4));
        let matcher = LayeredPathMatcher::new(&stream).max_rounds(30);

        let first = matcher
            .find_approximate_matching(0.5, &mut Pcg64Mcg::seed_from_u64(9))
            .unwrap();
        let second = matcher
            .find_approximate_matching(0.5, &mut Pcg64Mcg::seed_from_u64(9))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn approximation_ratio_with_high_probability() {
        let eps = 0.5;
        let confidence: f64 = 0.9;
        let trials = (1.0 / (1.0 - confidence)).ln().ceil() as usize;

        let rng = &mut Pcg64Mcg::seed_from_u64(1234);
        let instances = 20;
        let mut successes = 0;

        for _ in 0..instances {
            let stream = Gnp::new().nodes(14).prob(0.2).shuffled(true).generate(rng);
            let optimum = maximum_matching_size(&stream);
            let matcher = LayeredPathMatcher::new(&stream).max_rounds(300);

            let best = (0..trials)
                .map(|_| {
                    let matching = matcher.find_approximate_matching(eps, rng).unwrap();
                    assert_valid_matching(&matching, &stream);
                    matching.len()
                })
                .max()
                .unwrap_or(0);

            if best as f64 >= optimum as f64 / (1.0 + eps) {
                successes += 1;
            }
        }

        assert!(
            successes as f64 / instances as f64 >= confidence - 0.05,
            "only {successes} of {instances} instances reached the ratio"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn always_a_valid_matching(
            pairs in proptest::collection::vec((0u32..12, 0u32..12), 0..40),
            seed in any::<u64>(),
        ) {
            let stream: EdgeList = pairs.into_iter().map(Edge::from).collect();
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);

            let matching = LayeredPathMatcher::new(&stream)
                .max_rounds(5)
                .find_approximate_matching(0.5, rng)
                .unwrap();

            prop_assert!(is_matching(matching.iter()));
            prop_assert!(matching.is_subset_of_stream(&stream));
            prop_assert!(matching.len() >= stream.maximal_matching().len());
        }
    }
}
