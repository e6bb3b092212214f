use super::*;

/// Search state of a vertex in the layered search ("tag").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Successor on an augmenting path towards layer `0`; a vertex pointing to itself ends a path
    Next(Node),
    /// No augmenting path through this vertex can be completed
    Dead,
}

/// Per-layer result of one stepping pass
#[derive(Debug, Default)]
struct LayerStep {
    /// Greedy maximal matching between the current layer and the `A` vertices one layer below,
    /// stored in both directions
    gamma: NodeMap<Node>,
    /// Partners of the reached lower-layer `A` vertices in stream order
    stepped: Vec<Node>,
}

/// Explicit state of one recursive layer search ("Find-Layer-Paths").
///
/// The context owns the tag map and borrows the stream and the layering; every recursive call
/// works on the same context instead of threading maps through arguments.
#[derive(Debug)]
pub struct SearchContext<'a, S: ?Sized> {
    stream: &'a S,
    layers: &'a LayerGraph,
    tags: NodeMap<Tag>,
}

impl<'a, S> SearchContext<'a, S>
where
    S: EdgeStream + ?Sized,
{
    /// Creates a fresh context without any tags
    pub fn new(stream: &'a S, layers: &'a LayerGraph) -> Self {
        Self {
            stream,
            layers,
            tags: NodeMap::default(),
        }
    }

    /// Runs the search from the top layer `i + 1` with initial density threshold `delta` and
    /// returns the final tags.
    pub fn run(mut self, delta: f64) -> NodeMap<Tag> {
        let layers = self.layers;
        self.find_layer_paths(&layers.frontier, delta, layers.i + 1);
        self.tags
    }

    /// Returns the current tag of `u`
    pub fn tag_of(&self, u: Node) -> Option<Tag> {
        self.tags.get(&u).copied()
    }

    fn is_tagged(&self, u: Node) -> bool {
        self.tags.contains_key(&u)
    }

    /// Finds vertex-disjoint paths from the vertices of `layer` (all in layer `j`) down to
    /// free vertices in layer `0`.
    ///
    /// Afterwards every vertex of `layer` carries a tag: either its successor on a path or
    /// `Dead`. Matched partners are tagged together with their vertex.
    fn find_layer_paths(&mut self, layer: &[Node], delta: f64, j: usize) {
        let members: NodeSet = layer.iter().copied().collect();
        let mut step = self.step_down(&members, j);

        if j == 1 {
            for &u in layer {
                if self.is_tagged(u) {
                    continue;
                }

                match step.gamma.get(&u) {
                    Some(&w) => {
                        self.tags.insert(u, Tag::Next(w));
                        if let Some(partner) = self.layers.mate_of(u) {
                            self.tags.insert(partner, Tag::Next(u));
                        }
                        self.tags.insert(w, Tag::Next(w));
                    }
                    None => self.mark_dead(u),
                }
            }
            return;
        }

        let threshold = delta * self.layers.layer_size(j - 1) as f64;
        while step.stepped.len() as f64 > threshold {
            self.find_layer_paths(&step.stepped, delta * delta, j - 1);

            for &v in &step.stepped {
                if self.tag_of(v) == Some(Tag::Dead) {
                    continue;
                }

                let link = self
                    .layers
                    .mate_of(v)
                    .and_then(|a| step.gamma.get(&a).map(|&s| (s, a)));

                match link {
                    Some((s, a)) => {
                        self.tags.insert(s, Tag::Next(a));
                        self.tags.insert(a, Tag::Next(v));
                    }
                    None => self.mark_dead(v),
                }
            }

            step = self.step_down(&members, j);
        }

        for &v in layer {
            if !self.is_tagged(v) {
                self.mark_dead(v);
            }
        }
    }

    /// One pass: greedy maximal matching (in stream order) between untagged vertices of
    /// `members` and untagged `A` vertices of layer `j - 1`
    fn step_down(&self, members: &NodeSet, j: usize) -> LayerStep {
        let target = LayerLabel::a(j - 1);
        let mut step = LayerStep::default();

        for Edge(u, v) in self.stream.pass() {
            let Some((s, t)) = self.orient_down(members, target, u, v) else {
                continue;
            };
            if step.gamma.contains_key(&s) || step.gamma.contains_key(&t) {
                continue;
            }

            step.gamma.insert(s, t);
            step.gamma.insert(t, s);
            if let Some(partner) = self.layers.mate_of(t) {
                step.stepped.push(partner);
            }
        }

        step
    }

    /// Returns `(upper, lower)` if the edge `{u, v}` steps from `members` down to `target`
    fn orient_down(
        &self,
        members: &NodeSet,
        target: LayerLabel,
        u: Node,
        v: Node,
    ) -> Option<(Node, Node)> {
        let steps = |from: Node, to: Node| {
            members.contains(&from)
                && !self.is_tagged(from)
                && self.layers.label_of(to) == Some(target)
                && !self.is_tagged(to)
        };

        if steps(u, v) {
            Some((u, v))
        } else if steps(v, u) {
            Some((v, u))
        } else {
            None
        }
    }

    fn mark_dead(&mut self, u: Node) {
        self.tags.insert(u, Tag::Dead);
        if let Some(partner) = self.layers.mate_of(u) {
            self.tags.insert(partner, Tag::Dead);
        }
    }
}
