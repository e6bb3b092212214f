/*!
# Node Representation

We choose `Node = u32` as almost all streams we care about have less than `2^32` distinct vertices.
In contrast to a dense graph representation, identifiers in a stream are **not** required to be
contiguous: a stream may mention vertex `7` and vertex `1_000_000` without anything in between.
All per-vertex state is therefore kept in hash maps keyed by `Node` rather than in `Vec`s.
*/

/// Vertices are arbitrary unsigned integers; identity is the only meaningful relation between them
pub type Node = u32;

/// Number of nodes/vertices
pub type NumNodes = usize;

/// Per-vertex map with a fast, deterministic hasher.
///
/// `fxhash` has no random state, so iteration order only depends on the inserted keys.
/// This keeps every matcher reproducible for a fixed stream and seed.
pub type NodeMap<V> = fxhash::FxHashMap<Node, V>;

/// Per-vertex set with a fast, deterministic hasher
pub type NodeSet = fxhash::FxHashSet<Node>;
