//! Undirected simple graphs with two agreeing views: adjacency lists for iteration and
//! word-packed neighbor bitsets for fast intersection.

use crate::error::{MotifError, Result};
use std::collections::BTreeSet;

/// Default ceiling on vertex ids (`id < DEFAULT_MAX_VERTICES`).
pub const DEFAULT_MAX_VERTICES: usize = 50_000;

const WORD_BITS: usize = u64::BITS as usize;

#[inline(always)]
const fn word_index(v: usize) -> usize {
    v / WORD_BITS
}

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << (v % WORD_BITS)
}

/// Mask keeping the bits strictly above `floor` inside the word that holds `floor`.
#[inline(always)]
const fn above_mask(floor: usize) -> u64 {
    let offset = floor % WORD_BITS;
    if offset == WORD_BITS - 1 {
        0
    } else {
        u64::MAX << (offset + 1)
    }
}

// ============================================================================
// NeighborSet
// ============================================================================

/// Fixed-capacity bit vector over vertex ids, packed into `u64` words.
///
/// The capacity is chosen when the owning graph is built, so there is no global
/// compile-time ceiling on the number of vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborSet {
    words: Vec<u64>,
    capacity: usize,
}

impl NeighborSet {
    /// Creates an empty set able to hold ids in `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0u64; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Inserts `v`, returning `true` if it was not already present.
    ///
    /// # Panics
    /// Panics if `v >= capacity`.
    #[inline]
    pub fn insert(&mut self, v: usize) -> bool {
        assert!(v < self.capacity, "id {v} out of range for capacity {}", self.capacity);
        let word = &mut self.words[word_index(v)];
        let fresh = *word & bit(v) == 0;
        *word |= bit(v);
        fresh
    }

    /// Returns whether `v` is in the set. Ids beyond the capacity are never members.
    #[inline(always)]
    pub fn contains(&self, v: usize) -> bool {
        v < self.capacity && self.words[word_index(v)] & bit(v) != 0
    }

    /// Number of ids in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no id is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Counts ids present in both `self` and `other` that are strictly greater than `floor`.
    ///
    /// One AND + popcount per word; the word holding `floor` is masked.
    #[inline]
    pub fn count_common_above(&self, other: &NeighborSet, floor: usize) -> usize {
        let len = self.words.len().min(other.words.len());
        let first = word_index(floor);
        if first >= len {
            return 0;
        }
        let head = self.words[first] & other.words[first] & above_mask(floor);
        let tail: usize = self.words[first + 1..len]
            .iter()
            .zip(&other.words[first + 1..len])
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum();
        head.count_ones() as usize + tail
    }

    /// Iterates, in ascending order, the ids present in both sets and strictly greater than `floor`.
    pub fn common_above<'a>(&'a self, other: &'a NeighborSet, floor: usize) -> CommonAbove<'a> {
        let len = self.words.len().min(other.words.len());
        let left = &self.words[..len];
        let right = &other.words[..len];
        let word = word_index(floor);
        if word >= len {
            return CommonAbove {
                left,
                right,
                word: len,
                current: 0,
            };
        }
        CommonAbove {
            left,
            right,
            word,
            current: left[word] & right[word] & above_mask(floor),
        }
    }
}

/// Ascending iterator over the members of a [`NeighborSet`].
#[derive(Clone, Debug)]
pub struct Ones<'a> {
    words: &'a [u64],
    word: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let offset = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word * WORD_BITS + offset);
            }
            self.word += 1;
            if self.word >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word];
        }
    }
}

/// Ascending iterator over the intersection of two [`NeighborSet`]s above a floor.
#[derive(Clone, Debug)]
pub struct CommonAbove<'a> {
    left: &'a [u64],
    right: &'a [u64],
    word: usize,
    current: u64,
}

impl Iterator for CommonAbove<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let offset = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word * WORD_BITS + offset);
            }
            self.word += 1;
            if self.word >= self.left.len() {
                return None;
            }
            self.current = self.left[self.word] & self.right[self.word];
        }
    }
}

// ============================================================================
// EdgeSet
// ============================================================================

/// Deduplicated undirected edges, stored as `(min, max)` pairs in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeSet<(usize, usize)>,
}

impl EdgeSet {
    /// Creates an empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the undirected edge `{a, b}`.
    ///
    /// Returns `false` when the edge was already present or is a self-loop; neither case
    /// changes the set.
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        self.edges.insert((a.min(b), a.max(b)))
    }

    /// Returns whether `{a, b}` is present.
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.edges.contains(&(a.min(b), a.max(b)))
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the set holds no edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Largest endpoint over all edges.
    pub fn max_vertex(&self) -> Option<usize> {
        self.edges.iter().map(|&(_, b)| b).max()
    }

    /// Iterates edges as `(u, v)` with `u < v`, in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}

impl FromIterator<(usize, usize)> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<(usize, usize)> for EdgeSet {
    fn extend<I: IntoIterator<Item = (usize, usize)>>(&mut self, iter: I) {
        for (a, b) in iter {
            self.insert(a, b);
        }
    }
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// Incrementally assembles a [`Graph`], keeping both adjacency views in sync.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    adj: Vec<Vec<usize>>,
    bits: Vec<NeighborSet>,
    edge_count: usize,
}

impl GraphBuilder {
    /// Creates an edgeless builder on `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            bits: vec![NeighborSet::with_capacity(n); n],
            edge_count: 0,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges accepted so far.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Adds `{a, b}` unless it is a self-loop or already present; returns whether it was added.
    ///
    /// # Panics
    /// Panics if either endpoint is `>= vertex_count()`.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        let n = self.vertex_count();
        assert!(a < n && b < n, "edge ({a},{b}) out of range for {n} vertices");
        if a == b || self.bits[a].contains(b) {
            return false;
        }
        self.bits[a].insert(b);
        self.bits[b].insert(a);
        self.adj[a].push(b);
        self.adj[b].push(a);
        self.edge_count += 1;
        true
    }

    /// Freezes the builder into an immutable graph.
    pub fn finish(self) -> Graph {
        Graph {
            adj: self.adj,
            bits: self.bits,
            edge_count: self.edge_count,
        }
    }
}

// ============================================================================
// Graph
// ============================================================================

/// Immutable undirected simple graph.
///
/// Invariant: `w ∈ adj[v] ⇔ v ∈ adj[w] ⇔ bits[v] ∋ w ⇔ bits[w] ∋ v`.
#[derive(Clone, Debug)]
pub struct Graph {
    adj: Vec<Vec<usize>>,
    bits: Vec<NeighborSet>,
    edge_count: usize,
}

impl Graph {
    /// Builds a graph whose vertex set is `0..=max endpoint`.
    ///
    /// An empty edge set gives the empty graph on zero vertices.
    ///
    /// # Errors
    /// Returns [`MotifError::VertexOutOfRange`] if any endpoint is `>= max_vertices`.
    pub fn from_edges(edges: &EdgeSet, max_vertices: usize) -> Result<Self> {
        let n = edges.max_vertex().map_or(0, |v| v + 1);
        Self::with_vertex_count(edges, n, max_vertices)
    }

    /// Builds a graph on exactly `n` vertices.
    ///
    /// # Errors
    /// Returns [`MotifError::VertexOutOfRange`] if `n > max_vertices` or an endpoint is `>= n`.
    pub fn with_vertex_count(edges: &EdgeSet, n: usize, max_vertices: usize) -> Result<Self> {
        if n > max_vertices {
            return Err(MotifError::VertexOutOfRange {
                vertex: n - 1,
                limit: max_vertices,
            });
        }
        if let Some(vertex) = edges.max_vertex().filter(|&v| v >= n) {
            return Err(MotifError::VertexOutOfRange { vertex, limit: n });
        }

        let mut builder = GraphBuilder::new(n);
        for (u, v) in edges.iter() {
            builder.add_edge(u, v);
        }
        Ok(builder.finish())
    }

    /// Creates an edgeless graph on `n` vertices.
    pub fn empty(n: usize) -> Self {
        GraphBuilder::new(n).finish()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of `v` in insertion order.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    /// Neighbor bitset of `v`.
    #[inline(always)]
    pub fn neighbor_set(&self, v: usize) -> &NeighborSet {
        &self.bits[v]
    }

    /// Returns whether the edge `{u, v}` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.vertex_count() && self.bits[u].contains(v)
    }

    /// Degree of `v`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// `degree[v]` for every vertex.
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.adj.iter().map(Vec::len).collect()
    }

    /// Iterates every edge once as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(u, nbrs)| nbrs.iter().filter(move |&&v| v > u).map(move |&v| (u, v)))
    }

    /// Captures what the null models need to know about this graph.
    pub fn profile(&self) -> GraphProfile {
        GraphProfile {
            vertex_count: self.vertex_count(),
            edge_count: self.edge_count,
            degrees: self.degree_sequence(),
        }
    }
}

// ============================================================================
// GraphProfile
// ============================================================================

/// Vertex count, edge count and degree sequence of a real graph, captured before sampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphProfile {
    /// Number of vertices `n`.
    pub vertex_count: usize,
    /// Number of edges `m`.
    pub edge_count: usize,
    /// `degrees[v]` of the real graph.
    pub degrees: Vec<usize>,
}

impl GraphProfile {
    /// Total number of half-edges (`2m` for a profile taken from a simple graph).
    pub fn stub_count(&self) -> usize {
        self.degrees.iter().sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
