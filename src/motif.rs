//! Exact triangle and 4-clique counting over neighbor bitsets.
//!
//! Both counters visit each edge `(x, y)` with `x < y` once and intersect the two neighbor
//! bitsets word by word. Only common neighbors `z > y` are considered, so a triangle
//! `x < y < z` (or a 4-clique `x < y < z < w`) is seen exactly once.

use crate::error::MotifError;
use crate::graph::Graph;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Motif
// ============================================================================

/// Motif shapes the counter understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Motif {
    /// Three mutually adjacent vertices (K3).
    Triangle,
    /// Four mutually adjacent vertices (K4).
    FourClique,
}

impl Motif {
    /// Every supported motif, in report order.
    pub const ALL: [Motif; 2] = [Motif::Triangle, Motif::FourClique];

    /// Counts occurrences of this motif in `graph`.
    pub fn count(self, graph: &Graph) -> u64 {
        match self {
            Motif::Triangle => count_triangles(graph),
            Motif::FourClique => count_four_cliques(graph),
        }
    }

    /// Human-readable label used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Motif::Triangle => "Triangle",
            Motif::FourClique => "4-Clique",
        }
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Motif {
    type Err = MotifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangle" | "triangles" | "k3" => Ok(Motif::Triangle),
            "4-clique" | "4clique" | "four-clique" | "k4" => Ok(Motif::FourClique),
            other => Err(MotifError::InvalidConfig(format!(
                "unknown motif {other:?} (expected \"triangle\" or \"4-clique\")"
            ))),
        }
    }
}

// ============================================================================
// Counting kernels
// ============================================================================

/// Counts triangles `{x, y, z}` with `x < y < z`.
pub fn count_triangles(graph: &Graph) -> u64 {
    let mut count = 0u64;
    for x in 0..graph.vertex_count() {
        let nx = graph.neighbor_set(x);
        for &y in graph.neighbors(x) {
            if y <= x {
                continue;
            }
            count += nx.count_common_above(graph.neighbor_set(y), y) as u64;
        }
    }
    count
}

/// Counts 4-cliques `{x, y, z, w}` with `x < y < z < w`.
pub fn count_four_cliques(graph: &Graph) -> u64 {
    let mut count = 0u64;
    let mut common: Vec<usize> = Vec::new();
    for x in 0..graph.vertex_count() {
        let nx = graph.neighbor_set(x);
        for &y in graph.neighbors(x) {
            if y <= x {
                continue;
            }
            common.clear();
            common.extend(nx.common_above(graph.neighbor_set(y), y));

            for (i, &ci) in common.iter().enumerate() {
                let nci = graph.neighbor_set(ci);
                count += common[i + 1..].iter().filter(|&&cj| nci.contains(cj)).count() as u64;
            }
        }
    }
    count
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSet, DEFAULT_MAX_VERTICES};

    fn graph_of(edges: &[(usize, usize)]) -> Graph {
        let set: EdgeSet = edges.iter().copied().collect();
        Graph::from_edges(&set, DEFAULT_MAX_VERTICES).unwrap()
    }

    fn complete(n: usize) -> Graph {
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        graph_of(&edges)
    }

    #[test]
    fn single_triangle() {
        let g = graph_of(&[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(count_triangles(&g), 1);
        assert_eq!(count_four_cliques(&g), 0);
    }

    #[test]
    fn k4_has_four_triangles_and_one_clique() {
        let g = graph_of(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(count_triangles(&g), 4);
        assert_eq!(count_four_cliques(&g), 1);
    }

    #[test]
    fn path_has_no_triangles() {
        let g = graph_of(&[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(count_triangles(&g), 0);
        assert_eq!(count_four_cliques(&g), 0);
    }

    #[test]
    fn empty_graph_counts_zero() {
        let g = Graph::empty(0);
        assert_eq!(count_triangles(&g), 0);
        assert_eq!(count_four_cliques(&g), 0);

        let isolated = Graph::empty(12);
        assert_eq!(Motif::Triangle.count(&isolated), 0);
        assert_eq!(Motif::FourClique.count(&isolated), 0);
    }

    #[test]
    fn complete_graphs_match_binomials() {
        // K_n has C(n,3) triangles and C(n,4) 4-cliques.
        for (n, tri, k4) in [(5, 10, 5), (6, 20, 15), (10, 120, 210)] {
            let g = complete(n);
            assert_eq!(count_triangles(&g), tri, "K{n} triangles");
            assert_eq!(count_four_cliques(&g), k4, "K{n} 4-cliques");
        }
    }

    #[test]
    fn clique_spanning_word_boundary() {
        // Vertices straddle the first/second bitset words.
        let ids = [10, 63, 64, 127, 128];
        let mut edges = Vec::new();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                edges.push((a, b));
            }
        }
        let g = graph_of(&edges);
        assert_eq!(count_triangles(&g), 10);
        assert_eq!(count_four_cliques(&g), 5);
    }

    #[test]
    fn motif_dispatch_and_parsing() {
        let g = complete(4);
        assert_eq!(Motif::Triangle.count(&g), 4);
        assert_eq!(Motif::FourClique.count(&g), 1);

        assert_eq!("triangle".parse::<Motif>().unwrap(), Motif::Triangle);
        assert_eq!("4-Clique".parse::<Motif>().unwrap(), Motif::FourClique);
        assert_eq!("k4".parse::<Motif>().unwrap(), Motif::FourClique);
        assert!("square".parse::<Motif>().is_err());

        assert_eq!(Motif::FourClique.to_string(), "4-Clique");
    }
}
