//! Randomized reference graphs: configuration-model stub matching and Erdős–Rényi G(n, m).
//!
//! Every call builds a fresh [`Graph`]; nothing is carried over between samples except the
//! caller's RNG state.

use crate::error::{MotifError, Result};
use crate::graph::{Graph, GraphBuilder, GraphProfile};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// NullModel
// ============================================================================

/// Strategy used to draw randomized graphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NullModel {
    /// Stub matching that preserves each vertex's degree (loops and parallel edges dropped).
    #[default]
    Configuration,
    /// Uniform G(n, m): same vertex and edge counts, degrees free.
    ErdosRenyi,
}

impl NullModel {
    /// All available strategies.
    pub const ALL: [NullModel; 2] = [NullModel::Configuration, NullModel::ErdosRenyi];

    /// Draws one randomized graph shaped after `profile`.
    ///
    /// # Errors
    /// Only [`NullModel::ErdosRenyi`] can fail, see [`erdos_renyi`].
    pub fn generate<R: Rng + ?Sized>(self, profile: &GraphProfile, rng: &mut R) -> Result<Graph> {
        match self {
            NullModel::Configuration => Ok(configuration_model(profile, rng)),
            NullModel::ErdosRenyi => erdos_renyi(profile, rng),
        }
    }

    /// Label used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            NullModel::Configuration => "configuration model",
            NullModel::ErdosRenyi => "Erdős–Rényi G(n,m)",
        }
    }

    /// Whether samples can come out with fewer edges than the real graph.
    pub const fn may_underfill(self) -> bool {
        matches!(self, NullModel::Configuration)
    }
}

impl fmt::Display for NullModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NullModel {
    type Err = MotifError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "configuration" | "config" | "cm" => Ok(NullModel::Configuration),
            "erdos-renyi" | "erdos_renyi" | "er" | "gnm" => Ok(NullModel::ErdosRenyi),
            other => Err(MotifError::InvalidConfig(format!(
                "unknown null model {other:?} (expected \"configuration\" or \"erdos-renyi\")"
            ))),
        }
    }
}

// ============================================================================
// Generators
// ============================================================================

/// Maximum number of edges in a simple graph on `n` vertices.
#[inline]
pub const fn max_simple_edges(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Configuration model by stub matching.
///
/// Vertex `v` contributes `degrees[v]` stubs; the stubs are shuffled and consecutive pairs
/// become candidate edges. Self-pairs and repeats are discarded, not redrawn, so the result
/// may hold fewer than `edge_count` edges. Matching stops once `edge_count` edges are placed.
pub fn configuration_model<R: Rng + ?Sized>(profile: &GraphProfile, rng: &mut R) -> Graph {
    debug_assert_eq!(profile.degrees.len(), profile.vertex_count);

    let mut stubs: Vec<usize> = Vec::with_capacity(profile.stub_count());
    for (v, &d) in profile.degrees.iter().enumerate() {
        stubs.extend(std::iter::repeat(v).take(d));
    }
    stubs.shuffle(rng);

    let mut builder = GraphBuilder::new(profile.vertex_count);
    for pair in stubs.chunks_exact(2) {
        if builder.edge_count() >= profile.edge_count {
            break;
        }
        builder.add_edge(pair[0], pair[1]);
    }
    builder.finish()
}

/// Erdős–Rényi G(n, m): uniform vertex pairs, rejected and redrawn on loops or repeats,
/// until exactly `edge_count` distinct edges exist.
///
/// # Errors
/// Returns [`MotifError::TooManyEdges`] if `edge_count > n(n-1)/2`.
pub fn erdos_renyi<R: Rng + ?Sized>(profile: &GraphProfile, rng: &mut R) -> Result<Graph> {
    let n = profile.vertex_count;
    let m = profile.edge_count;
    if m > max_simple_edges(n) {
        return Err(MotifError::TooManyEdges {
            edges: m,
            vertices: n,
        });
    }

    let mut builder = GraphBuilder::new(n);
    while builder.edge_count() < m {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        builder.add_edge(a, b);
    }
    Ok(builder.finish())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSet, DEFAULT_MAX_VERTICES};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;
    use std::collections::BTreeSet;

    fn graph_of(edges: &[(usize, usize)]) -> Graph {
        let set: EdgeSet = edges.iter().copied().collect();
        Graph::from_edges(&set, DEFAULT_MAX_VERTICES).unwrap()
    }

    fn sparse_random(seed: u64, n: usize, p: f64) -> Graph {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut set = EdgeSet::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    set.insert(i, j);
                }
            }
        }
        Graph::with_vertex_count(&set, n, DEFAULT_MAX_VERTICES).unwrap()
    }

    fn assert_simple(g: &Graph) {
        let mut seen = BTreeSet::new();
        for (u, v) in g.edges() {
            assert_ne!(u, v, "self-loop");
            assert!(seen.insert((u, v)), "parallel edge ({u},{v})");
        }
        assert_eq!(seen.len(), g.edge_count());
    }

    #[test]
    fn configuration_model_is_simple_and_bounded_by_real_degrees() {
        let real = sparse_random(7, 120, 0.05);
        let profile = real.profile();
        let mut rng = XorShiftRng::seed_from_u64(12345);

        for _ in 0..20 {
            let sample = configuration_model(&profile, &mut rng);
            assert_simple(&sample);
            assert_eq!(sample.vertex_count(), profile.vertex_count);
            assert!(sample.edge_count() <= profile.edge_count);
            for v in 0..sample.vertex_count() {
                assert!(
                    sample.degree(v) <= profile.degrees[v],
                    "vertex {v} gained degree: {} > {}",
                    sample.degree(v),
                    profile.degrees[v]
                );
            }
        }
    }

    #[test]
    fn configuration_model_preserves_degrees_on_average() {
        let real = sparse_random(11, 150, 0.03);
        let profile = real.profile();
        let mut rng = XorShiftRng::seed_from_u64(5);

        let rounds = 400;
        let mut totals = vec![0usize; profile.vertex_count];
        for _ in 0..rounds {
            let sample = configuration_model(&profile, &mut rng);
            for (v, total) in totals.iter_mut().enumerate() {
                *total += sample.degree(v);
            }
        }

        for (v, (&total, &d)) in totals.iter().zip(&profile.degrees).enumerate() {
            let mean = total as f64 / rounds as f64;
            let d = d as f64;
            assert!(mean <= d, "vertex {v}: mean degree {mean} above real degree {d}");
            assert!(
                mean >= 0.85 * d - 0.1,
                "vertex {v}: mean degree {mean} drifted from real degree {d}"
            );
        }

        let placed: usize = totals.iter().sum();
        let expected = rounds * profile.stub_count();
        assert!(
            placed * 20 >= expected * 19,
            "aggregate degree {placed} too far below {expected}"
        );
    }

    #[test]
    fn configuration_model_keeps_most_stubs_on_sparse_graphs() {
        let real = sparse_random(99, 200, 0.015);
        let profile = real.profile();
        let mut rng = XorShiftRng::seed_from_u64(1);

        let rounds = 30;
        let placed: usize = (0..rounds)
            .map(|_| configuration_model(&profile, &mut rng).edge_count())
            .sum();
        let target = rounds * profile.edge_count;
        assert!(
            placed * 10 >= target * 9,
            "too many rejected stub pairs: placed {placed} of {target}"
        );
    }

    #[test]
    fn configuration_model_preserves_path_degrees_when_fully_placed() {
        let path = graph_of(&[(0, 1), (1, 2), (2, 3)]);
        let profile = path.profile();
        assert_eq!(profile.degrees, vec![1, 2, 2, 1]);

        let mut full_samples = 0;
        for seed in 0..200 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let sample = configuration_model(&profile, &mut rng);
            assert_simple(&sample);
            if sample.edge_count() == profile.edge_count {
                assert_eq!(sample.degree_sequence(), vec![1, 2, 2, 1]);
                full_samples += 1;
            }
        }
        assert!(full_samples > 0, "no seed placed every stub");
    }

    #[test]
    fn configuration_model_is_deterministic_per_seed() {
        let profile = sparse_random(3, 60, 0.1).profile();
        let a = configuration_model(&profile, &mut XorShiftRng::seed_from_u64(42));
        let b = configuration_model(&profile, &mut XorShiftRng::seed_from_u64(42));
        assert_eq!(a.edges().collect::<Vec<_>>(), b.edges().collect::<Vec<_>>());
    }

    #[test]
    fn erdos_renyi_hits_exact_edge_count() {
        let mut rng = XorShiftRng::seed_from_u64(5);
        for &(n, p) in &[(30, 0.1), (50, 0.3), (10, 0.9)] {
            let profile = sparse_random(n as u64, n, p).profile();
            for _ in 0..5 {
                let sample = erdos_renyi(&profile, &mut rng).unwrap();
                assert_simple(&sample);
                assert_eq!(sample.vertex_count(), n);
                assert_eq!(sample.edge_count(), profile.edge_count);
            }
        }
    }

    #[test]
    fn erdos_renyi_fills_complete_graph() {
        let profile = GraphProfile {
            vertex_count: 7,
            edge_count: max_simple_edges(7),
            degrees: vec![6; 7],
        };
        let sample = erdos_renyi(&profile, &mut XorShiftRng::seed_from_u64(0)).unwrap();
        assert_eq!(sample.edge_count(), 21);
        assert_eq!(sample.degree_sequence(), vec![6; 7]);
    }

    #[test]
    fn erdos_renyi_rejects_impossible_edge_count() {
        let profile = GraphProfile {
            vertex_count: 4,
            edge_count: 7,
            degrees: vec![0; 4],
        };
        let err = erdos_renyi(&profile, &mut XorShiftRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, MotifError::TooManyEdges { edges: 7, vertices: 4 }));
    }

    #[test]
    fn empty_profile_generates_empty_graph() {
        let profile = Graph::empty(0).profile();
        let mut rng = XorShiftRng::seed_from_u64(0);
        for model in NullModel::ALL {
            let g = model.generate(&profile, &mut rng).unwrap();
            assert_eq!(g.vertex_count(), 0);
            assert_eq!(g.edge_count(), 0);
        }
    }

    #[test]
    fn null_model_parsing() {
        assert_eq!("configuration".parse::<NullModel>().unwrap(), NullModel::Configuration);
        assert_eq!("ER".parse::<NullModel>().unwrap(), NullModel::ErdosRenyi);
        assert_eq!("gnm".parse::<NullModel>().unwrap(), NullModel::ErdosRenyi);
        assert!("watts-strogatz".parse::<NullModel>().is_err());
        assert_eq!(NullModel::default(), NullModel::Configuration);
        assert!(NullModel::Configuration.may_underfill());
        assert!(!NullModel::ErdosRenyi.may_underfill());
    }
}
