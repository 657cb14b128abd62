//! # Network Motif Significance
//!
//! Tests whether a network holds more triangles and 4-cliques than chance would give, by
//! comparing exact motif counts in the real graph with counts in randomized null graphs.
//!
//! This crate provides:
//! - A simple undirected graph with adjacency lists and word-packed neighbor bitsets.
//! - Exact triangle and 4-clique counters driven by bitwise neighborhood intersection.
//! - Two null models: configuration-model stub matching (degree-preserving) and
//!   Erdős–Rényi G(n, m) (vertex and edge count preserving).
//! - A seeded, sequential pipeline producing one z-score per motif.
//!
//! ## Quick Start
//!
//! ```
//! use motifz::graph::{EdgeSet, Graph, DEFAULT_MAX_VERTICES};
//! use motifz::motif::Motif;
//! use motifz::pipeline::{run_motif_test, MotifTestConfig};
//!
//! let edges: EdgeSet = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4)]
//!     .into_iter()
//!     .collect();
//! let graph = Graph::from_edges(&edges, DEFAULT_MAX_VERTICES).unwrap();
//!
//! assert_eq!(Motif::Triangle.count(&graph), 4);
//! assert_eq!(Motif::FourClique.count(&graph), 1);
//!
//! let report = run_motif_test(&graph, &MotifTestConfig::default()).unwrap();
//! for result in &report.results {
//!     println!("{} Z-score = {}", result.motif, result.z);
//! }
//! ```
//!
//! ## Reading Edge Lists
//!
//! ```
//! use motifz::edgelist::{read_edge_list, EdgeListOptions};
//!
//! // One-based ids by default; duplicates and self-loops are dropped.
//! let text = "1 2\n2 3\n3 1\n1 2\n2 2\n";
//! let options = EdgeListOptions::default();
//! let list = read_edge_list(text.as_bytes(), &options).unwrap();
//! assert_eq!(list.edges.len(), 3);
//!
//! let graph = list.into_graph(&options).unwrap();
//! assert_eq!(graph.vertex_count(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Edge sets, neighbor bitsets and the immutable [`graph::Graph`].
//! - [`motif`]: Triangle and 4-clique counting kernels.
//! - [`null_model`]: Configuration-model and Erdős–Rényi samplers.
//! - [`stats`]: Population statistics and z-scores.
//! - [`pipeline`]: The end-to-end significance run.
//! - [`edgelist`]: Text edge-list reader.
//!
//! ## Performance Notes
//!
//! - Common-neighbor sets are computed one `u64` word at a time (AND + popcount), so a
//!   triangle pass costs O(m · n / 64).
//! - Bitsets are sized to the graph, so memory grows as n² / 8 bytes.
//! - For maximum performance, compile with: `RUSTFLAGS="-C target-cpu=native" cargo build --release`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::doc_markdown)]

pub mod edgelist;
pub mod error;
pub mod graph;
pub mod motif;
pub mod null_model;
pub mod pipeline;
pub mod stats;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::edgelist::{open_source, read_edge_list, EdgeList, EdgeListOptions, IdBase, InputSource};
    pub use crate::error::{MotifError, Result};
    pub use crate::graph::{EdgeSet, Graph, GraphProfile, DEFAULT_MAX_VERTICES};
    pub use crate::motif::{count_four_cliques, count_triangles, Motif};
    pub use crate::null_model::NullModel;
    pub use crate::pipeline::{run_motif_test, MotifResult, MotifTestConfig, MotifTestReport};
    pub use crate::stats::{z_score, ZScore};
}
