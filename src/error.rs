//! Error types shared by the graph model, the null models and the input reader.

use thiserror::Error;

/// Errors raised while building graphs, generating null samples or reading edge lists.
#[derive(Error, Debug)]
pub enum MotifError {
    /// The input contained no usable edge.
    #[error("no valid edges read")]
    NoEdges,

    /// A vertex id is at or above the configured vertex ceiling.
    #[error("vertex id {vertex} exceeds the supported ceiling (ids must be < {limit})")]
    VertexOutOfRange {
        /// Offending zero-based vertex id.
        vertex: usize,
        /// Ceiling in force.
        limit: usize,
    },

    /// An edge-list line did not start with two integer ids.
    #[error("line {line}: expected two vertex ids, got {content:?}")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// The trimmed line text.
        content: String,
    },

    /// A G(n,m) sample was requested with more edges than a simple graph on `n` vertices holds.
    #[error("cannot place {edges} distinct edges on {vertices} vertices")]
    TooManyEdges {
        /// Requested edge count.
        edges: usize,
        /// Vertex count.
        vertices: usize,
    },

    /// Rejected run configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying reader failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MotifError>;
