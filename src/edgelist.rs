//! Plain-text edge-list reader.
//!
//! One edge per line, two whitespace-separated integer ids; further columns are ignored.
//! Blank lines and lines starting with `#` or `%` are skipped. Self-loops are dropped and
//! repeated edges collapse before any graph is built.

use crate::error::{MotifError, Result};
use crate::graph::{EdgeSet, Graph, DEFAULT_MAX_VERTICES};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Number of leading edges echoed at debug level while reading.
const ECHO_EDGES: usize = 5;

/// Numbering convention of vertex ids in the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdBase {
    /// Ids start at 1 and are shifted down on read; an id of 0 is invalid.
    #[default]
    OneBased,
    /// Ids start at 0 and are used as-is.
    ZeroBased,
}

impl IdBase {
    /// Converts a raw id to a zero-based vertex index, or `None` if it has no valid mapping.
    fn to_index(self, raw: i64) -> Option<usize> {
        let shifted = match self {
            IdBase::OneBased => raw.checked_sub(1)?,
            IdBase::ZeroBased => raw,
        };
        usize::try_from(shifted).ok()
    }
}

/// How raw edge lists become graphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeListOptions {
    /// Id numbering of the input.
    pub id_base: IdBase,
    /// Vertex ids must stay below this ceiling.
    pub max_vertices: usize,
    /// Relabel vertices densely so only ids that occur in some edge become vertices.
    ///
    /// With this off the vertex set is every id up to the largest one seen, including ids
    /// that never occur.
    pub compact_ids: bool,
}

impl Default for EdgeListOptions {
    fn default() -> Self {
        Self {
            id_base: IdBase::default(),
            max_vertices: DEFAULT_MAX_VERTICES,
            compact_ids: false,
        }
    }
}

/// Deduplicated edges plus bookkeeping about what was dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeList {
    /// Distinct edges, zero-based.
    pub edges: EdgeSet,
    /// Non-blank, non-comment lines consumed.
    pub lines_read: usize,
    /// Lines whose endpoints coincide.
    pub self_loops: usize,
    /// Lines repeating an edge already read (either orientation).
    pub duplicates: usize,
    /// Lines with an id that maps below zero.
    pub skipped_invalid: usize,
}

impl EdgeList {
    /// Dense relabelling: returns the edges over `0..k` and, for each new id, the old one.
    pub fn compacted(&self) -> (EdgeSet, Vec<usize>) {
        let ids: Vec<usize> = self
            .edges
            .iter()
            .flat_map(|(u, v)| [u, v])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: BTreeMap<usize, usize> =
            ids.iter().enumerate().map(|(new, &old)| (old, new)).collect();
        let edges = self.edges.iter().map(|(u, v)| (index[&u], index[&v])).collect();
        (edges, ids)
    }

    /// Builds the graph described by this edge list.
    ///
    /// # Errors
    /// [`MotifError::NoEdges`] if nothing usable was read, [`MotifError::VertexOutOfRange`] if
    /// the vertex set exceeds `options.max_vertices`.
    pub fn into_graph(self, options: &EdgeListOptions) -> Result<Graph> {
        if self.edges.is_empty() {
            return Err(MotifError::NoEdges);
        }
        if options.compact_ids {
            let (edges, ids) = self.compacted();
            debug!(
                vertices = ids.len(),
                largest_id = ids.last().copied().unwrap_or(0),
                "relabelled vertex ids densely"
            );
            Graph::with_vertex_count(&edges, ids.len(), options.max_vertices)
        } else {
            Graph::from_edges(&self.edges, options.max_vertices)
        }
    }
}

// ============================================================================
// Input source
// ============================================================================

/// Where an edge list is read from.
#[derive(Debug)]
pub enum InputSource {
    /// A file that opened successfully.
    File(PathBuf),
    /// Standard input, because no path (or `-`) was given.
    Stdin,
    /// Standard input, because `path` could not be opened.
    StdinFallback {
        /// Path that failed to open.
        path: PathBuf,
        /// Why it failed.
        error: io::Error,
    },
}

impl InputSource {
    /// Returns `true` when edges come from standard input.
    pub fn is_stdin(&self) -> bool {
        !matches!(self, InputSource::File(_))
    }

    /// Returns `true` when standard input replaced an unreadable path.
    pub fn is_fallback(&self) -> bool {
        matches!(self, InputSource::StdinFallback { .. })
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::StdinFallback { path, .. } => {
                write!(f, "stdin (fallback for {})", path.display())
            }
        }
    }
}

/// Opens `path` for reading, or standard input when the path is absent, `-`, or cannot
/// be opened. An unopenable path is logged as a warning and recorded in the returned source.
pub fn open_source(path: Option<&Path>) -> (Box<dyn BufRead>, InputSource) {
    let Some(path) = path.filter(|p| *p != Path::new("-")) else {
        info!("reading edges from stdin");
        return (Box::new(io::stdin().lock()), InputSource::Stdin);
    };
    match File::open(path) {
        Ok(file) => {
            info!(path = %path.display(), "reading edges");
            (Box::new(BufReader::new(file)), InputSource::File(path.to_path_buf()))
        }
        Err(error) => {
            warn!(path = %path.display(), error = %error, "could not open input; falling back to stdin");
            (
                Box::new(io::stdin().lock()),
                InputSource::StdinFallback {
                    path: path.to_path_buf(),
                    error,
                },
            )
        }
    }
}

/// Reads an edge list from `reader`.
///
/// # Errors
/// [`MotifError::MalformedLine`] for a line without two integer ids,
/// [`MotifError::VertexOutOfRange`] for an id past the ceiling (unless ids are compacted),
/// [`MotifError::Io`] on read failure.
pub fn read_edge_list<R: BufRead>(reader: R, options: &EdgeListOptions) -> Result<EdgeList> {
    let mut list = EdgeList::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }
        list.lines_read += 1;

        let malformed = || MotifError::MalformedLine {
            line: idx + 1,
            content: trimmed.to_string(),
        };
        let mut tokens = trimmed.split_whitespace();
        let (Some(a), Some(b)) = (tokens.next(), tokens.next()) else {
            return Err(malformed());
        };
        let (Ok(a), Ok(b)) = (a.parse::<i64>(), b.parse::<i64>()) else {
            return Err(malformed());
        };

        let (Some(u), Some(v)) = (options.id_base.to_index(a), options.id_base.to_index(b)) else {
            list.skipped_invalid += 1;
            continue;
        };
        if !options.compact_ids {
            if let Some(vertex) = [u, v].into_iter().find(|&x| x >= options.max_vertices) {
                return Err(MotifError::VertexOutOfRange {
                    vertex,
                    limit: options.max_vertices,
                });
            }
        }

        if u == v {
            list.self_loops += 1;
        } else if list.edges.insert(u, v) {
            if list.edges.len() <= ECHO_EDGES {
                debug!(u = u.min(v), v = u.max(v), "input edge (0-based)");
            }
        } else {
            list.duplicates += 1;
        }
    }

    debug!(
        lines = list.lines_read,
        unique_edges = list.edges.len(),
        self_loops = list.self_loops,
        duplicates = list.duplicates,
        skipped = list.skipped_invalid,
        "read edge list"
    );
    Ok(list)
}

// ============================================================================
// Tests
// ============================================================================
