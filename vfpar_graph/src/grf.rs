//! The vflib `.grf` text format.
//!
//! ```text
//! # optional comments, blank lines are ignored
//! 3          <- node count
//! 0 7        <- node id, label
//! 1 7
//! 2 4
//! 2          <- out-degree of node 0
//! 0 1        <- source, destination
//! 0 2
//! 0          <- out-degree of node 1
//! 1          <- out-degree of node 2
//! 2 0
//! ```
//!
//! Edges are directed; an undirected graph lists every edge in both
//! directions.

use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::error::{GraphError, GrfError};
use crate::graph::{Graph, Label, NodeId};

/// Meaningful records of a grf document, with their 1-based line numbers.
struct Records<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last_line: 0,
        }
    }

    fn next_record(&mut self) -> Option<(usize, &'a str)> {
        for (idx, raw) in self.lines.by_ref() {
            self.last_line = idx + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if !content.is_empty() {
                return Some((idx + 1, content));
            }
        }
        None
    }

    /// Read one record made of exactly `N` unsigned integers.
    fn expect<const N: usize>(
        &mut self,
        expected: &'static str,
    ) -> Result<(usize, [usize; N]), GrfError> {
        let (line, content) = self.next_record().ok_or(GrfError::UnexpectedEof {
            line: self.last_line,
            expected,
        })?;
        let malformed = || GrfError::Malformed {
            line,
            expected,
            found: content.to_string(),
        };

        let mut values = [0; N];
        let mut tokens = content.split_whitespace();
        for slot in &mut values {
            let token = tokens.next().ok_or_else(malformed)?;
            *slot = token.parse().map_err(|_| malformed())?;
        }
        if tokens.next().is_some() {
            return Err(malformed());
        }
        Ok((line, values))
    }
}

fn node_at(line: usize, id: usize) -> Result<NodeId, GrfError> {
    NodeId::try_from(id).map_err(|source| GrfError::Graph { line, source })
}

fn label_at(line: usize, content: usize) -> Result<Label, GrfError> {
    Label::try_from(content).map_err(|_| GrfError::Malformed {
        line,
        expected: "a 32-bit label",
        found: content.to_string(),
    })
}

/// Parse a grf document.
///
/// # Errors
/// Returns a [`GrfError`] naming the offending line if the document is
/// truncated, malformed or describes an invalid graph.
pub fn parse_grf(text: &str) -> Result<Graph, GrfError> {
    let mut records = Records::new(text);
    let (_, [node_count]) = records.expect("a node count")?;

    let mut builder = Graph::builder();
    for expected in 0..node_count {
        let (line, [id, label]) = records.expect("a `node label` record")?;
        if id != expected {
            return Err(GrfError::NodeOutOfOrder {
                line,
                expected,
                found: id,
            });
        }
        let label = label_at(line, label)?;
        builder
            .add_node(label)
            .map_err(|source| GrfError::Graph { line, source })?;
    }

    for _ in 0..node_count {
        let (_, [degree]) = records.expect("an edge count")?;
        for _ in 0..degree {
            let (line, [from, to]) = records.expect("a `source destination` record")?;
            let (from, to) = (node_at(line, from)?, node_at(line, to)?);
            builder
                .add_edge(from, to)
                .map_err(|source: GraphError| GrfError::Graph { line, source })?;
        }
    }

    if let Some((line, _)) = records.next_record() {
        return Err(GrfError::TrailingData { line });
    }
    Ok(builder.build())
}

/// Read a grf file from disk.
///
/// # Errors
/// [`GrfError::Io`] if the file cannot be read, otherwise as [`parse_grf`].
pub fn read_grf(path: impl AsRef<Path>) -> Result<Graph, GrfError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let graph = parse_grf(&text)?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded grf graph"
    );
    Ok(graph)
}

/// Serialize `graph` in grf format.
///
/// # Errors
/// [`GrfError::Io`] if writing fails.
pub fn write_grf(graph: &Graph, out: impl Write) -> Result<(), GrfError> {
    let mut out = BufWriter::new(out);
    writeln!(out, "{}", graph.node_count())?;
    for node in graph.nodes() {
        writeln!(out, "{node} {}", graph.label(node))?;
    }
    for node in graph.nodes() {
        writeln!(out, "{}", graph.out_degree(node))?;
        let edges = graph
            .out_edges(node)
            .iter()
            .map(|to| format!("{node} {to}\n"))
            .join("");
        out.write_all(edges.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Render `graph` as a grf string.
#[must_use]
pub fn to_grf_string(graph: &Graph) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_grf(graph, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
