use crate::domain::error::{GraphError, Result};
use crate::domain::graph::{Graph, GraphBuilder, VertexUniverse};
use std::path::Path;
use tokio::fs;
use tracing::debug;

const PROGRESS_EVERY: usize = 100_000;

/// Reads a whitespace-separated `start end` edge list from disk.
pub async fn load_edge_list(path: impl AsRef<Path>, universe: VertexUniverse) -> Result<Graph> {
    let path = path.as_ref();
    let bytes = fs::read(path).await.map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = decode_utf8(&bytes)?;
    parse_edge_list(raw, universe)
}

/// Undecodable bytes are a malformed record, not an unreadable file.
fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        GraphError::Format {
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            message: format!("invalid UTF-8 at byte offset {}", e.valid_up_to()),
        }
    })
}

/// Parses edge records out of `text`.
///
/// Tokens are consumed pairwise regardless of line breaks; a line number in
/// an error refers to the offending token.
pub fn parse_edge_list(text: &str, universe: VertexUniverse) -> Result<Graph> {
    let mut builder = GraphBuilder::with_capacity(universe, text.len() / 8);
    let mut pending: Option<(usize, u64)> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        for token in line.split_whitespace() {
            let id = parse_vertex_id(token, line_no)?;
            match pending.take() {
                None => pending = Some((line_no, id)),
                Some((_, start)) => {
                    builder
                        .push_edge(start, id)
                        .map_err(|e| GraphError::Format {
                            line: line_no,
                            message: e.to_string(),
                        })?;
                    if builder.edge_count() % PROGRESS_EVERY == 0 {
                        debug!(edges = builder.edge_count(), "loading edge list");
                    }
                }
            }
        }
    }

    if let Some((line, start)) = pending {
        return Err(GraphError::Format {
            line,
            message: format!("edge starting at vertex {start} has no end vertex"),
        });
    }

    builder.build()
}

fn parse_vertex_id(token: &str, line: usize) -> Result<u64> {
    match token.parse::<u64>() {
        Ok(0) => Err(GraphError::Format {
            line,
            message: GraphError::ZeroVertexId.to_string(),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(GraphError::Format {
            line,
            message: format!("expected a positive integer vertex id, got {token:?} ({e})"),
        }),
    }
}
