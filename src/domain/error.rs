use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of loading and analysing a graph.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("cannot read edge list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed edge list at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("vertex id {id} is outside the declared universe 1..={vertex_count}")]
    VertexOutOfRange { id: u64, vertex_count: u64 },

    #[error("vertex id must be a positive integer, got 0")]
    ZeroVertexId,

    #[error("declared vertex count {vertex_count} is too large to allocate")]
    UniverseTooLarge { vertex_count: u64 },

    #[error("partition invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
