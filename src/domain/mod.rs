//! Domain layer: graph storage and the SCC port, no I/O.

pub mod error;
pub mod graph;
pub mod traits;
