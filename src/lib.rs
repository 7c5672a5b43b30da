//! Strongly connected component sizes of large directed edge lists.
//!
//! Layers:
//! - domain: graph storage, finish order, leaders, error taxonomy
//! - usecase: analysis workflow, aggregation, validation, events
//! - infrastructure: edge-list loading, the Kosaraju passes, JSON output
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
