//! Usecase layer: the analysis workflow, aggregation and events.

pub mod aggregate;
pub mod analyze;
pub mod event;
pub mod stats;
pub mod validate;
