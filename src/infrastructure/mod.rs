// Infrastructure layer: file I/O, serde, eventing, the SCC implementation
pub mod edge_list;
pub mod event_ndjson;
pub mod report_json;
pub mod scc_kosaraju;
