use crate::usecase::aggregate::TOP_COMPONENTS;
use crate::usecase::stats::AnalyzeStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
        elapsed_ms: u64,
    },

    GraphLoaded {
        vertices: usize,
        edges: usize,
        self_loops: usize,
    },

    SccComputed {
        vertices: usize,
        edges: usize,
        components: usize,
    },

    PartitionVerified {
        components: usize,
    },

    Finished {
        stats: AnalyzeStats,
        top_components: [usize; TOP_COMPONENTS],
    },
}
