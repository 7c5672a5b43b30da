use crate::domain::error::{GraphError, Result};
use crate::domain::graph::{Graph, SccResult};
use crate::usecase::aggregate::component_sizes;

/// Re-checks the structural invariants of a finished leader assignment.
pub fn validate_partition(graph: &Graph, scc: &SccResult) -> Result<()> {
    let n = graph.node_count();
    let leaders = &scc.leaders;

    if leaders.len() != n {
        return Err(GraphError::Invariant(format!(
            "leader array covers {} vertices, graph has {n}",
            leaders.len()
        )));
    }

    for v in 0..n {
        let Some(l) = leaders.leader_of(v) else {
            return Err(GraphError::Invariant(format!(
                "vertex {} has no leader",
                graph.vertex_id(v)
            )));
        };
        if l >= n {
            return Err(GraphError::Invariant(format!(
                "vertex {} points at leader index {l} outside the graph",
                graph.vertex_id(v)
            )));
        }
        if leaders.leader_of(l) != Some(l) {
            return Err(GraphError::Invariant(format!(
                "leader {} of vertex {} is not its own leader",
                graph.vertex_id(l),
                graph.vertex_id(v)
            )));
        }
    }

    let sizes = component_sizes(leaders);
    if sizes.len() != scc.component_count {
        return Err(GraphError::Invariant(format!(
            "{} distinct leaders but {} components reported",
            sizes.len(),
            scc.component_count
        )));
    }

    let total: usize = sizes.iter().sum();
    if total != n {
        return Err(GraphError::Invariant(format!(
            "component sizes sum to {total}, graph has {n} vertices"
        )));
    }

    Ok(())
}
