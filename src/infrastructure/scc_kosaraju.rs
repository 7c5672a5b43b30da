use crate::domain::graph::{Adjacency, FinishOrder, Graph, Leaders, SccResult, UNASSIGNED};
use crate::domain::traits::SccDetector;
use std::time::Instant;
use tracing::debug;

pub struct KosarajuSccDetector;

impl SccDetector for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph) -> SccResult {
        kosaraju_scc(graph)
    }
}

fn kosaraju_scc(graph: &Graph) -> SccResult {
    let started = Instant::now();
    let order = finish_order(graph.reverse());
    debug!(
        vertices = order.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "finish-order pass complete"
    );

    let started = Instant::now();
    let (leaders, component_count) = assign_leaders(graph.forward(), &order);
    debug!(
        components = component_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "leader-assignment pass complete"
    );

    SccResult {
        leaders,
        component_count,
    }
}

/// First pass: depth-first over the reverse graph, roots taken from the
/// highest vertex down, recording each vertex once its whole subtree is done.
pub fn finish_order(reverse: &Adjacency) -> FinishOrder {
    let n = reverse.node_count();
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut explored = vec![false; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in (0..n).rev() {
        if explored[root] {
            continue;
        }
        explored[root] = true;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (v, next_i) = *frame;
            let outs = reverse.neighbors(v);

            if next_i < outs.len() {
                frame.1 += 1;
                let to = outs[next_i];
                if !explored[to] {
                    explored[to] = true;
                    stack.push((to, 0));
                }
                continue;
            }

            stack.pop();
            order.push(v);
        }
    }

    FinishOrder::new(order)
}

/// Second pass: roots in decreasing finish rank; everything a root reaches
/// in the forward graph that has no leader yet joins its component.
///
/// Returns the leaders and the number of components found.
pub fn assign_leaders(forward: &Adjacency, order: &FinishOrder) -> (Leaders, usize) {
    let n = forward.node_count();
    debug_assert_eq!(order.len(), n, "finish order from a different graph");

    let mut leader = vec![UNASSIGNED; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut components = 0usize;

    for &root in order.as_slice().iter().rev() {
        if leader[root] != UNASSIGNED {
            continue;
        }
        components += 1;
        leader[root] = root;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (v, next_i) = *frame;
            let outs = forward.neighbors(v);

            if next_i < outs.len() {
                frame.1 += 1;
                let to = outs[next_i];
                if leader[to] == UNASSIGNED {
                    leader[to] = root;
                    stack.push((to, 0));
                }
                continue;
            }

            stack.pop();
        }
    }

    (Leaders::new(leader), components)
}
