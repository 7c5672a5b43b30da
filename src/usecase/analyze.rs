use crate::domain::graph::{Graph, VertexUniverse};
use crate::domain::traits::SccDetector;
use crate::infrastructure::edge_list::load_edge_list;
use crate::usecase::aggregate::top_components;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::{AnalyzeStats, SccReport};
use crate::usecase::validate::validate_partition;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    pub universe: VertexUniverse,
    pub verify: bool,
}

/// Loads `input` and runs [`analyze_graph`] on it.
///
/// A load failure aborts before either traversal starts.
pub async fn analyze_edge_list(
    input: &Path,
    detector: &dyn SccDetector,
    options: AnalyzeOptions,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<SccReport> {
    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "load".into(),
        },
    )
    .await;
    let started = Instant::now();
    let graph = load_edge_list(input, options.universe)
        .await
        .with_context(|| format!("loading edge list: {}", input.display()))?;
    info!(
        input = %input.display(),
        vertices = graph.node_count(),
        edges = graph.edge_count(),
        "edge list loaded"
    );
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "load".into(),
            elapsed_ms: elapsed_ms(started),
        },
    )
    .await;

    let mut report = analyze_graph(&graph, detector, options, sink).await?;
    report.input = Some(input.display().to_string());
    Ok(report)
}

pub async fn analyze_graph(
    graph: &Graph,
    detector: &dyn SccDetector,
    options: AnalyzeOptions,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<SccReport> {
    let mut stats = AnalyzeStats {
        vertices: graph.node_count(),
        edges: graph.edge_count(),
        self_loops: graph.self_loop_count(),
        ..AnalyzeStats::default()
    };
    emit(
        &sink,
        AppEvent::GraphLoaded {
            vertices: stats.vertices,
            edges: stats.edges,
            self_loops: stats.self_loops,
        },
    )
    .await;

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let started = Instant::now();
    let scc = detector.compute_scc(graph);
    let scc_ms = elapsed_ms(started);
    stats.components = scc.component_count;
    emit(
        &sink,
        AppEvent::SccComputed {
            vertices: stats.vertices,
            edges: stats.edges,
            components: stats.components,
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "scc".into(),
            elapsed_ms: scc_ms,
        },
    )
    .await;
    info!(
        components = stats.components,
        elapsed_ms = scc_ms,
        "strongly connected components computed"
    );

    if options.verify {
        emit(
            &sink,
            AppEvent::PhaseStarted {
                name: "verify".into(),
            },
        )
        .await;
        let started = Instant::now();
        validate_partition(graph, &scc).context("verifying component partition")?;
        emit(
            &sink,
            AppEvent::PartitionVerified {
                components: stats.components,
            },
        )
        .await;
        emit(
            &sink,
            AppEvent::PhaseFinished {
                name: "verify".into(),
                elapsed_ms: elapsed_ms(started),
            },
        )
        .await;
    }

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "aggregate".into(),
        },
    )
    .await;
    let started = Instant::now();
    let top = top_components(&scc.leaders);
    stats.largest_component = top[0];
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "aggregate".into(),
            elapsed_ms: elapsed_ms(started),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
            top_components: top,
        },
    )
    .await;

    Ok(SccReport {
        input: None,
        stats,
        top_components: top,
    })
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::{Leaders, SccResult};
    use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;

    struct BrokenDetector;

    impl SccDetector for BrokenDetector {
        fn compute_scc(&self, graph: &Graph) -> SccResult {
            // Two components claimed, one leader used.
            SccResult {
                leaders: Leaders::new(vec![0; graph.node_count()]),
                component_count: 2,
            }
        }
    }

    #[tokio::test]
    async fn analyze_graph_reports_top_five_and_stats() {
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 3), (5, 5)]);
        let report = analyze_graph(&g, &KosarajuSccDetector, AnalyzeOptions::default(), None)
            .await
            .expect("analyze");

        assert_eq!(report.top_components, [3, 2, 1, 0, 0]);
        assert_eq!(report.stats.vertices, 6);
        assert_eq!(report.stats.edges, 6);
        assert_eq!(report.stats.self_loops, 1);
        assert_eq!(report.stats.components, 3);
        assert_eq!(report.stats.largest_component, 3);
        assert!(report.input.is_none());
    }

    #[tokio::test]
    async fn verify_surfaces_invariant_violations() {
        let g = Graph::from_edges(2, &[]);
        let options = AnalyzeOptions {
            verify: true,
            ..AnalyzeOptions::default()
        };
        let err = analyze_graph(&g, &BrokenDetector, options, None)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("partition invariant violated"));
    }

    #[tokio::test]
    async fn closed_sink_does_not_abort_the_run() {
        let (tx, rx) = mpsc::channel::<AppEvent>(1);
        drop(rx);
        let g = Graph::from_edges(2, &[(0, 1), (1, 0)]);
        let report = analyze_graph(&g, &KosarajuSccDetector, AnalyzeOptions::default(), Some(tx))
            .await
            .expect("analyze");
        assert_eq!(report.top_components, [2, 0, 0, 0, 0]);
    }
}
