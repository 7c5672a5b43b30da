use crate::domain::graph::VertexUniverse;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::report_json::write_report_file;
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::usecase::analyze::{analyze_edge_list, AnalyzeOptions};
use crate::usecase::event::AppEvent;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EVENT_BUFFER: usize = 1024;

pub async fn run() -> Result<()> {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

/// Logs go to stderr; stdout carries only events and the result line.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cli = Cli::parse(args)?;

    // A run emits a fixed handful of events. They stay queued until the run
    // has succeeded, so a failed run prints nothing on stdout.
    let (tx, rx) = mpsc::channel::<AppEvent>(EVENT_BUFFER);
    let sink = cli.emit_events.then_some(tx);

    let options = AnalyzeOptions {
        universe: cli
            .vertex_count
            .map_or(VertexUniverse::Observed, VertexUniverse::Declared),
        verify: cli.verify,
    };
    let detector = KosarajuSccDetector;

    let report = analyze_edge_list(Path::new(&cli.input), &detector, options, sink).await?;

    if let Some(out) = cli.out.as_deref() {
        write_report_file(out, &report)
            .await
            .with_context(|| format!("writing report JSON: {out}"))?;
    }

    if cli.emit_events {
        spawn_ndjson_printer(rx).await.ok();
    }

    info!(
        vertices = report.stats.vertices,
        edges = report.stats.edges,
        components = report.stats.components,
        "summary: top components {}",
        report.sizes_line()
    );
    println!("{}", report.sizes_line());

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct Cli {
    input: String,
    vertex_count: Option<u64>,
    emit_events: bool,
    out: Option<String>,
    verify: bool,
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> <edges.txt> [--vertex-count <N>] [--emit-events] [--out <report.json>] [--verify]
        let mut input: Option<String> = None;
        let mut vertex_count: Option<u64> = None;
        let mut emit_events = false;
        let mut out: Option<String> = None;
        let mut verify = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--vertex-count" => {
                    i += 1;
                    let raw = args
                        .get(i)
                        .ok_or_else(|| anyhow!(format!("missing value for --vertex-count\n\n{}", usage())))?;
                    let n: u64 = raw
                        .parse()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or_else(|| anyhow!("--vertex-count must be a positive integer, got {raw:?}"))?;
                    vertex_count = Some(n);
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "--out" | "--output" => {
                    i += 1;
                    out = Some(
                        args.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!(format!("missing value for --out\n\n{}", usage())))?,
                    );
                }
                "--verify" => {
                    verify = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other if other.starts_with('-') => {
                    return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage())))
                }
                other => {
                    if input.is_some() {
                        return Err(anyhow!(format!(
                            "unexpected extra argument: {other}\n\n{}",
                            usage()
                        )));
                    }
                    input = Some(other.to_string());
                }
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing input edge list\n\n{}", usage())))?;

        Ok(Cli {
            input,
            vertex_count,
            emit_events,
            out,
            verify,
        })
    }
}

fn usage() -> &'static str {
    "Usage:\n  graph-scc-finder <edges.txt> [--vertex-count <N>] [--emit-events] [--out <report.json>] [--verify]\n\nInput:\n  Whitespace-separated pairs of positive vertex ids, one directed edge `start end` per pair.\n\nOutput:\n  The sizes of the five largest strongly connected components, comma-separated, on stdout.\n  If --emit-events is set, NDJSON events are written to stdout before the result, only when the run succeeds; logs go to stderr."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::report_json::read_report_file;
    use tempfile::tempdir;

    fn args(rest: &[&str]) -> Vec<String> {
        let mut v = vec!["bin".to_string()];
        v.extend(rest.iter().map(|s| s.to_string()));
        v
    }

    #[test]
    fn parse_requires_input() {
        let err = Cli::parse(&args(&[])).unwrap_err().to_string();
        assert!(err.contains("missing input edge list"));
        assert!(err.contains("Usage"));
    }

    #[test]
    fn parse_rejects_unknown_arg() {
        let err = Cli::parse(&args(&["g.txt", "--wat"])).unwrap_err().to_string();
        assert!(err.contains("unknown arg"));
        assert!(err.contains("Usage"));
    }

    #[test]
    fn parse_rejects_second_positional() {
        let err = Cli::parse(&args(&["a.txt", "b.txt"])).unwrap_err().to_string();
        assert!(err.contains("unexpected extra argument: b.txt"));
    }

    #[test]
    fn parse_success_with_all_flags() {
        let cli = Cli::parse(&args(&[
            "--vertex-count",
            "12",
            "SCC.txt",
            "--emit-events",
            "--out",
            "r.json",
            "--verify",
        ]))
        .expect("parse");

        assert_eq!(
            cli,
            Cli {
                input: "SCC.txt".to_string(),
                vertex_count: Some(12),
                emit_events: true,
                out: Some("r.json".to_string()),
                verify: true,
            }
        );
    }

    #[test]
    fn parse_rejects_bad_vertex_count() {
        let err = Cli::parse(&args(&["g.txt", "--vertex-count", "0"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("positive integer"));

        let err = Cli::parse(&args(&["g.txt", "--vertex-count"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing value for --vertex-count"));
    }

    #[test]
    fn parse_help_returns_error_with_usage() {
        let err = Cli::parse(&args(&["--help"])).unwrap_err().to_string();
        assert!(err.contains("Usage"));
    }

    #[tokio::test]
    async fn run_with_args_smoke_writes_report() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("edges.txt");
        let output_path = dir.path().join("report.json");
        std::fs::write(&input_path, "1 2\n2 1\n").expect("write input");

        let argv = args(&[
            input_path.to_str().unwrap(),
            "--vertex-count",
            "3",
            "--out",
            output_path.to_str().unwrap(),
            "--verify",
        ]);
        run_with_args(&argv).await.expect("run");

        let report = read_report_file(output_path.to_str().unwrap())
            .await
            .expect("read report");
        assert_eq!(report.top_components, [2, 1, 0, 0, 0]);
        assert_eq!(report.stats.vertices, 3);
        assert_eq!(report.input.as_deref(), input_path.to_str());
    }

    #[tokio::test]
    async fn run_with_args_smoke_emit_events() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("edges.txt");
        std::fs::write(&input_path, "1 2\n2 3\n3 1\n").expect("write input");

        let argv = args(&[input_path.to_str().unwrap(), "--emit-events"]);
        run_with_args(&argv).await.expect("run");
    }

    #[tokio::test]
    async fn run_with_args_missing_file_fails_with_context() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("nope.txt");

        let argv = args(&[input_path.to_str().unwrap()]);
        let err = run_with_args(&argv).await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("loading edge list"));
        assert!(msg.contains("cannot read edge list"));
    }

    #[tokio::test]
    async fn run_with_args_malformed_record_fails_without_report() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("edges.txt");
        let output_path = dir.path().join("report.json");
        std::fs::write(&input_path, "1 2\n2 two\n").expect("write input");

        let argv = args(&[
            input_path.to_str().unwrap(),
            "--out",
            output_path.to_str().unwrap(),
        ]);
        let err = run_with_args(&argv).await.unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn run_with_args_huge_vertex_count_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("edges.txt");
        std::fs::write(&input_path, "1 2\n").expect("write input");

        let argv = args(&[
            input_path.to_str().unwrap(),
            "--vertex-count",
            "18446744073709551615",
            "--emit-events",
        ]);
        let err = run_with_args(&argv).await.unwrap_err();
        assert!(format!("{err:#}").contains("too large to allocate"));
    }

    #[tokio::test]
    async fn run_uses_env_args_and_fails_under_test_harness() {
        // Test harness args never name a readable edge list.
        assert!(run().await.is_err());
    }
}
