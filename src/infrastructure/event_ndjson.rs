use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    match ev {
        AppEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        AppEvent::PhaseFinished { name, elapsed_ms } => {
            json!({"type":"phase_finished","name":name,"elapsed_ms":elapsed_ms})
        }
        AppEvent::GraphLoaded {
            vertices,
            edges,
            self_loops,
        } => {
            json!({"type":"graph_loaded","vertices":vertices,"edges":edges,"self_loops":self_loops})
        }
        AppEvent::SccComputed {
            vertices,
            edges,
            components,
        } => {
            json!({"type":"scc_computed","vertices":vertices,"edges":edges,"components":components})
        }
        AppEvent::PartitionVerified { components } => {
            json!({"type":"partition_verified","components":components})
        }
        AppEvent::Finished {
            stats,
            top_components,
        } => json!({"type":"finished","stats":stats,"top_components":top_components}),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}
