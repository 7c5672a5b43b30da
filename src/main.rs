//! Binary entrypoint.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    graph_scc_finder::interface::cli::run().await
}
