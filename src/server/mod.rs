//! HTTP surface exposing the engine's run request boundary

mod router;
mod state;

pub use router::{build_run_router, RunRequest, RunResponse};
pub use state::ServeState;

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

/// Bind and serve the run API until the process is stopped.
pub async fn serve(state: ServeState, listen: SocketAddr) -> Result<()> {
    let app = build_run_router(state);
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!(%listen, "Run API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
