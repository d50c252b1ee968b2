//! Inference server lifecycle: bind, spawn `axum::serve` in a background
//! task, and hand back a handle with a shutdown channel.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::error::ServeError;
use crate::api::router::analysis_router;
use crate::pipeline::SharedPipeline;

/// Metadata for a running inference server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running inference server.
pub struct InferenceServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl InferenceServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Inference server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Inference server task failed: {e}");
            }
        }
    }
}

/// Start the inference server on `addr`.
///
/// Pass port 0 to bind an ephemeral port; the chosen port is reported in
/// `InferenceServer::session`.
pub async fn start_server_on(
    pipeline: SharedPipeline,
    addr: SocketAddr,
) -> Result<InferenceServer, ServeError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;

    let addr = listener.local_addr().map_err(ServeError::LocalAddr)?;
    tracing::info!(%addr, pipeline = pipeline.name(), "Inference server binding");

    let app = analysis_router(pipeline);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Inference server received shutdown signal");
        };

        tracing::info!(%addr, "Inference server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Inference server error: {e}");
        }

        tracing::info!("Inference server stopped");
    });

    Ok(InferenceServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

/// Serve on `addr` until Ctrl-C, then shut down gracefully.
pub async fn serve_until_ctrl_c(
    pipeline: SharedPipeline,
    addr: SocketAddr,
) -> Result<(), ServeError> {
    let mut server = start_server_on(pipeline, addr).await?;
    tracing::info!(port = server.session.port, "Serving at port {}", server.session.port);

    let signal = tokio::signal::ctrl_c().await;
    server.shutdown();
    server.wait().await;

    signal.map_err(ServeError::Signal)
}
