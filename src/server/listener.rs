use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::http::connection;

/// Binds the wildcard IPv4 address on `port`.
///
/// Kept synchronous and runtime-free so it can run before daemonization;
/// a bind failure has to reach the terminal while there still is one.
pub fn bind(port: u16) -> anyhow::Result<std::net::TcpListener> {
    std::net::TcpListener::bind(("0.0.0.0", port))
        .with_context(|| format!("failed to listen on port {port}"))
}

/// The accept loop: one spawned task per connection.
///
/// Adopts the listener bound by [`bind`] into the runtime, then accepts
/// forever. A connection task that fails is logged and forgotten; nothing
/// it did can leak into another connection. An accept failure, by
/// contrast, is fatal to the whole server.
pub async fn run(
    listener: std::net::TcpListener,
    config: Arc<ServerConfig>,
) -> anyhow::Result<()> {
    listener
        .set_nonblocking(true)
        .context("failed to set listener non-blocking")?;
    let listener = TcpListener::from_std(listener).context("failed to adopt listener")?;
    info!(
        "listening on port {} serving {}",
        config.port,
        config.document_root.display()
    );

    loop {
        let (socket, peer) = listener.accept().await.context("accept(2) failed")?;
        info!("accepted connection from {peer}");

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = connection::serve(socket, &config).await {
                error!("connection from {peer} failed: {e:#}");
            }
        });
    }
}
