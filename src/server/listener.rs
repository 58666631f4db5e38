use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::static_files::StaticFiles;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, cfg).await
}

/// Accepts connections forever, handling at most `max_workers` at a time.
///
/// A worker permit is taken before each accept, so while every worker is
/// busy new clients wait in the listen backlog.
pub async fn serve(listener: TcpListener, cfg: &Config) -> anyhow::Result<()> {
    let files = Arc::new(StaticFiles::new(&cfg.static_files));
    let workers = Arc::new(Semaphore::new(cfg.server.max_workers));
    let read_timeout = cfg.server.read_timeout();

    info!(
        root = %files.root().display(),
        max_workers = cfg.server.max_workers,
        "Serving static files"
    );

    loop {
        let permit = workers.clone().acquire_owned().await?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let files = files.clone();
        tokio::spawn(
            async move {
                let _permit = permit;
                let conn = Connection::new(socket, files, read_timeout);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}
