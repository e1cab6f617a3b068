use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;
use crate::router::Router;

/// Binds the listening socket with `SO_REUSEADDR` and the configured backlog.
pub fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {:?}", cfg.listen_addr))?;

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket
        .bind(&addr.into())
        .with_context(|| format!("failed to bind {}", addr))?;
    socket
        .listen(cfg.backlog)
        .with_context(|| format!("failed to listen on {}", addr))?;

    let listener = TcpListener::from_std(socket.into())?;
    Ok(listener)
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server)?;
    info!("Listening on {}", listener.local_addr()?);
    info!(
        directory = %cfg.files.directory.display(),
        files = cfg.files.enabled,
        "Serving"
    );

    let router = Arc::new(Router::from_config(&cfg.files));
    serve(listener, router, cfg.server.max_request_size).await
}

/// Accept loop. Each connection runs on its own task; accept errors are
/// logged and the loop keeps going.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    max_request_size: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, max_request_size);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
