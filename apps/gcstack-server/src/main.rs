//! gcstack server - in-memory object storage emulator.
//!
//! This binary serves the storage RPC surface over HTTP, backed by an
//! in-memory store. Uploads, bucket and object listings work against
//! seeded or dynamically created buckets; everything is lost on restart.
//!
//! # Usage
//!
//! ```text
//! LISTEN_ADDR=0.0.0.0:4443 INITIAL_BUCKETS=test-bucket gcstack-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LISTEN_ADDR` | `0.0.0.0:4443` | Bind address |
//! | `EXTERNAL_URL` | *(unset)* | Externally advertised URL |
//! | `INITIAL_BUCKETS` | *(unset)* | Comma-separated buckets created at startup |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gcstack_core::config::ServerConfig;
use gcstack_core::MemoryBackend;
use gcstack_rpc::{StorageRpcService, StorageServer};

/// Server version reported in the startup log line.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the shared server state and seed the configured startup buckets.
async fn build_server(config: &ServerConfig) -> Result<StorageServer> {
    let backend = Arc::new(MemoryBackend::new());
    let server = StorageServer::new(
        backend,
        config.listen_addr.clone(),
        config.external_url.clone(),
    );

    for bucket in config.seed_buckets() {
        server
            .create_bucket_with_opts(bucket, false)
            .await
            .with_context(|| format!("failed to seed bucket {bucket}"))?;
    }

    Ok(server)
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: StorageRpcService) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env();

    init_tracing(&config.log_level)?;

    info!(
        listen_addr = %config.listen_addr,
        external_url = %config.external_url,
        initial_buckets = %config.initial_buckets,
        version = VERSION,
        "starting gcstack server",
    );

    let server = build_server(&config).await?;
    let service = StorageRpcService::new(Arc::new(server));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen_addr))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_seed_configured_buckets() {
        let config = ServerConfig::builder()
            .initial_buckets("alpha, beta".into())
            .build();
        let server = build_server(&config).await.expect("build server");
        let response = server.list_buckets().await.expect("list");
        let names: Vec<&str> = response.buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_should_fail_on_duplicate_seed_bucket() {
        let config = ServerConfig::builder()
            .initial_buckets("dup,dup".into())
            .build();
        assert!(build_server(&config).await.is_err());
    }
}
