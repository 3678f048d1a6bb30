/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! s3-text-store-server - REST facade over the text store.
//!
//! Exposes the store operations over HTTP:
//!
//! ```text
//! POST   /api/s3/upload-text          raw text body -> "File uploaded: <key>"
//! GET    /api/s3/get-keys             -> keys, each followed by "::"
//! GET    /api/s3/read-file/{filename} -> object content
//! DELETE /api/s3/delete-file          raw key body -> "File deleted: <key>"
//! GET    /health                      -> "ok"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TEXT_STORE_LISTEN` | `127.0.0.1:8080` | Bind address |
//! | `S3_BUCKET_NAME` | *(required)* | Target bucket |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Region and credentials are resolved through the SDK's default provider
//! chain.

mod routes;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::routes::ApiService;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process configuration read once at startup.
#[derive(Debug, Clone)]
struct ServerConfig {
    listen: String,
    log_level: String,
    bucket: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            listen: std::env::var("TEXT_STORE_LISTEN")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            bucket: std::env::var("S3_BUCKET_NAME").ok(),
        }
    }
}

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

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: ApiService) -> Result<()> {
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

    let bucket = config
        .bucket
        .clone()
        .context("S3_BUCKET_NAME must be set")?;

    info!(
        listen = %config.listen,
        bucket = %bucket,
        version = VERSION,
        "starting s3-text-store server",
    );

    let store_config = s3_text_store::from_env().bucket(bucket).load().await;
    let client = s3_text_store::Client::new(store_config);
    let service = ApiService::new(client);

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
