//! HTTP serving of the pre-rendered feed.
//!
//! The feed is generated once at startup and handed to the router as
//! immutable state. Every request, whatever its method or path, gets the same
//! document back with `Content-Type: application/xml`.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Router answering every request with `feed`.
pub fn build_app(feed: Bytes) -> Router {
    Router::new()
        .fallback(serve_feed)
        .with_state(feed)
        .layer(TraceLayer::new_for_http())
}

async fn serve_feed(State(feed): State<Bytes>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], feed)
}

/// Bind `addr` and serve `feed` until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, feed: Bytes) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Serving podcast feed");

    axum::serve(listener, build_app(feed))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Received shutdown signal, stopping server");
}
