//! HTTP state server.
//!
//! Every request, whatever its method or path, is answered with status 200
//! and the current snapshot wrapped as `{"data": ...}`. The body is taken
//! from one read of the slot, so it is always a complete snapshot.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use rbxpresence_protocol::{NULL_ENVELOPE, StateEnvelope, encode_envelope};
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::slot::SnapshotSlot;

/// Builds the router serving `slot`.
pub fn build_router(slot: SnapshotSlot) -> Router {
    Router::new()
        .fallback(serve_state)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(slot)
}

async fn serve_state(State(slot): State<SnapshotSlot>) -> Response {
    let envelope = StateEnvelope::new(slot.current().await);

    let body = match encode_envelope(&envelope) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Failed to encode snapshot");
            NULL_ENVELOPE.to_vec()
        }
    };

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            HeaderValue::from_static(rbxpresence_protocol::CONTENT_TYPE),
        )],
        body,
    )
        .into_response()
}

/// A bound, not yet running, HTTP server.
pub struct HttpServer {
    listener: TcpListener,
    router: Router,
}

impl HttpServer {
    /// Binds the listening socket.
    ///
    /// Binding happens here rather than in [`run_until_shutdown`] so that an
    /// unusable port is reported before the daemon starts serving.
    ///
    /// [`run_until_shutdown`]: HttpServer::run_until_shutdown
    pub async fn bind(config: &ServerConfig, slot: SnapshotSlot) -> ServerResult<Self> {
        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::bind(addr, e))?;

        Ok(Self {
            listener,
            router: build_router(slot),
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` resolves, then drains open
    /// connections and returns.
    pub async fn run_until_shutdown<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!(%addr, "HTTP server listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        info!("HTTP server stopped");
        Ok(())
    }
}
