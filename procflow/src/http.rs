//! An HTTP server as a well-behaved leaf process.
//!
//! The returned process serves an axum router until its token signals done,
//! then stops accepting connections and returns once in-flight requests have
//! drained. No drain deadline is imposed here; handlers are expected to
//! watch the token themselves and abort long-running work.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use axum::{Extension, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::process::{ProcResult, Process, Runnable};

/// An axum server configured to run as a process.
///
/// Each invocation binds a fresh listener on the configured address, keeping
/// repeated invocations independent of one another. The process token is
/// attached to the router as an [`Extension`] so request handlers can
/// observe shutdown.
pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    /// Creates a server for the given address and router.
    #[must_use]
    pub fn new(addr: SocketAddr, router: Router) -> Self {
        Self { addr, router }
    }

    /// Returns the configured listen address.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }
}

#[async_trait]
impl Runnable for HttpServer {
    async fn run(&self, token: CancellationToken) -> ProcResult {
        let listener = TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("failed to listen on {}", self.addr))?;
        let local = listener.local_addr().context("failed to read local address")?;
        tracing::info!(addr = %local, "http server listening");

        let app = self.router.clone().layer(Extension(token.clone()));
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
            .with_context(|| format!("http server on {local} failed"))?;

        tracing::info!(addr = %local, "http server stopped");
        Ok(())
    }
}

impl std::fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServer")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

/// Returns a process that binds `addr` and serves `router` until cancelled.
///
/// Binding or serving failures are leaf errors; a successful drain after
/// cancellation is not an error.
pub fn listen_and_serve(addr: SocketAddr, router: Router) -> Process {
    Process::from_runnable(Arc::new(HttpServer::new(addr, router)))
}
