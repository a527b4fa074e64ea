//! Hit-counting demo server.
//!
//! Runs an axum server as a labeled process under the runner, so Ctrl+C
//! requests a graceful shutdown and in-flight requests drain before exit.
//!
//! ```sh
//! cargo run --example server -- --listen 127.0.0.1:8080
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde::Serialize;

use procflow::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "server", about = "Hit-counting demo server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,
}

#[derive(Serialize)]
struct Hits {
    count: u64,
}

async fn count_hit(State(hits): State<Arc<AtomicU64>>) -> Json<Hits> {
    let count = hits.fetch_add(1, Ordering::SeqCst) + 1;
    Json(Hits { count })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let hits = Arc::new(AtomicU64::new(0));
    let router = Router::new().route("/", get(count_hit)).with_state(hits);

    let web = task("web", listen_and_serve(args.listen, router));

    if let Err(err) = run(web).await {
        tracing::error!(error = %err, report = %err.report().to_json(), "server failed");
        std::process::exit(1);
    }
}
