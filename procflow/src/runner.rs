//! Top-level run loop tying a process tree to an external stop signal.
//!
//! [`run`] is an opinionated entry point for long-running daemon-style
//! programs: it starts one process (typically a labeled tree of combinators)
//! against a fresh root token and cancels it when an interrupt arrives.
//! [`run_until`] accepts any future as the stop source, which is how tests
//! trigger cancellation deterministically without real signals.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::ProcflowError;
use crate::process::{ProcResult, Process};

/// Runs a process as the main purpose of a program.
///
/// The process is started against a fresh root token and blocks until it
/// completes. If an interrupt (Ctrl+C) is received while it is running, the
/// token is cancelled; the process should then exit cleanly but promptly.
/// Whatever the process returns is handed back verbatim.
pub async fn run(process: Process) -> ProcResult {
    run_until(process, interrupt()).await
}

/// Runs a process until it completes or `stop` resolves, whichever is first.
///
/// Either way the root token is cancelled and the runner waits for the
/// process to actually finish before reading its result; a stop request
/// never yields a stale or absent result for work that went on to fail.
/// Dropping `stop` on return releases whatever source backed it.
pub async fn run_until<S>(process: Process, stop: S) -> ProcResult
where
    S: Future<Output = ()> + Send,
{
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", run_id = %run_id);

    async move {
        let root = CancellationToken::new();
        let mut worker = {
            let token = root.clone();
            tokio::spawn(async move { process.run(token).await })
        };

        tokio::pin!(stop);
        tokio::select! {
            () = &mut stop => {
                tracing::info!("stop requested, cancelling root process");
            }
            result = &mut worker => {
                root.cancel();
                return flatten(result);
            }
        }

        root.cancel();
        // The cancel is only a request; the result is not read until the
        // worker has actually finished producing it.
        let result = worker.await;
        flatten(result)
    }
    .instrument(span)
    .await
}

fn flatten(result: Result<ProcResult, tokio::task::JoinError>) -> ProcResult {
    match result {
        Ok(inner) => inner,
        Err(join_err) => Err(ProcflowError::Leaf(anyhow::Error::new(join_err))),
    }
}

/// Resolves when the OS delivers an interrupt.
///
/// If interrupt handling cannot be installed the failure is logged and the
/// returned future never resolves, leaving the process to run to completion.
async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install interrupt handler");
        std::future::pending::<()>().await;
    }
}
