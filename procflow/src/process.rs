//! The process contract: a cancellable, fallible unit of work.
//!
//! A process takes a cancellation token and resolves to a result. `Ok(())`
//! means success. Long-running processes should watch for the token
//! signalling "done" and return as soon as possible afterwards; cancellation
//! is cooperative, never preemptive.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::errors::ProcflowError;

/// The result of running a process to completion.
pub type ProcResult = Result<(), ProcflowError>;

type ProcessFn = dyn Fn(CancellationToken) -> BoxFuture<'static, ProcResult> + Send + Sync;

/// A deferred, cancellable, fallible unit of work.
///
/// `Process` is a cheap cloneable handle. Combinators build new processes out
/// of existing ones, so arbitrarily deep trees compose without special-casing.
///
/// Two invocations of the same `Process` value with different tokens must be
/// independent; the inner callable is `Fn` and must not carry implicit state
/// between runs.
#[derive(Clone)]
pub struct Process {
    inner: Arc<ProcessFn>,
}

impl Process {
    /// Creates a process from a closure.
    ///
    /// The closure is invoked once per [`Process::run`] call and receives the
    /// token for that run.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ProcResult> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |token| {
                let fut: BoxFuture<'static, ProcResult> = Box::pin(f(token));
                fut
            }),
        }
    }

    /// Adapts a [`Runnable`] implementation into a process.
    pub fn from_runnable(runnable: Arc<dyn Runnable>) -> Self {
        Self::new(move |token| {
            let runnable = Arc::clone(&runnable);
            async move { runnable.run(token).await }
        })
    }

    /// Runs the process against the given token, resolving when it completes.
    ///
    /// Returning `Ok(())` means the work finished successfully. Once the
    /// token signals done the process must stop starting new work and return
    /// promptly.
    pub async fn run(&self, token: CancellationToken) -> ProcResult {
        (self.inner)(token).await
    }
}

impl std::fmt::Debug for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Process").finish_non_exhaustive()
    }
}

/// Trait for struct-shaped leaf processes.
///
/// Implement this when a process carries configuration or resources of its
/// own; use [`Process::new`] for ad-hoc closures. The obligations are the
/// same either way: return promptly once the token is done, and keep
/// invocations independent of each other.
#[async_trait]
pub trait Runnable: Send + Sync {
    /// Performs the work until completion or cancellation.
    async fn run(&self, token: CancellationToken) -> ProcResult;
}
