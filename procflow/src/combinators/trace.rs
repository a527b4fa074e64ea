//! Task and region wrappers: instrumentation and failure attribution.
//!
//! Both wrappers run the inner process inside a tracing span, so whatever
//! subscriber is installed sees the open/close timeline. The span closes
//! exactly once on every path, including cancellation, because it is tied to
//! the wrapped future's lifetime.

use tracing::Instrument;

use crate::errors::ProcflowError;
use crate::process::Process;

/// Labels a process for failure attribution.
///
/// The returned process runs `process` inside a tracing span carrying the
/// label, and wraps a failure as a task-labeled error so callers composing
/// many processes can recognize which kind of task failed. Success passes
/// through unwrapped.
pub fn task(label: impl Into<String>, process: Process) -> Process {
    let label = label.into();
    Process::new(move |token| {
        let label = label.clone();
        let process = process.clone();
        let span = tracing::info_span!("task", label = %label);
        async move {
            match process.run(token).await {
                Ok(()) => Ok(()),
                Err(source) => {
                    let err = ProcflowError::task(label, source);
                    tracing::debug!(error = %err, "task failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
    })
}

/// Marks a process on the instrumentation timeline.
///
/// Purely observational: the inner result is returned unchanged.
pub fn region(label: impl Into<String>, process: Process) -> Process {
    let label = label.into();
    Process::new(move |token| {
        let process = process.clone();
        let span = tracing::debug_span!("region", label = %label);
        async move { process.run(token).await }.instrument(span)
    })
}
