//! Parallel fan-out, independent and grouped.

use tokio_util::sync::CancellationToken;

use crate::errors::ProcflowError;
use crate::process::Process;

/// How a fan-out treats a failing branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FanOutMode {
    /// Branches are independent; a failure does not affect the others.
    Independent,
    /// Branches cooperate; the first failure cancels the rest.
    FailFast,
}

/// Returns a process that runs the given processes in parallel against the
/// same shared token, joins all of them, and merges any errors.
///
/// A failing branch does **not** cancel its siblings; only cancellation of
/// the shared token from outside does. If more than one branch fails, the
/// result is an aggregate containing all of them in an undefined order.
pub fn concurrent(processes: Vec<Process>) -> Process {
    fan_out(FanOutMode::Independent, processes)
}

/// Returns a process that runs the given processes in parallel as a
/// cooperating group: the first branch to fail cancels the others via a
/// token derived from the shared one.
///
/// Cancellation is cooperative, so siblings stop only when they next poll
/// the token. The group always waits for every branch to return before
/// returning itself, and the derived token is cancelled unconditionally
/// after the join so that no live child token outlives the group, even on
/// the all-success path.
///
/// This suits a set of long-running processes at the top of a program that
/// should bail out quickly when any of them hits an unrecoverable problem.
pub fn concurrent_group(processes: Vec<Process>) -> Process {
    fan_out(FanOutMode::FailFast, processes)
}

fn fan_out(mode: FanOutMode, processes: Vec<Process>) -> Process {
    Process::new(move |token| {
        let processes = processes.clone();
        async move {
            let branch_token = match mode {
                FanOutMode::Independent => token,
                FanOutMode::FailFast => token.child_token(),
            };

            let mut handles = Vec::with_capacity(processes.len());
            for process in processes {
                let child = branch_token.clone();
                let group = match mode {
                    FanOutMode::Independent => None,
                    FanOutMode::FailFast => Some(branch_token.clone()),
                };
                handles.push(tokio::spawn(async move {
                    let result = process.run(child).await;
                    if result.is_err() {
                        // Release blocked siblings before anyone joins us.
                        if let Some(group) = group {
                            group.cancel();
                        }
                    }
                    result
                }));
            }

            let mut errors = Vec::new();
            for handle in handles {
                match handle.await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => errors.push(err),
                    Err(join_err) => {
                        errors.push(ProcflowError::Leaf(anyhow::Error::new(join_err)));
                    }
                }
            }

            // Everything has joined by now; cancel once more so the derived
            // token is released even when every branch succeeded.
            if mode == FanOutMode::FailFast {
                branch_token.cancel();
            }

            match ProcflowError::merge(errors) {
                None => Ok(()),
                Some(err) => Err(err),
            }
        }
    })
}
