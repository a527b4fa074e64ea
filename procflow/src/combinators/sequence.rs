//! Sequential composition.

use crate::process::Process;

/// Returns a process that runs the given processes in order, against the
/// same token, returning early on the first failure.
///
/// The error returned is the failing process's error, verbatim; processes
/// after the failing one are never started. This is the only combinator with
/// a total order guarantee.
pub fn sequence(processes: Vec<Process>) -> Process {
    Process::new(move |token| {
        let processes = processes.clone();
        async move {
            for process in &processes {
                process.run(token.clone()).await?;
            }
            Ok(())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProcflowError;
    use crate::testing::{failing, ordered, tracked};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_runs_in_input_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let seq = sequence(vec![
            ordered("first", order.clone()),
            ordered("second", order.clone()),
            ordered("third", order.clone()),
        ]);

        let result = seq.run(CancellationToken::new()).await;

        assert!(result.is_ok());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_short_circuits_on_failure() {
        let second_ran = Arc::new(AtomicBool::new(false));
        let third_ran = Arc::new(AtomicBool::new(false));

        let seq = sequence(vec![
            failing("early failure"),
            tracked(second_ran.clone()),
            tracked(third_ran.clone()),
        ]);

        let err = seq
            .run(CancellationToken::new())
            .await
            .expect_err("sequence should fail");

        assert_eq!(err.to_string(), "early failure");
        assert!(!second_ran.load(Ordering::SeqCst));
        assert!(!third_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failure_midway_keeps_earlier_effects() {
        let first_ran = Arc::new(AtomicBool::new(false));

        let seq = sequence(vec![tracked(first_ran.clone()), failing("late failure")]);

        let err = seq
            .run(CancellationToken::new())
            .await
            .expect_err("sequence should fail");

        assert_eq!(err.to_string(), "late failure");
        assert!(first_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_sequence_succeeds() {
        let seq = sequence(Vec::new());
        assert!(seq.run(CancellationToken::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_error_is_not_wrapped() {
        let seq = sequence(vec![Process::new(|_token| async {
            Err(ProcflowError::task("inner", ProcflowError::msg("oops")))
        })]);

        let err = seq
            .run(CancellationToken::new())
            .await
            .expect_err("sequence should fail");

        // The failing process's error passes through unmodified.
        assert_eq!(err.label(), Some("inner"));
    }
}
