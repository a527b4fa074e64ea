//! Leaf process fixtures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::errors::ProcflowError;
use crate::process::Process;

/// A process that completes successfully at once.
pub fn succeeding() -> Process {
    Process::new(|_token| async { Ok(()) })
}

/// A process that fails at once with a leaf error carrying `message`.
pub fn failing(message: impl Into<String>) -> Process {
    let message = message.into();
    Process::new(move |_token| {
        let message = message.clone();
        async move { Err(ProcflowError::msg(message)) }
    })
}

/// A process that records that it ran, then succeeds.
pub fn tracked(ran: Arc<AtomicBool>) -> Process {
    Process::new(move |_token| {
        let ran = ran.clone();
        async move {
            ran.store(true, Ordering::SeqCst);
            Ok(())
        }
    })
}

/// A process that appends `label` to `order` when it runs, then succeeds.
///
/// Useful for asserting execution order across combinators.
pub fn ordered(label: &str, order: Arc<Mutex<Vec<String>>>) -> Process {
    let label = label.to_string();
    Process::new(move |_token| {
        let label = label.clone();
        let order = order.clone();
        async move {
            order.lock().push(label);
            Ok(())
        }
    })
}

/// A process that blocks until its token is cancelled, records that it
/// observed the cancellation, and then succeeds.
pub fn blocks_until_cancelled(observed: Arc<AtomicBool>) -> Process {
    Process::new(move |token| {
        let observed = observed.clone();
        async move {
            token.cancelled().await;
            observed.store(true, Ordering::SeqCst);
            Ok(())
        }
    })
}

/// A process that stores a clone of the token it was given, then succeeds.
///
/// Lets a test inspect the token a combinator handed to its branches.
pub fn token_probe(slot: Arc<Mutex<Option<CancellationToken>>>) -> Process {
    Process::new(move |token| {
        let slot = slot.clone();
        async move {
            *slot.lock() = Some(token);
            Ok(())
        }
    })
}
