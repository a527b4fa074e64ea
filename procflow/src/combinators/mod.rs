//! Combinators that build new processes out of existing ones.
//!
//! Every combinator returns a plain [`Process`](crate::process::Process), so
//! trees of arbitrary depth (a sequence of groups of sequences) compose
//! without special-casing:
//!
//! - [`sequence`] runs processes one after another, stopping at the first
//!   failure
//! - [`concurrent`] fans out in parallel with no cross-cancellation
//! - [`concurrent_group`] fans out in parallel and cancels the siblings of
//!   the first failure
//! - [`task`] labels a process for failure attribution
//! - [`region`] marks a process on the instrumentation timeline

mod concurrent;
mod sequence;
mod trace;

#[cfg(test)]
mod combinator_tests;

pub use concurrent::{concurrent, concurrent_group};
pub use sequence::sequence;
pub use trace::{region, task};
