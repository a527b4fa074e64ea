//! # Procflow
//!
//! Cancellable process composition primitives for tokio.
//!
//! A "process" is a deferred, cancellable, fallible unit of work: a function
//! from a cancellation token to a result. Procflow provides:
//!
//! - **Process contract**: one fixed shape every unit of work satisfies
//! - **Combinators**: sequencing, parallel fan-out, fail-fast grouped fan-out
//! - **Failure attribution**: task labels carried on errors
//! - **Instrumentation**: tracing spans around tasks and regions
//! - **Top-level runner**: ties a process tree to an external stop signal
//! - **HTTP adapter**: an axum server as a well-behaved leaf process
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use procflow::prelude::*;
//!
//! let web = task("web", listen_and_serve(addr, router));
//! let workers = task("workers", concurrent_group(worker_processes));
//!
//! // Ctrl+C requests a graceful shutdown of the whole tree.
//! run(concurrent_group(vec![web, workers])).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod combinators;
pub mod errors;
pub mod http;
pub mod process;
pub mod runner;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::combinators::{concurrent, concurrent_group, region, sequence, task};
    pub use crate::errors::{ErrorReport, ProcflowError};
    pub use crate::http::{listen_and_serve, HttpServer};
    pub use crate::process::{ProcResult, Process, Runnable};
    pub use crate::runner::{run, run_until};
    pub use tokio_util::sync::CancellationToken;
}
