//! Error types for process composition.
//!
//! Every failure flowing out of a process is a [`ProcflowError`] in exactly
//! one of three shapes: an opaque leaf failure, a task-labeled wrapper for
//! failure attribution, or a flattened aggregate of sibling failures from
//! concurrent fan-out. Merging keeps aggregates flat; an aggregate never
//! contains another aggregate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error type for process execution.
#[derive(Debug, Error)]
pub enum ProcflowError {
    /// An opaque failure produced by a leaf process.
    #[error(transparent)]
    Leaf(#[from] anyhow::Error),

    /// A failure annotated with the label of the task that produced it.
    #[error("{label}: {source}")]
    Task {
        /// The task label, used for failure attribution only.
        label: String,
        /// The underlying failure, unchanged.
        source: Box<ProcflowError>,
    },

    /// Two or more sibling failures collected from concurrent fan-out.
    ///
    /// Member order reflects completion order, which is unspecified; compare
    /// aggregates as sets.
    #[error("{}", render_members(.0))]
    Aggregate(Vec<ProcflowError>),
}

impl ProcflowError {
    /// Creates a leaf error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Leaf(anyhow::Error::msg(message.into()))
    }

    /// Creates a task-labeled error wrapping `source`.
    pub fn task(label: impl Into<String>, source: ProcflowError) -> Self {
        Self::Task {
            label: label.into(),
            source: Box::new(source),
        }
    }

    /// Returns the task label, if this is a task-labeled error.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Task { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }

    /// Returns the wrapped error unchanged, if this is a task-labeled error.
    #[must_use]
    pub fn cause(&self) -> Option<&ProcflowError> {
        match self {
            Self::Task { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Returns the aggregate members, if this is an aggregate.
    #[must_use]
    pub fn members(&self) -> Option<&[ProcflowError]> {
        match self {
            Self::Aggregate(members) => Some(members.as_slice()),
            _ => None,
        }
    }

    /// Merges any number of errors into at most one.
    ///
    /// Members of incoming aggregates are spliced into the result rather
    /// than nested, so the output is always flat. Zero inputs merge to
    /// `None`; a single input is returned verbatim, unwrapped.
    #[must_use]
    pub fn merge(errors: impl IntoIterator<Item = ProcflowError>) -> Option<ProcflowError> {
        let mut flat = Vec::new();
        for err in errors {
            match err {
                Self::Aggregate(members) => flat.extend(members),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Self::Aggregate(flat)),
        }
    }

    /// Merges a sequence of process results, discarding successes.
    pub fn merge_results(
        results: impl IntoIterator<Item = Result<(), ProcflowError>>,
    ) -> Result<(), ProcflowError> {
        match Self::merge(results.into_iter().filter_map(Result::err)) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Builds a serializable summary tree of this error.
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        match self {
            Self::Leaf(_) => ErrorReport {
                kind: "leaf".to_string(),
                message: self.to_string(),
                label: None,
                causes: Vec::new(),
            },
            Self::Task { label, source } => ErrorReport {
                kind: "task".to_string(),
                message: self.to_string(),
                label: Some(label.clone()),
                causes: vec![source.report()],
            },
            Self::Aggregate(members) => ErrorReport {
                kind: "aggregate".to_string(),
                message: format!("{} errors", members.len()),
                label: None,
                causes: members.iter().map(ProcflowError::report).collect(),
            },
        }
    }
}

fn render_members(members: &[ProcflowError]) -> String {
    match members.len() {
        // Degenerate shapes never produced by merge, rendered anyway so
        // Display is total.
        0 => "no errors".to_string(),
        1 => members[0].to_string(),
        n => {
            let mut out = format!("{n} errors:");
            for err in members {
                out.push_str("\n- ");
                out.push_str(&err.to_string());
            }
            out
        }
    }
}

/// A serializable summary of a [`ProcflowError`] for structured logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// One of `"leaf"`, `"task"`, `"aggregate"`.
    pub kind: String,
    /// The rendered error message.
    pub message: String,
    /// The task label, for task-labeled errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Summaries of the underlying errors, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<ErrorReport>,
}

impl ErrorReport {
    /// Renders the report as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self)
            .unwrap_or_else(|_| serde_json::Value::String(self.message.clone()))
    }
}
