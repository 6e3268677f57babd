// src/error.rs
//! Error taxonomy shared by the registry, the dispatcher and every collector.

use std::fmt;
use std::io::{self, Write};

/// Everything that can stop a diagnostics run.
#[derive(Debug, thiserror::Error)]
pub enum DiagError {
    /// The same selector was registered twice while building the registry.
    #[error("selector {0} is registered more than once")]
    DuplicateSelector(String),

    /// A metrics source or container runtime could not be queried.
    #[error("cannot access {operation}: {reason}")]
    Unavailable { operation: String, reason: String },

    /// Writing the report to the output stream failed.
    #[error("failed to write diagnostics output: {0}")]
    Output(#[from] io::Error),

    /// One or more collectors failed under the keep-going policy.
    #[error("{} collector(s) failed", .0.len())]
    Collectors(Vec<CollectorFailure>),
}

impl DiagError {
    /// Shorthand for building an [`DiagError::Unavailable`].
    pub fn unavailable(operation: impl Into<String>, reason: impl fmt::Display) -> Self {
        DiagError::Unavailable {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the reader of the report went away, e.g. `sysdiag | head`.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, DiagError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }

    /// Writes one `Error:` line per failure to `err` and returns the process
    /// exit status. A closed output pipe exits quietly with 0.
    pub fn report(&self, err: &mut dyn Write) -> u8 {
        if self.is_broken_pipe() {
            return 0;
        }

        match self {
            DiagError::Collectors(failures) => {
                for failure in failures {
                    let _ = writeln!(err, "Error: {failure}");
                }
            }
            other => {
                let _ = writeln!(err, "Error: {other}");
            }
        }
        1
    }
}

/// A single collector failure recorded while the dispatcher kept going.
#[derive(Debug, thiserror::Error)]
#[error("{selector}: {error}")]
pub struct CollectorFailure {
    pub selector: String,
    #[source]
    pub error: DiagError,
}
