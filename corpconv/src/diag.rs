//! Diagnostic channel for recoverable format warnings
//!
//! Malformed input never aborts a run: every structural violation is reported
//! here with its source line and the pipeline continues with a fallback. A
//! [`Diagnostics`] handle is created per pipeline run and cloned into each
//! stage; all clones report into the same collector. Warnings are also
//! forwarded to the `tracing` subscriber so applications get them on their
//! normal log channel without asking.

use std::cell::RefCell;
use std::rc::Rc;

/// A single recoverable format warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// 1-based source line the warning refers to, when one applies.
    pub line: Option<usize>,
    pub message: String,
}

/// Shared warning collector for one pipeline run.
///
/// Cloning is cheap; the pipeline is single-threaded and one run owns its
/// state, so a plain `Rc` is sufficient. Never share a handle across runs:
/// warning counts are per run by design.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Rc<RefCell<Vec<Warning>>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and forward it to the `tracing` subscriber.
    pub fn warn(&self, line: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        match line {
            Some(number) => tracing::warn!(line = number, "{message}"),
            None => tracing::warn!("{message}"),
        }
        self.warnings.borrow_mut().push(Warning { line, message });
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }

    /// Snapshot of the warnings recorded so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }
}
