/*!
 * Process Types
 * Common types for executables and process runs
 */

use crate::resources::{ReleaseWarning, ResourceError};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Executable operation result
pub type ExecutableResult<T> = Result<T, ExecutableError>;

/// Errors raised while checking, assigning or executing a unit
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ExecutableError {
    #[error("Resource '{resource}' not available for '{unit}'")]
    #[diagnostic(
        code(executable::resource_unavailable),
        help("Add a matching resource to the pool or free the one currently held.")
    )]
    ResourceUnavailable { unit: String, resource: String },

    #[error("Allocation failed: {0}")]
    #[diagnostic(transparent)]
    Allocation(#[from] ResourceError),

    #[error("Resources not properly assigned for '{unit}': {assigned} assigned, {required} required")]
    #[diagnostic(
        code(executable::resource_mismatch),
        help("Call assign_resources before execute.")
    )]
    ResourceMismatch {
        unit: String,
        assigned: usize,
        required: usize,
    },

    #[error("Assigned resources of '{unit}' do not belong to the pool given to execute")]
    #[diagnostic(
        code(executable::pool_mismatch),
        help("Execute against the same pool the resources were assigned from.")
    )]
    PoolMismatch { unit: String },

    #[error("'{unit}' still holds resources from another pool")]
    #[diagnostic(
        code(executable::foreign_assignment),
        help("Release the unit into the pool it was assigned from before reassigning it.")
    )]
    ForeignAssignment { unit: String },

    #[error("Insufficient resources in pool to start '{process}'")]
    #[diagnostic(
        code(executable::insufficient_resources),
        help("The process pool must satisfy the process's own requirements.")
    )]
    InsufficientResources { process: String },
}

/// Per-run state of a process orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Checking,
    Assigning,
    Executing,
    Releasing,
    Completed,
    Rejected,
}

impl RunState {
    /// Whether `self -> next` is a legal transition
    #[must_use]
    pub const fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Idle, Checking)
                | (Checking, Assigning)
                | (Checking, Rejected)
                | (Assigning, Executing)
                | (Assigning, Rejected)
                | (Executing, Releasing)
                | (Releasing, Completed)
                | (Completed, Idle)
                | (Rejected, Idle)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Rejected)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Rejected { reason: String },
}

/// A sub-unit that failed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFailure {
    pub unit: String,
    pub reason: String,
}

/// Summary of one `run()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub process: String,
    pub outcome: RunOutcome,
    pub executed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<UnitFailure>,
    pub warnings: Vec<ReleaseWarning>,
}

impl RunReport {
    pub(crate) fn new(run_id: Uuid, process: impl Into<String>) -> Self {
        Self {
            run_id,
            process: process.into(),
            outcome: RunOutcome::Completed,
            executed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, RunOutcome::Completed)
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, RunOutcome::Rejected { .. })
    }

    /// Completed with every unit executed
    pub fn is_clean(&self) -> bool {
        self.is_completed() && self.skipped.is_empty() && self.failed.is_empty()
    }

    /// Merge skips, failures and warnings of a nested process run
    ///
    /// Unit names are qualified as `nested/unit`.
    pub(crate) fn absorb(&mut self, nested: RunReport) {
        let qualify = |unit: String| format!("{}/{}", nested.process, unit);
        self.skipped.extend(nested.skipped.into_iter().map(qualify));
        self.failed.extend(nested.failed.into_iter().map(|failure| UnitFailure {
            unit: qualify(failure.unit),
            reason: failure.reason,
        }));
        self.warnings.extend(nested.warnings);
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            RunOutcome::Completed => write!(
                f,
                "Process '{}' completed: {} executed, {} skipped, {} failed, {} warnings",
                self.process,
                self.executed.len(),
                self.skipped.len(),
                self.failed.len(),
                self.warnings.len()
            ),
            RunOutcome::Rejected { reason } => {
                write!(f, "Process '{}' rejected: {}", self.process, reason)
            }
        }
    }
}
