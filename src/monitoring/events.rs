/*!
 * Event System
 * Strongly-typed execution events emitted during a process run
 */

use crate::core::types::Units;
use crate::resources::{ReleaseWarning, ResourceUsage};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Event severity for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Progress and failure notices produced by check/assign/execute/release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExecutionEvent {
    ProcessStarted {
        process: String,
        run_id: Uuid,
    },
    NoResourcesRequired {
        unit: String,
    },
    ResourcesAssigned {
        unit: String,
        resources: Vec<String>,
    },
    UnitExecuting {
        unit: String,
        description: String,
        duration_units: Units,
    },
    ResourceUsed {
        unit: String,
        usage: ResourceUsage,
    },
    ResourcesReleased {
        unit: String,
        count: usize,
    },
    ReleaseWarned {
        unit: String,
        warning: ReleaseWarning,
    },
    UnitSkipped {
        unit: String,
        reason: String,
    },
    UnitFailed {
        unit: String,
        reason: String,
    },
    ProcessCompleted {
        process: String,
        run_id: Uuid,
    },
    ProcessRejected {
        process: String,
        run_id: Uuid,
        reason: String,
    },
}

impl ExecutionEvent {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            ExecutionEvent::NoResourcesRequired { .. }
            | ExecutionEvent::ResourcesAssigned { .. }
            | ExecutionEvent::ResourcesReleased { .. } => Severity::Debug,
            ExecutionEvent::ProcessStarted { .. }
            | ExecutionEvent::UnitExecuting { .. }
            | ExecutionEvent::ResourceUsed { .. }
            | ExecutionEvent::ProcessCompleted { .. } => Severity::Info,
            ExecutionEvent::ReleaseWarned { .. } | ExecutionEvent::UnitSkipped { .. } => {
                Severity::Warn
            }
            ExecutionEvent::UnitFailed { .. } | ExecutionEvent::ProcessRejected { .. } => {
                Severity::Error
            }
        }
    }

    /// Name of the unit or process the event is about
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            ExecutionEvent::ProcessStarted { process, .. }
            | ExecutionEvent::ProcessCompleted { process, .. }
            | ExecutionEvent::ProcessRejected { process, .. } => process,
            ExecutionEvent::NoResourcesRequired { unit }
            | ExecutionEvent::ResourcesAssigned { unit, .. }
            | ExecutionEvent::UnitExecuting { unit, .. }
            | ExecutionEvent::ResourceUsed { unit, .. }
            | ExecutionEvent::ResourcesReleased { unit, .. }
            | ExecutionEvent::ReleaseWarned { unit, .. }
            | ExecutionEvent::UnitSkipped { unit, .. }
            | ExecutionEvent::UnitFailed { unit, .. } => unit,
        }
    }
}

impl fmt::Display for ExecutionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionEvent::ProcessStarted { process, .. } => {
                write!(f, "Starting process '{}'", process)
            }
            ExecutionEvent::NoResourcesRequired { unit } => {
                write!(f, "No resources required for '{}'", unit)
            }
            ExecutionEvent::ResourcesAssigned { unit, resources } => {
                write!(f, "Assigned [{}] to '{}'", resources.join(", "), unit)
            }
            ExecutionEvent::UnitExecuting {
                unit,
                description,
                duration_units,
            } => write!(
                f,
                "Executing '{}': {} (Duration: {} units)",
                unit, description, duration_units
            ),
            ExecutionEvent::ResourceUsed { usage, .. } => write!(f, "{}", usage),
            ExecutionEvent::ResourcesReleased { unit, count } => {
                write!(f, "Released {} resources from '{}'", count, unit)
            }
            ExecutionEvent::ReleaseWarned { unit, warning } => {
                write!(f, "Warning while releasing '{}': {}", unit, warning)
            }
            ExecutionEvent::UnitSkipped { unit, reason } => {
                write!(f, "Unit '{}' skipped: {}", unit, reason)
            }
            ExecutionEvent::UnitFailed { unit, reason } => {
                write!(f, "Error in '{}': {}", unit, reason)
            }
            ExecutionEvent::ProcessCompleted { process, .. } => {
                write!(f, "Process '{}' completed.", process)
            }
            ExecutionEvent::ProcessRejected { process, reason, .. } => {
                write!(f, "Error in process '{}': {}", process, reason)
            }
        }
    }
}
