/*!
 * Resource Types
 * Kinds, errors, usage snapshots and release diagnostics
 */

use super::pool::ResourceHandle;
use crate::core::types::Capacity;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resource operation result
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Resource allocation errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ResourceError {
    #[error("No remaining capacity for depleting resource '{resource}'")]
    #[diagnostic(
        code(resource::exhausted),
        help("Depleting resources are never replenished within a run.")
    )]
    Exhausted { resource: String },

    #[error("Occupying resource '{resource}' is already held")]
    #[diagnostic(
        code(resource::already_held),
        help("Release the resource before allocating it again.")
    )]
    AlreadyHeld { resource: String },
}

/// Resource kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Finite unit capacity, consumed one unit per allocation
    Depleting,
    /// Binary held/free state, reusable after release
    Occupying,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Depleting => write!(f, "depleting"),
            ResourceKind::Occupying => write!(f, "occupying"),
        }
    }
}

/// Snapshot reported when a resource is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceUsage {
    pub resource: String,
    pub kind: ResourceKind,
    pub capacity: Capacity,
    /// Remaining units; only tracked for depleting resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Capacity>,
}

impl fmt::Display for ResourceUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remaining {
            Some(remaining) => write!(
                f,
                "Using {} resource '{}' (remaining: {}/{} MB)",
                self.kind, self.resource, remaining, self.capacity
            ),
            None => write!(
                f,
                "Using {} resource '{}' (capacity: {} GHz)",
                self.kind, self.resource, self.capacity
            ),
        }
    }
}

/// Non-fatal diagnostic produced by a release
///
/// Release never fails; anything unexpected surfaces as one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ReleaseWarning {
    /// Occupying resource released while already free
    AlreadyFree { resource: String },
    /// Depleting resource released with no outstanding allocation
    NotAllocated { resource: String },
    /// Depleting resource is exhausted and stays unavailable
    Depleted { resource: String },
    /// Handle belongs to a different pool than the one released into
    ForeignHandle { handle: ResourceHandle },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::AlreadyFree { resource } => write!(
                f,
                "Attempted to release already free occupying resource '{}'",
                resource
            ),
            ReleaseWarning::NotAllocated { resource } => write!(
                f,
                "Released depleting resource '{}' without an outstanding allocation",
                resource
            ),
            ReleaseWarning::Depleted { resource } => write!(
                f,
                "Depleting resource '{}' is depleted and cannot be reused without replenishment",
                resource
            ),
            ReleaseWarning::ForeignHandle { handle } => {
                write!(f, "Handle {} does not belong to this pool", handle)
            }
        }
    }
}
