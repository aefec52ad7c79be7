/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::process::types::ExecutableError;
pub use crate::resources::ResourceError;

/// Invalid arguments when building resources, tasks or processes
///
/// Raised at object creation and never recovered by the kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConstructionError {
    #[error("Name cannot be empty")]
    #[diagnostic(
        code(construction::empty_name),
        help("Every resource, task and process needs a non-empty name.")
    )]
    EmptyName,

    #[error("Duration for '{name}' must be positive")]
    #[diagnostic(
        code(construction::non_positive_duration),
        help("Declare a duration of at least one unit.")
    )]
    NonPositiveDuration { name: String },

    #[error("Capacity for resource '{name}' must be positive")]
    #[diagnostic(
        code(construction::non_positive_capacity),
        help("Declare a capacity of at least one unit.")
    )]
    NonPositiveCapacity { name: String },

    #[error("Process '{name}' is nested {depth} levels deep")]
    #[diagnostic(
        code(construction::nesting_too_deep),
        help("Flatten the process tree; see core::limits::MAX_NESTING_DEPTH.")
    )]
    NestingTooDeep { name: String, depth: usize },
}

/// Construction result
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Resource error: {0}")]
    #[diagnostic(transparent)]
    Resource(#[from] ResourceError),

    #[error("Executable error: {0}")]
    #[diagnostic(transparent)]
    Executable(#[from] ExecutableError),

    #[error("Construction error: {0}")]
    #[diagnostic(transparent)]
    Construction(#[from] ConstructionError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    #[diagnostic(
        code(kernel::internal_error),
        help("An unexpected internal error occurred. Please report this issue.")
    )]
    Internal(String),
}

impl From<String> for KernelError {
    fn from(msg: String) -> Self {
        KernelError::Internal(msg)
    }
}

impl From<&str> for KernelError {
    fn from(msg: &str) -> Self {
        KernelError::Internal(msg.to_string())
    }
}
