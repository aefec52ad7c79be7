/*!
 * Resource Kernel Library
 * Resource-constrained task execution exposed as a library
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod resources;

// Re-exports
pub use config::{ConfigError, ProcessSpec};
pub use core::errors::{ConstructionError, KernelError};
pub use core::types::{Capacity, KernelResult, Units};
pub use monitoring::{init_tracing, EventLog, EventSink, ExecutionEvent, TracingSink};
pub use process::{
    Executable, ExecutableError, ProcessBuilder, ProcessOrchestrator, RunOutcome, RunReport,
    RunState, Task, Unit,
};
pub use resources::{
    DepletingResource, OccupyingResource, ReleaseWarning, Resource, ResourceError, ResourceKind,
    ResourceLifecycle, ResourcePool,
};
