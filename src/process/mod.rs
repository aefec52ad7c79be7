/*!
 * Process Module
 * Executables, tasks and the process orchestrator
 */

pub mod builder;
pub mod executable;
pub mod orchestrator;
pub mod task;
pub mod types;
pub mod unit;

// Re-export for convenience
pub use builder::ProcessBuilder;
pub use executable::{Executable, ExecutableCore};
pub use orchestrator::ProcessOrchestrator;
pub use task::Task;
pub use types::{
    ExecutableError, ExecutableResult, RunOutcome, RunReport, RunState, UnitFailure,
};
pub use unit::Unit;
