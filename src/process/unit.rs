/*!
 * Unit
 * Entry in a process sequence: a task or a nested process
 */

use super::executable::{sealed, Executable, ExecutableCore};
use super::orchestrator::ProcessOrchestrator;
use super::task::Task;
use super::types::ExecutableResult;
use crate::monitoring::EventSink;
use crate::resources::ResourcePool;

#[derive(Debug)]
pub enum Unit {
    Task(Task),
    Process(Box<ProcessOrchestrator>),
}

impl Unit {
    #[inline]
    pub fn is_process(&self) -> bool {
        matches!(self, Unit::Process(_))
    }

    pub fn as_task(&self) -> Option<&Task> {
        match self {
            Unit::Task(task) => Some(task),
            Unit::Process(_) => None,
        }
    }

    pub fn as_process(&self) -> Option<&ProcessOrchestrator> {
        match self {
            Unit::Process(process) => Some(process),
            Unit::Task(_) => None,
        }
    }
}

impl sealed::Sealed for Unit {}

impl Executable for Unit {
    fn core(&self) -> &ExecutableCore {
        match self {
            Unit::Task(task) => task.core(),
            Unit::Process(process) => process.core(),
        }
    }

    fn core_mut(&mut self) -> &mut ExecutableCore {
        match self {
            Unit::Task(task) => task.core_mut(),
            Unit::Process(process) => process.core_mut(),
        }
    }

    fn execute(&mut self, pool: &ResourcePool, sink: &dyn EventSink) -> ExecutableResult<()> {
        match self {
            Unit::Task(task) => task.execute(pool, sink),
            Unit::Process(process) => process.execute(pool, sink),
        }
    }
}

impl From<Task> for Unit {
    fn from(task: Task) -> Self {
        Unit::Task(task)
    }
}

impl From<ProcessOrchestrator> for Unit {
    fn from(process: ProcessOrchestrator) -> Self {
        Unit::Process(Box::new(process))
    }
}
