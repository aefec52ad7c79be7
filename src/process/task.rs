/*!
 * Task
 * Leaf executable that uses its assigned resources
 */

use super::executable::{sealed, Executable, ExecutableCore};
use super::types::ExecutableResult;
use crate::core::errors::ConstructionResult;
use crate::core::types::Units;
use crate::monitoring::{EventSink, ExecutionEvent};
use crate::resources::ResourcePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    core: ExecutableCore,
}

impl Task {
    pub fn new<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        required: I,
        duration: Units,
    ) -> ConstructionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            core: ExecutableCore::new(name, description, required, duration)?,
        })
    }
}

impl sealed::Sealed for Task {}

impl Executable for Task {
    fn core(&self) -> &ExecutableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ExecutableCore {
        &mut self.core
    }

    fn execute(&mut self, pool: &ResourcePool, sink: &dyn EventSink) -> ExecutableResult<()> {
        self.core.check_assignment()?;
        let usages = self.core.usages(pool)?;

        sink.emit(ExecutionEvent::UnitExecuting {
            unit: self.core.name().to_string(),
            description: self.core.description().to_string(),
            duration_units: self.core.duration_units(),
        });
        for usage in usages {
            sink.emit(ExecutionEvent::ResourceUsed {
                unit: self.core.name().to_string(),
                usage,
            });
        }
        Ok(())
    }
}
