/*!
 * Process Builder
 * Builder pattern for ProcessOrchestrator construction
 */

use super::orchestrator::ProcessOrchestrator;
use super::task::Task;
use super::unit::Unit;
use crate::core::errors::ConstructionResult;
use crate::core::types::Units;
use crate::monitoring::EventSink;
use crate::resources::Resource;
use std::sync::Arc;
use tracing::debug;

/// Builder for ProcessOrchestrator
pub struct ProcessBuilder {
    name: String,
    description: String,
    required: Vec<String>,
    duration: Units,
    resources: Vec<Resource>,
    units: Vec<Unit>,
    sink: Option<Arc<dyn EventSink>>,
}

impl ProcessBuilder {
    /// Start a builder; duration defaults to one unit
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: Vec::new(),
            duration: 1,
            resources: Vec::new(),
            units: Vec::new(),
            sink: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Resources the process itself holds while it runs
    pub fn requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn duration(mut self, units: Units) -> Self {
        self.duration = units;
        self
    }

    pub fn resource(mut self, resource: impl Into<Resource>) -> Self {
        self.resources.push(resource.into());
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.units.push(Unit::Task(task));
        self
    }

    pub fn process(mut self, process: ProcessOrchestrator) -> Self {
        self.units.push(process.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<Unit>) -> Self {
        self.units.push(unit.into());
        self
    }

    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the ProcessOrchestrator
    pub fn build(self) -> ConstructionResult<ProcessOrchestrator> {
        let mut process =
            ProcessOrchestrator::new(self.name, self.description, self.required, self.duration)?;
        if let Some(sink) = self.sink {
            process.set_sink(sink);
        }

        let resource_count = self.resources.len();
        let unit_count = self.units.len();
        for resource in self.resources {
            process.add_resource(resource);
        }
        for unit in self.units {
            process.add_unit(unit);
        }

        debug!(
            resources = resource_count,
            units = unit_count,
            "ProcessOrchestrator built"
        );
        Ok(process)
    }
}
