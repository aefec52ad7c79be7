/*!
 * Process Specs
 * Serde construction inputs for resources, tasks and processes
 */

use super::{ConfigError, ConfigResult};
use crate::core::errors::ConstructionResult;
use crate::core::types::{Capacity, Units};
use crate::monitoring::{EventSink, TracingSink};
use crate::core::validation::validate_depth;
use crate::process::{ProcessOrchestrator, Task, Unit};
use crate::resources::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// `{ name, kind, capacity }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceSpec {
    pub name: String,
    pub kind: ResourceKind,
    pub capacity: Capacity,
}

impl ResourceSpec {
    pub fn build(&self) -> ConstructionResult<Resource> {
        Resource::of_kind(self.kind, self.name.clone(), self.capacity)
    }
}

/// `{ name, description, required_resources, duration_units }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutableSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_resources: Vec<String>,
    pub duration_units: Units,
}

impl ExecutableSpec {
    pub fn build(&self) -> ConstructionResult<Task> {
        Task::new(
            self.name.clone(),
            self.description.clone(),
            self.required_resources.iter().cloned(),
            self.duration_units,
        )
    }
}

/// Entry of a process sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitSpec {
    Task(ExecutableSpec),
    Process(ProcessSpec),
}

/// A process with its pool and ordered units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_resources: Vec<String>,
    pub duration_units: Units,
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

impl ProcessSpec {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = Self::from_json_str(&contents)?;
        info!(path = %path.display(), process = %spec.name, "Loaded process spec");
        Ok(spec)
    }

    /// Build with run events going to tracing
    pub fn build(&self) -> ConstructionResult<ProcessOrchestrator> {
        self.build_with_sink(Arc::new(TracingSink))
    }

    /// Build with run events going to `sink`, nested processes included
    pub fn build_with_sink(
        &self,
        sink: Arc<dyn EventSink>,
    ) -> ConstructionResult<ProcessOrchestrator> {
        self.build_at(0, &sink)
    }

    fn build_at(
        &self,
        depth: usize,
        sink: &Arc<dyn EventSink>,
    ) -> ConstructionResult<ProcessOrchestrator> {
        validate_depth(&self.name, depth)?;

        let mut process = ProcessOrchestrator::new(
            self.name.clone(),
            self.description.clone(),
            self.required_resources.iter().cloned(),
            self.duration_units,
        )?
        .with_sink(Arc::clone(sink));

        for resource in &self.resources {
            process.add_resource(resource.build()?);
        }
        for unit in &self.units {
            let unit: Unit = match unit {
                UnitSpec::Task(task) => task.build()?.into(),
                UnitSpec::Process(nested) => nested.build_at(depth + 1, sink)?.into(),
            };
            process.add_unit(unit);
        }
        Ok(process)
    }
}
