/*!
 * Executable Contract
 *
 * Shared state and protocol for every unit of work:
 * check -> assign -> execute -> release.
 *
 * # Invariants
 *
 * - The assigned list is either empty or exactly as long as the required list
 * - Assignment is all-or-nothing: a failed call leaves nothing allocated
 * - Executables hold pool handles only; the pool owns every resource
 */

use super::types::{ExecutableError, ExecutableResult};
use crate::core::errors::ConstructionResult;
use crate::core::types::Units;
use crate::core::validation::{validate_duration, validate_name};
use crate::monitoring::EventSink;
use crate::resources::{ReleaseWarning, ResourceHandle, ResourcePool, ResourceUsage};
use tracing::{debug, warn};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Identity, requirements and current assignment of a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableCore {
    name: String,
    description: String,
    required: Vec<String>,
    duration: Units,
    assigned: Vec<ResourceHandle>,
}

impl ExecutableCore {
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
        let name = name.into();
        validate_name(&name)?;
        validate_duration(&name, duration)?;
        Ok(Self {
            name,
            description: description.into(),
            required: required.into_iter().map(Into::into).collect(),
            duration,
            assigned: Vec::new(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn required_resources_names(&self) -> &[String] {
        &self.required
    }

    #[inline]
    pub fn duration_units(&self) -> Units {
        self.duration
    }

    #[inline]
    pub fn assigned_resources(&self) -> &[ResourceHandle] {
        &self.assigned
    }

    /// Every required name has an available match right now
    ///
    /// Optimistic: `assign` is the authority.
    pub fn can_execute(&self, pool: &ResourcePool) -> bool {
        self.required.iter().all(|name| pool.has_available(name))
    }

    /// Bind one available pool entry per required name, in declared order
    pub fn assign(&mut self, pool: &mut ResourcePool) -> ExecutableResult<()> {
        if self.assigned.iter().any(|&handle| !pool.owns(handle)) {
            return Err(ExecutableError::ForeignAssignment {
                unit: self.name.clone(),
            });
        }
        if !self.assigned.is_empty() {
            debug!(unit = %self.name, "Releasing stale assignment before reassigning");
            let warnings = self.release(pool);
            debug!(unit = %self.name, warnings = warnings.len(), "Stale assignment released");
        }

        for index in 0..self.required.len() {
            let outcome = match pool.find_available(&self.required[index]) {
                Some(handle) => match pool.allocate(handle) {
                    Some(Ok(())) => {
                        self.assigned.push(handle);
                        continue;
                    }
                    Some(Err(err)) => ExecutableError::Allocation(err),
                    None => ExecutableError::PoolMismatch {
                        unit: self.name.clone(),
                    },
                },
                None => ExecutableError::ResourceUnavailable {
                    unit: self.name.clone(),
                    resource: self.required[index].clone(),
                },
            };
            self.rollback(pool);
            return Err(outcome);
        }

        debug!(unit = %self.name, count = self.assigned.len(), "Resources assigned");
        Ok(())
    }

    /// Release every assigned resource, then clear the assignment
    ///
    /// Best-effort: each warning is logged and collected; none stops the loop.
    pub fn release(&mut self, pool: &mut ResourcePool) -> Vec<ReleaseWarning> {
        let warnings: Vec<ReleaseWarning> = self
            .assigned
            .drain(..)
            .filter_map(|handle| pool.release(handle))
            .collect();

        for warning in &warnings {
            warn!(unit = %self.name, "Release warning: {}", warning);
        }
        warnings
    }

    /// Assignment count matches requirement count
    pub fn check_assignment(&self) -> ExecutableResult<()> {
        if self.assigned.len() != self.required.len() {
            return Err(ExecutableError::ResourceMismatch {
                unit: self.name.clone(),
                assigned: self.assigned.len(),
                required: self.required.len(),
            });
        }
        Ok(())
    }

    /// Usage snapshots of the assigned resources, in assignment order
    pub fn usages(&self, pool: &ResourcePool) -> ExecutableResult<Vec<ResourceUsage>> {
        self.assigned
            .iter()
            .map(|&handle| {
                pool.use_resource(handle)
                    .ok_or_else(|| ExecutableError::PoolMismatch {
                        unit: self.name.clone(),
                    })
            })
            .collect()
    }

    fn rollback(&mut self, pool: &mut ResourcePool) {
        for handle in self.assigned.drain(..).rev() {
            if let Some(warning) = pool.revert(handle) {
                warn!(unit = %self.name, "Rollback warning: {}", warning);
            }
        }
    }
}

/// A unit of work that can run against a resource pool
///
/// Sealed: implemented by [`Task`](super::Task),
/// [`ProcessOrchestrator`](super::ProcessOrchestrator) and [`Unit`](super::Unit).
pub trait Executable: sealed::Sealed + Send + Sync {
    fn core(&self) -> &ExecutableCore;

    fn core_mut(&mut self) -> &mut ExecutableCore;

    /// Run the unit using resources assigned from `pool`
    ///
    /// Fails with `ResourceMismatch` when assignment did not happen.
    fn execute(&mut self, pool: &ResourcePool, sink: &dyn EventSink) -> ExecutableResult<()>;

    fn name(&self) -> &str {
        self.core().name()
    }

    fn description(&self) -> &str {
        self.core().description()
    }

    fn required_resources_names(&self) -> &[String] {
        self.core().required_resources_names()
    }

    fn duration_units(&self) -> Units {
        self.core().duration_units()
    }

    fn assigned_resources(&self) -> &[ResourceHandle] {
        self.core().assigned_resources()
    }

    fn can_execute(&self, pool: &ResourcePool) -> bool {
        self.core().can_execute(pool)
    }

    fn assign_resources(&mut self, pool: &mut ResourcePool) -> ExecutableResult<()> {
        self.core_mut().assign(pool)
    }

    fn release_resources(&mut self, pool: &mut ResourcePool) -> Vec<ReleaseWarning> {
        self.core_mut().release(pool)
    }
}
