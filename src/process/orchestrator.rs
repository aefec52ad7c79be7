/*!
 * Process Orchestrator
 *
 * Composite executable owning a resource pool and an ordered list of units.
 *
 * # Run protocol
 *
 * Idle -> Checking -> (Assigning -> Executing -> Releasing -> Completed) | Rejected
 *
 * Only the process's own requirements can reject a run. Every sub-unit is
 * checked, assigned, executed and released on its own; a sub-unit that
 * cannot start is skipped and a sub-unit that fails is reported, and the
 * sequence always continues.
 */

use super::executable::{sealed, Executable, ExecutableCore};
use super::types::{
    ExecutableError, ExecutableResult, RunOutcome, RunReport, RunState, UnitFailure,
};
use super::unit::Unit;
use crate::core::errors::ConstructionResult;
use crate::core::types::Units;
use crate::monitoring::{generate_run_id, span_run, EventSink, ExecutionEvent, TracingSink};
use crate::resources::{
    ReleaseWarning, Resource, ResourceHandle, ResourceLifecycle, ResourcePool, ResourceUsage,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

const SKIP_REASON: &str = "insufficient resources";

pub struct ProcessOrchestrator {
    core: ExecutableCore,
    pool: ResourcePool,
    units: Vec<Unit>,
    state: RunState,
    sink: Arc<dyn EventSink>,
}

impl ProcessOrchestrator {
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
            pool: ResourcePool::new(),
            units: Vec::new(),
            state: RunState::Idle,
            sink: Arc::new(TracingSink),
        })
    }

    /// Replace the sink used by `run()`
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn set_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sink = sink;
    }

    /// Add a resource to this process's pool
    pub fn add_resource(&mut self, resource: impl Into<Resource>) -> ResourceHandle {
        self.pool.add(resource)
    }

    /// Append a task or nested process to the sequence
    pub fn add_unit(&mut self, unit: impl Into<Unit>) {
        self.units.push(unit.into());
    }

    #[inline]
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the process standalone against its own pool
    ///
    /// Never fails; the outcome and every per-unit notice end up in the report.
    pub fn run(&mut self) -> RunReport {
        let run_id = generate_run_id();
        let span = span_run(self.core.name(), run_id);
        let _entered = span.enter();

        let sink = Arc::clone(&self.sink);
        let mut report = RunReport::new(run_id, self.core.name());

        if self.state.is_terminal() {
            self.enter(RunState::Idle);
        }
        self.enter(RunState::Checking);
        sink.emit(ExecutionEvent::ProcessStarted {
            process: self.core.name().to_string(),
            run_id,
        });

        let needs_resources = !self.core.required_resources_names().is_empty();
        if needs_resources && !self.core.can_execute(&self.pool) {
            let err = ExecutableError::InsufficientResources {
                process: self.core.name().to_string(),
            };
            return self.reject(report, &*sink, err);
        }

        self.enter(RunState::Assigning);
        if needs_resources {
            if let Err(err) = self.core.assign(&mut self.pool) {
                return self.reject(report, &*sink, err);
            }
            self.report_assigned(self.core.name(), &*sink);
        }

        self.enter(RunState::Executing);
        let own = self
            .core
            .check_assignment()
            .and_then(|_| self.core.usages(&self.pool));
        match own {
            Ok(usages) => self.perform(usages, &*sink, &mut report),
            Err(err) => {
                error!(process = %self.core.name(), error = %err, "Process execution failed");
                sink.emit(ExecutionEvent::UnitFailed {
                    unit: self.core.name().to_string(),
                    reason: err.to_string(),
                });
                report.failed.push(UnitFailure {
                    unit: self.core.name().to_string(),
                    reason: err.to_string(),
                });
            }
        }

        self.enter(RunState::Releasing);
        let name = self.core.name().to_string();
        let released = self.core.assigned_resources().len();
        let warnings = self.core.release(&mut self.pool);
        Self::report_released(&name, released, warnings, &*sink, &mut report);

        self.enter(RunState::Completed);
        info!(
            process = %name,
            executed = report.executed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Process completed"
        );
        sink.emit(ExecutionEvent::ProcessCompleted {
            process: name,
            run_id,
        });
        report
    }

    fn reject(
        &mut self,
        mut report: RunReport,
        sink: &dyn EventSink,
        err: ExecutableError,
    ) -> RunReport {
        self.enter(RunState::Rejected);
        error!(process = %self.core.name(), error = %err, "Process rejected");
        sink.emit(ExecutionEvent::ProcessRejected {
            process: self.core.name().to_string(),
            run_id: report.run_id,
            reason: err.to_string(),
        });
        report.outcome = RunOutcome::Rejected {
            reason: err.to_string(),
        };
        report
    }

    /// Nested execution: own resources come from `pool`, sub-units run
    /// against this process's pool and their notices land in `report`
    ///
    /// Skipped and failed sub-units are recorded as `outer/inner`.
    pub(crate) fn execute_into(
        &mut self,
        pool: &ResourcePool,
        sink: &dyn EventSink,
        report: &mut RunReport,
    ) -> ExecutableResult<()> {
        self.core.check_assignment()?;
        let usages = self.core.usages(pool)?;

        let mut nested = RunReport::new(report.run_id, self.core.name());
        self.perform(usages, sink, &mut nested);
        debug!(
            process = %self.core.name(),
            executed = nested.executed.len(),
            skipped = nested.skipped.len(),
            failed = nested.failed.len(),
            "Nested process finished"
        );
        report.absorb(nested);
        Ok(())
    }

    /// Report own execution, then run every unit against the own pool
    fn perform(
        &mut self,
        usages: Vec<ResourceUsage>,
        sink: &dyn EventSink,
        report: &mut RunReport,
    ) {
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

        for unit in self.units.iter_mut() {
            let name = unit.name().to_string();
            if unit.required_resources_names().is_empty() {
                sink.emit(ExecutionEvent::NoResourcesRequired { unit: name.clone() });
            }

            if !unit.can_execute(&self.pool) {
                sink.emit(ExecutionEvent::UnitSkipped {
                    unit: name.clone(),
                    reason: SKIP_REASON.to_string(),
                });
                report.skipped.push(name);
                continue;
            }

            match Self::cycle(unit, &mut self.pool, sink, report) {
                Ok(()) => report.executed.push(name),
                Err(err) => {
                    sink.emit(ExecutionEvent::UnitFailed {
                        unit: name.clone(),
                        reason: err.to_string(),
                    });
                    report.failed.push(UnitFailure {
                        unit: name,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    /// Assign, execute and release one unit
    ///
    /// Release happens whenever assignment succeeded, even if execute failed.
    /// Release warnings go into `report` either way.
    fn cycle(
        unit: &mut Unit,
        pool: &mut ResourcePool,
        sink: &dyn EventSink,
        report: &mut RunReport,
    ) -> ExecutableResult<()> {
        unit.assign_resources(pool)?;
        if !unit.assigned_resources().is_empty() {
            Self::emit_assigned(unit.name(), unit.assigned_resources(), pool, sink);
        }

        let executed = match unit {
            Unit::Task(task) => task.execute(pool, sink),
            Unit::Process(process) => process.execute_into(pool, sink, report),
        };

        let released = unit.assigned_resources().len();
        let warnings = unit.release_resources(pool);
        if released > 0 {
            sink.emit(ExecutionEvent::ResourcesReleased {
                unit: unit.name().to_string(),
                count: released,
            });
        }
        for warning in &warnings {
            sink.emit(ExecutionEvent::ReleaseWarned {
                unit: unit.name().to_string(),
                warning: warning.clone(),
            });
        }

        report.warnings.extend(warnings);
        executed
    }

    fn report_assigned(&self, name: &str, sink: &dyn EventSink) {
        Self::emit_assigned(name, self.core.assigned_resources(), &self.pool, sink);
    }

    fn emit_assigned(
        name: &str,
        handles: &[ResourceHandle],
        pool: &ResourcePool,
        sink: &dyn EventSink,
    ) {
        let resources = handles
            .iter()
            .filter_map(|&h| pool.get(h))
            .map(|r| r.name().to_string())
            .collect();
        sink.emit(ExecutionEvent::ResourcesAssigned {
            unit: name.to_string(),
            resources,
        });
    }

    fn report_released(
        name: &str,
        released: usize,
        warnings: Vec<ReleaseWarning>,
        sink: &dyn EventSink,
        report: &mut RunReport,
    ) {
        if released > 0 {
            sink.emit(ExecutionEvent::ResourcesReleased {
                unit: name.to_string(),
                count: released,
            });
        }
        for warning in &warnings {
            sink.emit(ExecutionEvent::ReleaseWarned {
                unit: name.to_string(),
                warning: warning.clone(),
            });
        }
        report.warnings.extend(warnings);
    }

    /// Move to `next`; an illegal transition is logged and ignored
    fn enter(&mut self, next: RunState) {
        if !self.state.can_transition_to(next) {
            error!(
                process = %self.core.name(),
                from = ?self.state,
                to = ?next,
                "Illegal run state transition"
            );
            return;
        }
        debug!(process = %self.core.name(), from = ?self.state, to = ?next, "Run state transition");
        self.state = next;
    }
}

impl sealed::Sealed for ProcessOrchestrator {}

impl Executable for ProcessOrchestrator {
    fn core(&self) -> &ExecutableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ExecutableCore {
        &mut self.core
    }

    /// Nested execution outside a parent run
    ///
    /// Sub-unit notices reach `sink` as events only.
    fn execute(&mut self, pool: &ResourcePool, sink: &dyn EventSink) -> ExecutableResult<()> {
        let mut report = RunReport::new(generate_run_id(), self.core.name());
        self.execute_into(pool, sink, &mut report)
    }
}

impl fmt::Debug for ProcessOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessOrchestrator")
            .field("core", &self.core)
            .field("pool", &self.pool)
            .field("units", &self.units)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
