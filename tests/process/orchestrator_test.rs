/*!
 * Process Orchestrator Tests
 * Own-resource handling, rejection and nesting
 */

use pretty_assertions::assert_eq;
use resource_kernel::{
    EventLog, Executable, ExecutableError, ExecutionEvent, ProcessBuilder, Resource,
    ResourceLifecycle, ResourcePool, RunOutcome, RunState, Task,
};
use std::sync::Arc;

fn task(name: &str, required: &[&str]) -> Task {
    Task::new(name, "", required.iter().copied(), 1).unwrap()
}

#[test]
fn test_rejected_run_does_no_sub_unit_work() {
    let log = Arc::new(EventLog::new());
    let mut process = ProcessBuilder::new("Starved")
        .requires(["CPU"])
        .resource(Resource::depleting("Memory", 4).unwrap())
        .task(task("Scan", &["Memory"]))
        .sink(log.clone())
        .build()
        .unwrap();

    let report = process.run();

    assert_eq!(
        report.outcome,
        RunOutcome::Rejected {
            reason: "Insufficient resources in pool to start 'Starved'".to_string()
        }
    );
    assert!(report.executed.is_empty());
    assert_eq!(process.state(), RunState::Rejected);
    assert_eq!(
        process.pool().find("Memory").unwrap().use_resource().remaining,
        Some(4)
    );
    assert!(log
        .events()
        .iter()
        .any(|e| matches!(e, ExecutionEvent::ProcessRejected { .. })));
}

#[test]
fn test_rejected_when_own_assignment_fails() {
    // One CPU satisfies the per-name check but not a double claim
    let mut process = ProcessBuilder::new("Double")
        .requires(["CPU", "CPU"])
        .resource(Resource::occupying("CPU", 3).unwrap())
        .task(task("Scan", &[]))
        .sink(Arc::new(EventLog::new()))
        .build()
        .unwrap();

    let report = process.run();

    assert!(report.is_rejected());
    assert!(process.pool().has_available("CPU"));
}

#[test]
fn test_nested_process_runs_against_its_own_pool() {
    let log = Arc::new(EventLog::new());
    let inner = ProcessBuilder::new("Inner")
        .requires(["Lock"])
        .resource(Resource::occupying("Disk", 1).unwrap())
        .task(task("Write", &["Disk"]))
        .task(task("NeedsLock", &["Lock"]))
        .build()
        .unwrap();

    let mut outer = ProcessBuilder::new("Outer")
        .resource(Resource::occupying("Lock", 1).unwrap())
        .process(inner)
        .task(task("AfterInner", &["Lock"]))
        .sink(log.clone())
        .build()
        .unwrap();

    let report = outer.run();

    assert!(report.is_completed());
    assert!(!report.is_clean());
    assert_eq!(
        report.executed,
        vec!["Inner".to_string(), "AfterInner".to_string()]
    );
    assert_eq!(report.skipped, vec!["Inner/NeedsLock".to_string()]);

    // Inner's Lock came from the outer pool; its own pool has no Lock
    let skipped = log.filter(|e| matches!(e, ExecutionEvent::UnitSkipped { .. }));
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].subject(), "NeedsLock");
    assert!(log
        .filter(|e| matches!(e, ExecutionEvent::UnitExecuting { .. }))
        .iter()
        .any(|e| e.subject() == "Write"));
    assert!(outer.pool().has_available("Lock"));
}

#[test]
fn test_nested_skips_and_failures_reach_the_run_report() {
    let inner = ProcessBuilder::new("Inner")
        .resource(Resource::occupying("CPU", 3).unwrap())
        .task(task("NeedsGpu", &["GPU"]))
        .task(task("Greedy", &["CPU", "CPU"]))
        .build()
        .unwrap();
    let mut outer = ProcessBuilder::new("Outer")
        .process(inner)
        .sink(Arc::new(EventLog::new()))
        .build()
        .unwrap();

    let report = outer.run();

    assert!(report.is_completed());
    assert!(!report.is_clean());
    assert_eq!(report.executed, vec!["Inner".to_string()]);
    assert_eq!(report.skipped, vec!["Inner/NeedsGpu".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].unit, "Inner/Greedy");
}

#[test]
fn test_task_cannot_move_to_another_pool_while_assigned() {
    let mut first = ResourcePool::new();
    first.add(Resource::occupying("CPU", 3).unwrap());
    let mut second = ResourcePool::new();
    second.add(Resource::occupying("CPU", 3).unwrap());
    let mut scan = task("Scan", &["CPU"]);

    scan.assign_resources(&mut first).unwrap();
    let err = scan.assign_resources(&mut second).unwrap_err();

    assert_eq!(
        err,
        ExecutableError::ForeignAssignment {
            unit: "Scan".to_string()
        }
    );
    assert!(!first.has_available("CPU"));
    assert!(scan.release_resources(&mut first).is_empty());
    assert!(first.has_available("CPU"));
    assert!(second.has_available("CPU"));
}

#[test]
fn test_nested_process_skipped_when_parent_lacks_its_resources() {
    let inner = ProcessBuilder::new("Inner")
        .requires(["GPU"])
        .task(task("Render", &[]))
        .build()
        .unwrap();
    let mut outer = ProcessBuilder::new("Outer")
        .process(inner)
        .sink(Arc::new(EventLog::new()))
        .build()
        .unwrap();

    let report = outer.run();

    assert!(report.is_completed());
    assert_eq!(report.skipped, vec!["Inner".to_string()]);
}

#[test]
fn test_nested_execute_without_assignment_is_mismatch() {
    let mut inner = ProcessBuilder::new("Inner")
        .requires(["CPU"])
        .build()
        .unwrap();
    let pool = ResourcePool::new();
    let log = EventLog::new();

    let err = inner.execute(&pool, &log).unwrap_err();
    assert!(matches!(err, ExecutableError::ResourceMismatch { .. }));
}

#[test]
fn test_empty_task_round_trip() {
    let mut noop = task("Noop", &[]);
    let mut pool = ResourcePool::new();
    let log = EventLog::new();

    assert!(noop.can_execute(&pool));
    assert!(noop.assign_resources(&mut pool).is_ok());
    assert!(noop.assigned_resources().is_empty());
    assert!(noop.execute(&pool, &log).is_ok());
}

#[test]
fn test_all_or_nothing_assignment() {
    let mut pool = ResourcePool::new();
    pool.add(Resource::depleting("A", 1).unwrap());
    pool.add(Resource::occupying("B", 1).unwrap());
    let b = pool.find_available("B").unwrap();
    pool.allocate(b).unwrap().unwrap();

    let mut unit = task("Both", &["A", "B"]);
    let err = unit.assign_resources(&mut pool).unwrap_err();

    assert_eq!(
        err,
        ExecutableError::ResourceUnavailable {
            unit: "Both".to_string(),
            resource: "B".to_string()
        }
    );
    assert!(unit.assigned_resources().is_empty());
    assert!(pool.has_available("A"));
    assert_eq!(pool.find("A").unwrap().use_resource().remaining, Some(1));
}
