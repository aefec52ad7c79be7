/*!
 * Process Scenario Tests
 * End-to-end runs over shared pools
 */

use pretty_assertions::assert_eq;
use resource_kernel::{
    EventLog, ExecutionEvent, ProcessBuilder, ProcessOrchestrator, Resource, ResourceLifecycle,
    RunState, Task,
};
use std::sync::Arc;

fn task(name: &str, required: &[&str]) -> Task {
    Task::new(name, format!("{} stage", name), required.iter().copied(), 2).unwrap()
}

fn memory_and_cpu(memory: u32, tasks: Vec<Task>) -> (ProcessOrchestrator, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    let mut builder = ProcessBuilder::new("Compile")
        .description("compile main.c")
        .duration(15)
        .resource(Resource::depleting("Memory", memory).unwrap())
        .resource(Resource::occupying("CPU", 3).unwrap())
        .sink(log.clone());
    for task in tasks {
        builder = builder.task(task);
    }
    (builder.build().unwrap(), log)
}

#[test]
fn test_two_tasks_share_memory_and_cpu() {
    let (mut process, _log) = memory_and_cpu(
        2,
        vec![task("Scan", &["Memory", "CPU"]), task("Parse", &["Memory", "CPU"])],
    );

    let report = process.run();

    assert!(report.is_completed());
    assert_eq!(report.executed, vec!["Scan".to_string(), "Parse".to_string()]);
    assert!(report.skipped.is_empty());
    assert_eq!(process.state(), RunState::Completed);
}

#[test]
fn test_third_task_skipped_when_memory_depleted() {
    let (mut process, log) = memory_and_cpu(
        2,
        vec![
            task("Scan", &["Memory", "CPU"]),
            task("Parse", &["Memory", "CPU"]),
            task("Link", &["Memory", "CPU"]),
        ],
    );

    let report = process.run();

    assert!(report.is_completed());
    assert_eq!(report.executed.len(), 2);
    assert_eq!(report.skipped, vec!["Link".to_string()]);
    assert!(process.pool().has_available("CPU"));
    assert!(!process.pool().has_available("Memory"));

    let skips = log.filter(|e| matches!(e, ExecutionEvent::UnitSkipped { .. }));
    assert_eq!(skips.len(), 1);
    assert_eq!(skips[0].subject(), "Link");
}

#[test]
fn test_missing_cpu_skips_only_cpu_tasks() {
    let log = Arc::new(EventLog::new());
    let mut process = ProcessBuilder::new("NoCpu")
        .resource(Resource::depleting("Memory", 8).unwrap())
        .task(task("NeedsCpu", &["CPU"]))
        .task(task("MemoryOnly", &["Memory"]))
        .task(task("Free", &[]))
        .sink(log.clone())
        .build()
        .unwrap();

    let report = process.run();

    assert!(report.is_completed());
    assert_eq!(report.skipped, vec!["NeedsCpu".to_string()]);
    assert_eq!(
        report.executed,
        vec!["MemoryOnly".to_string(), "Free".to_string()]
    );
    assert_eq!(
        log.filter(|e| matches!(e, ExecutionEvent::NoResourcesRequired { .. }))
            .len(),
        1
    );
}

#[test]
fn test_middle_unit_skipped_others_run() {
    let (mut process, log) = memory_and_cpu(
        4,
        vec![
            task("First", &["CPU"]),
            task("Second", &["GPU"]),
            task("Third", &["Memory"]),
        ],
    );

    let report = process.run();

    assert!(report.is_completed());
    assert_eq!(report.executed, vec!["First".to_string(), "Third".to_string()]);
    assert_eq!(report.skipped, vec!["Second".to_string()]);
    assert!(log
        .events()
        .iter()
        .any(|e| matches!(e, ExecutionEvent::ProcessCompleted { .. })));
}

#[test]
fn test_assignment_failure_is_isolated() {
    // Passes the per-name check but needs two CPUs when only one exists
    let (mut process, log) = memory_and_cpu(
        4,
        vec![task("Greedy", &["CPU", "CPU"]), task("Modest", &["CPU", "Memory"])],
    );

    let report = process.run();

    assert!(report.is_completed());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].unit, "Greedy");
    assert!(report.failed[0].reason.contains("CPU"));
    assert_eq!(report.executed, vec!["Modest".to_string()]);

    // Rollback left memory untouched by the failed unit
    let memory = process.pool().find("Memory").unwrap().use_resource();
    assert_eq!(memory.remaining, Some(3));

    let failures = log.filter(|e| matches!(e, ExecutionEvent::UnitFailed { .. }));
    assert_eq!(failures.len(), 1);
}

#[test]
fn test_event_order_for_one_task() {
    let (mut process, log) = memory_and_cpu(2, vec![task("Scan", &["CPU"])]);
    process.run();

    let kinds: Vec<&'static str> = log
        .events()
        .iter()
        .map(|e| match e {
            ExecutionEvent::ProcessStarted { .. } => "started",
            ExecutionEvent::NoResourcesRequired { .. } => "no_resources",
            ExecutionEvent::ResourcesAssigned { .. } => "assigned",
            ExecutionEvent::UnitExecuting { .. } => "executing",
            ExecutionEvent::ResourceUsed { .. } => "used",
            ExecutionEvent::ResourcesReleased { .. } => "released",
            ExecutionEvent::ReleaseWarned { .. } => "warned",
            ExecutionEvent::UnitSkipped { .. } => "skipped",
            ExecutionEvent::UnitFailed { .. } => "failed",
            ExecutionEvent::ProcessCompleted { .. } => "completed",
            ExecutionEvent::ProcessRejected { .. } => "rejected",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "started",   // process
            "executing", // process itself
            "assigned",
            "executing",
            "used",
            "released",
            "completed",
        ]
    );
}

#[test]
fn test_depleted_release_warning_is_reported() {
    let (mut process, _log) = memory_and_cpu(1, vec![task("Scan", &["Memory"])]);

    let report = process.run();

    assert_eq!(report.executed.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].to_string().contains("depleted"));
}
