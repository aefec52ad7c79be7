/*!
 * Resource Kernel - Main Entry Point
 *
 * Runs a process spec from disk, or the built-in compilation simulation:
 * - CompileMain: five compiler stages sharing a CPU and 4096 MB of memory
 * - CompileLimited: the first two stages with only 2 MB of memory, of which
 *   the process itself claims one; the second stage is skipped
 */

use resource_kernel::core::limits::{
    DEMO_CPU_CAPACITY, DEMO_LIMITED_MEMORY_CAPACITY, DEMO_MEMORY_CAPACITY, ENV_PROCESS_SPEC,
};
use resource_kernel::{
    init_tracing, Capacity, KernelResult, ProcessBuilder, ProcessOrchestrator, ProcessSpec,
    Resource, Task,
};
use tracing::info;

const CPU: &str = "CentralProcessingUnit";
const MEMORY: &str = "Memory";

fn main() -> miette::Result<()> {
    init_tracing();

    info!("Resource kernel starting...");

    let spec_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_PROCESS_SPEC).ok());

    let processes = match spec_path {
        Some(path) => {
            info!(path = %path, "Running process spec");
            vec![load_spec(&path)?]
        }
        None => {
            info!("No process spec given, running compilation simulation");
            compilation_demo()?
        }
    };

    for mut process in processes {
        let report = process.run();
        println!("{}", report);
        for failure in &report.failed {
            println!("  failed:  {} ({})", failure.unit, failure.reason);
        }
        for skipped in &report.skipped {
            println!("  skipped: {}", skipped);
        }
    }

    Ok(())
}

fn load_spec(path: &str) -> KernelResult<ProcessOrchestrator> {
    let spec = ProcessSpec::from_file(path)?;
    Ok(spec.build()?)
}

fn compilation_demo() -> KernelResult<Vec<ProcessOrchestrator>> {
    let full = compilation(
        "CompileMain",
        "Compile main.c to main.exe",
        DEMO_MEMORY_CAPACITY,
        &STAGES,
    )?;
    let limited = compilation(
        "CompileLimited",
        "Compile main.c with low memory",
        DEMO_LIMITED_MEMORY_CAPACITY,
        &STAGES[..2],
    )?;
    Ok(vec![full, limited])
}

const STAGES: [(&str, &str, u32); 5] = [
    ("ScanSourceCode", "Tokenize main.c", 2),
    ("ParseSyntax", "Build syntax tree from tokens", 3),
    ("PerformStaticAnalysis", "Check syntax tree for errors", 4),
    ("GenerateCode", "Generate machine code", 3),
    ("LinkBinary", "Link object files into main.exe", 2),
];

fn compilation(
    name: &str,
    description: &str,
    memory: Capacity,
    stages: &[(&str, &str, u32)],
) -> KernelResult<ProcessOrchestrator> {
    let mut builder = ProcessBuilder::new(name)
        .description(description)
        // The process claims no CPU so the stages can use it
        .requires([MEMORY])
        .duration(15)
        .resource(Resource::occupying(CPU, DEMO_CPU_CAPACITY)?)
        .resource(Resource::depleting(MEMORY, memory)?);

    for (stage, what, units) in stages {
        builder = builder.task(Task::new(*stage, *what, [CPU, MEMORY], *units)?);
    }
    Ok(builder.build()?)
}
