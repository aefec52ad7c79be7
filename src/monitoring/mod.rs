/*!
 * Monitoring
 * Execution events, event sinks and tracing setup
 */

mod events;
mod sinks;
mod tracer;

pub use events::{ExecutionEvent, Severity};
pub use sinks::{EventLog, EventSink, FanoutSink, TracingSink};
pub use tracer::{generate_run_id, init_tracing, span_run};
