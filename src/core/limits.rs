/*!
 * System Limits and Constants
 *
 * Centralized location for system-wide limits and demo defaults.
 */

// =============================================================================
// CONSTRUCTION LIMITS
// =============================================================================

/// Maximum depth of processes nested inside processes
/// Deeper specs are rejected at construction time
pub const MAX_NESTING_DEPTH: usize = 32;

// =============================================================================
// DEMO DEFAULTS
// =============================================================================

/// CPU capacity used by the compilation demo (GHz)
pub const DEMO_CPU_CAPACITY: u32 = 3;

/// Memory capacity used by the full compilation demo (MB)
pub const DEMO_MEMORY_CAPACITY: u32 = 4096;

/// Memory capacity used by the low-memory compilation demo (MB)
pub const DEMO_LIMITED_MEMORY_CAPACITY: u32 = 2;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Path to a JSON process spec run by the binary
pub const ENV_PROCESS_SPEC: &str = "KERNEL_PROCESS_SPEC";

/// Enables JSON-formatted tracing output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "KERNEL_TRACE_JSON";
