/*!
 * Core Types
 * Common types used across the kernel
 */

/// Abstract time units an executable declares as its duration
pub type Units = u32;

/// Capacity of a resource (MB for depleting, GHz for occupying)
pub type Capacity = u32;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;
