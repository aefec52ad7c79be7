/*!
 * Resource Traits
 * Lifecycle contract shared by every resource variant
 */

use super::types::{ReleaseWarning, ResourceKind, ResourceResult, ResourceUsage};

/// Resource lifecycle: availability check, allocate, use, release
pub trait ResourceLifecycle: Send + Sync {
    /// Unique name within a pool
    fn name(&self) -> &str;

    /// Kind tag
    fn kind(&self) -> ResourceKind;

    /// Pure availability query
    fn check_availability(&self) -> bool;

    /// Consume or hold one unit
    ///
    /// Fails when the resource is not available.
    fn allocate(&mut self) -> ResourceResult<()>;

    /// Give back a previous allocation
    ///
    /// Never fails; returns a warning for double or spurious releases.
    fn release(&mut self) -> Option<ReleaseWarning>;

    /// Undo an allocation that was never used
    ///
    /// Rolls a failed assignment back to its pre-call state. Unlike
    /// `release`, this returns a depleting unit to the remaining capacity.
    fn revert_allocation(&mut self) -> Option<ReleaseWarning>;

    /// Report current usage. Not guarded by allocation state.
    fn use_resource(&self) -> ResourceUsage;
}
