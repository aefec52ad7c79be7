/*!
 * Resource System
 *
 * Typed resources and the pool that owns them.
 *
 * # Architecture
 *
 * - **ResourceLifecycle**: availability check, allocate, use, release
 * - **DepletingResource**: finite capacity, one unit per allocation, never replenished
 * - **OccupyingResource**: held/free, reusable after release
 * - **ResourcePool**: arena owning resources; executables hold `ResourceHandle`s only
 */

mod depleting;
mod occupying;
pub mod pool;
mod traits;
mod types;

pub use depleting::DepletingResource;
pub use occupying::OccupyingResource;
pub use pool::{PoolId, ResourceHandle, ResourcePool};
pub use traits::ResourceLifecycle;
pub use types::{ReleaseWarning, ResourceError, ResourceKind, ResourceResult, ResourceUsage};

use crate::core::errors::ConstructionResult;
use crate::core::types::Capacity;

/// Any resource a pool can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Depleting(DepletingResource),
    Occupying(OccupyingResource),
}

impl Resource {
    /// Build a depleting resource
    pub fn depleting(name: impl Into<String>, capacity: Capacity) -> ConstructionResult<Self> {
        DepletingResource::new(name, capacity).map(Resource::Depleting)
    }

    /// Build an occupying resource
    pub fn occupying(name: impl Into<String>, capacity: Capacity) -> ConstructionResult<Self> {
        OccupyingResource::new(name, capacity).map(Resource::Occupying)
    }

    /// Build a resource of the given kind
    pub fn of_kind(
        kind: ResourceKind,
        name: impl Into<String>,
        capacity: Capacity,
    ) -> ConstructionResult<Self> {
        match kind {
            ResourceKind::Depleting => Self::depleting(name, capacity),
            ResourceKind::Occupying => Self::occupying(name, capacity),
        }
    }

    fn inner(&self) -> &dyn ResourceLifecycle {
        match self {
            Resource::Depleting(r) => r,
            Resource::Occupying(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ResourceLifecycle {
        match self {
            Resource::Depleting(r) => r,
            Resource::Occupying(r) => r,
        }
    }
}

impl ResourceLifecycle for Resource {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn kind(&self) -> ResourceKind {
        self.inner().kind()
    }

    fn check_availability(&self) -> bool {
        self.inner().check_availability()
    }

    fn allocate(&mut self) -> ResourceResult<()> {
        self.inner_mut().allocate()
    }

    fn release(&mut self) -> Option<ReleaseWarning> {
        self.inner_mut().release()
    }

    fn revert_allocation(&mut self) -> Option<ReleaseWarning> {
        self.inner_mut().revert_allocation()
    }

    fn use_resource(&self) -> ResourceUsage {
        self.inner().use_resource()
    }
}

impl From<DepletingResource> for Resource {
    fn from(resource: DepletingResource) -> Self {
        Resource::Depleting(resource)
    }
}

impl From<OccupyingResource> for Resource {
    fn from(resource: OccupyingResource) -> Self {
        Resource::Occupying(resource)
    }
}
