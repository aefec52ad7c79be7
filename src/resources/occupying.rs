/*!
 * Occupying Resource
 * Binary held/free resource, reusable after release
 */

use super::traits::ResourceLifecycle;
use super::types::{ReleaseWarning, ResourceError, ResourceKind, ResourceResult, ResourceUsage};
use crate::core::errors::ConstructionResult;
use crate::core::types::Capacity;
use crate::core::validation::{validate_capacity, validate_name};
use tracing::{debug, warn};

/// Usable resource (e.g. a CPU)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupyingResource {
    name: String,
    capacity: Capacity,
    held: bool,
}

impl OccupyingResource {
    pub fn new(name: impl Into<String>, capacity: Capacity) -> ConstructionResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_capacity(&name, capacity)?;
        Ok(Self {
            name,
            capacity,
            held: false,
        })
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[inline]
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl ResourceLifecycle for OccupyingResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Occupying
    }

    #[inline]
    fn check_availability(&self) -> bool {
        !self.held
    }

    fn allocate(&mut self) -> ResourceResult<()> {
        if self.held {
            return Err(ResourceError::AlreadyHeld {
                resource: self.name.clone(),
            });
        }
        self.held = true;
        debug!(resource = %self.name, "Occupied resource");
        Ok(())
    }

    fn release(&mut self) -> Option<ReleaseWarning> {
        if !self.held {
            let warning = ReleaseWarning::AlreadyFree {
                resource: self.name.clone(),
            };
            warn!(resource = %self.name, "{}", warning);
            return Some(warning);
        }
        self.held = false;
        None
    }

    fn revert_allocation(&mut self) -> Option<ReleaseWarning> {
        self.release()
    }

    fn use_resource(&self) -> ResourceUsage {
        ResourceUsage {
            resource: self.name.clone(),
            kind: ResourceKind::Occupying,
            capacity: self.capacity,
            remaining: None,
        }
    }
}
