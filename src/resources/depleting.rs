/*!
 * Depleting Resource
 * Finite unit capacity consumed one unit per allocation
 */

use super::traits::ResourceLifecycle;
use super::types::{ReleaseWarning, ResourceError, ResourceKind, ResourceResult, ResourceUsage};
use crate::core::errors::ConstructionResult;
use crate::core::types::Capacity;
use crate::core::validation::{validate_capacity, validate_name};
use tracing::{debug, warn};

/// Consumable resource (e.g. memory)
///
/// Capacity only ever goes down. Release settles an outstanding
/// allocation but never restores a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepletingResource {
    name: String,
    total_capacity: Capacity,
    remaining_capacity: Capacity,
    outstanding: u32,
}

impl DepletingResource {
    pub fn new(name: impl Into<String>, capacity: Capacity) -> ConstructionResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_capacity(&name, capacity)?;
        Ok(Self {
            name,
            total_capacity: capacity,
            remaining_capacity: capacity,
            outstanding: 0,
        })
    }

    #[inline]
    #[must_use]
    pub fn remaining_capacity(&self) -> Capacity {
        self.remaining_capacity
    }

    #[inline]
    #[must_use]
    pub fn total_capacity(&self) -> Capacity {
        self.total_capacity
    }

    /// Allocations not yet released
    #[inline]
    #[must_use]
    pub fn outstanding(&self) -> u32 {
        self.outstanding
    }
}

impl ResourceLifecycle for DepletingResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Depleting
    }

    #[inline]
    fn check_availability(&self) -> bool {
        self.remaining_capacity > 0
    }

    fn allocate(&mut self) -> ResourceResult<()> {
        if self.remaining_capacity == 0 {
            return Err(ResourceError::Exhausted {
                resource: self.name.clone(),
            });
        }
        self.remaining_capacity -= 1;
        self.outstanding += 1;
        debug!(
            resource = %self.name,
            remaining = self.remaining_capacity,
            total = self.total_capacity,
            "Allocated depleting resource"
        );
        Ok(())
    }

    fn release(&mut self) -> Option<ReleaseWarning> {
        if self.outstanding == 0 {
            let warning = ReleaseWarning::NotAllocated {
                resource: self.name.clone(),
            };
            warn!(resource = %self.name, "{}", warning);
            return Some(warning);
        }
        self.outstanding -= 1;

        if self.remaining_capacity == 0 {
            let warning = ReleaseWarning::Depleted {
                resource: self.name.clone(),
            };
            warn!(resource = %self.name, "{}", warning);
            return Some(warning);
        }
        None
    }

    fn revert_allocation(&mut self) -> Option<ReleaseWarning> {
        if self.outstanding == 0 {
            let warning = ReleaseWarning::NotAllocated {
                resource: self.name.clone(),
            };
            warn!(resource = %self.name, "{}", warning);
            return Some(warning);
        }
        self.outstanding -= 1;
        self.remaining_capacity += 1;
        debug!(
            resource = %self.name,
            remaining = self.remaining_capacity,
            "Reverted depleting allocation"
        );
        None
    }

    fn use_resource(&self) -> ResourceUsage {
        ResourceUsage {
            resource: self.name.clone(),
            kind: ResourceKind::Depleting,
            capacity: self.total_capacity,
            remaining: Some(self.remaining_capacity),
        }
    }
}
