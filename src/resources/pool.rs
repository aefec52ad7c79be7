/*!
 * Resource Pool
 * Arena owning resources, addressed through pool-scoped handles
 */

use super::traits::ResourceLifecycle;
use super::types::{ReleaseWarning, ResourceResult, ResourceUsage};
use super::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Pool identifier, unique per process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(pub u64);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning reference to a pool entry
///
/// Only meaningful against the pool that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle {
    pool: PoolId,
    index: usize,
}

impl ResourceHandle {
    #[inline]
    #[must_use]
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.pool, self.index)
    }
}

/// Ordered set of resources exclusively owned by one orchestrator
#[derive(Debug)]
pub struct ResourcePool {
    id: PoolId,
    resources: Vec<Resource>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self {
            id: PoolId::next(),
            resources: Vec::new(),
        }
    }

    pub fn with_resources<I>(resources: I) -> Self
    where
        I: IntoIterator<Item = Resource>,
    {
        let mut pool = Self::new();
        pool.resources.extend(resources);
        pool
    }

    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Add a resource; duplicate names are allowed and searched in insertion order
    pub fn add(&mut self, resource: impl Into<Resource>) -> ResourceHandle {
        self.resources.push(resource.into());
        ResourceHandle {
            pool: self.id,
            index: self.resources.len() - 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    #[inline]
    pub fn owns(&self, handle: ResourceHandle) -> bool {
        handle.pool == self.id && handle.index < self.resources.len()
    }

    pub fn get(&self, handle: ResourceHandle) -> Option<&Resource> {
        if handle.pool != self.id {
            return None;
        }
        self.resources.get(handle.index)
    }

    /// First resource with this name, available or not
    pub fn find(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name() == name)
    }

    /// First entry with this name that is currently available
    pub fn find_available(&self, name: &str) -> Option<ResourceHandle> {
        self.resources
            .iter()
            .position(|r| r.name() == name && r.check_availability())
            .map(|index| ResourceHandle {
                pool: self.id,
                index,
            })
    }

    #[inline]
    pub fn has_available(&self, name: &str) -> bool {
        self.find_available(name).is_some()
    }

    /// Allocate the entry behind `handle`
    ///
    /// Returns `None` for a handle this pool did not issue.
    pub fn allocate(&mut self, handle: ResourceHandle) -> Option<ResourceResult<()>> {
        if handle.pool != self.id {
            return None;
        }
        self.resources.get_mut(handle.index).map(|r| r.allocate())
    }

    /// Release the entry behind `handle`
    pub fn release(&mut self, handle: ResourceHandle) -> Option<ReleaseWarning> {
        match self.entry_mut(handle) {
            Ok(resource) => resource.release(),
            Err(warning) => Some(warning),
        }
    }

    /// Roll back an unused allocation of the entry behind `handle`
    pub fn revert(&mut self, handle: ResourceHandle) -> Option<ReleaseWarning> {
        match self.entry_mut(handle) {
            Ok(resource) => resource.revert_allocation(),
            Err(warning) => Some(warning),
        }
    }

    fn entry_mut(&mut self, handle: ResourceHandle) -> Result<&mut Resource, ReleaseWarning> {
        let id = self.id;
        let entry = if handle.pool == id {
            self.resources.get_mut(handle.index)
        } else {
            None
        };
        entry.ok_or_else(|| {
            let warning = ReleaseWarning::ForeignHandle { handle };
            warn!(pool = %id, %handle, "{}", warning);
            warning
        })
    }

    pub fn use_resource(&self, handle: ResourceHandle) -> Option<ResourceUsage> {
        self.get(handle).map(|r| r.use_resource())
    }
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Resource> for ResourcePool {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self::with_resources(iter)
    }
}
