/*!
 * Resource Lifecycle Tests
 * Allocation, release and pool behavior through the public API
 */

use pretty_assertions::assert_eq;
use resource_kernel::resources::ResourceUsage;
use resource_kernel::{
    DepletingResource, OccupyingResource, ReleaseWarning, Resource, ResourceError, ResourceKind,
    ResourceLifecycle, ResourcePool,
};

#[test]
fn test_depleting_exhausts_after_capacity() {
    let mut memory = DepletingResource::new("Memory", 3).unwrap();
    for _ in 0..3 {
        memory.allocate().unwrap();
    }

    assert!(!memory.check_availability());
    assert_eq!(
        memory.allocate(),
        Err(ResourceError::Exhausted {
            resource: "Memory".to_string()
        })
    );
}

#[test]
fn test_depleted_resource_stays_depleted() {
    let mut memory = DepletingResource::new("Memory", 1).unwrap();
    memory.allocate().unwrap();

    memory.release();
    memory.release();

    assert!(!memory.check_availability());
    assert_eq!(memory.remaining_capacity(), 0);
}

#[test]
fn test_occupying_cycle() {
    let mut cpu = OccupyingResource::new("CPU", 3).unwrap();

    cpu.allocate().unwrap();
    assert!(matches!(cpu.allocate(), Err(ResourceError::AlreadyHeld { .. })));

    assert_eq!(cpu.release(), None);
    assert!(cpu.allocate().is_ok());
}

#[test]
fn test_release_twice_never_fails() {
    let mut cpu = Resource::occupying("CPU", 3).unwrap();
    cpu.allocate().unwrap();

    assert_eq!(cpu.release(), None);
    assert_eq!(
        cpu.release(),
        Some(ReleaseWarning::AlreadyFree {
            resource: "CPU".to_string()
        })
    );
    assert!(cpu.check_availability());
}

#[test]
fn test_use_is_unguarded() {
    let cpu = Resource::occupying("CPU", 3).unwrap();
    let usage = cpu.use_resource();
    assert_eq!(
        usage,
        ResourceUsage {
            resource: "CPU".to_string(),
            kind: ResourceKind::Occupying,
            capacity: 3,
            remaining: None,
        }
    );
}

#[test]
fn test_pool_from_iterator() {
    let pool: ResourcePool = vec![
        Resource::occupying("CPU", 3).unwrap(),
        Resource::depleting("Memory", 2).unwrap(),
    ]
    .into_iter()
    .collect();

    assert_eq!(pool.len(), 2);
    assert_eq!(pool.find("Memory").map(|r| r.kind()), Some(ResourceKind::Depleting));
    assert!(pool.has_available("CPU"));
}

#[test]
fn test_pool_prefers_first_available_duplicate() {
    let mut pool = ResourcePool::new();
    let first = pool.add(Resource::depleting("Memory", 1).unwrap());
    let second = pool.add(Resource::depleting("Memory", 1).unwrap());

    assert_eq!(pool.find_available("Memory"), Some(first));
    pool.allocate(first).unwrap().unwrap();
    assert_eq!(pool.find_available("Memory"), Some(second));
}
