/*!
 * Resource Property Tests
 * Capacity and hold/free laws checked over generated inputs
 */

use proptest::prelude::*;
use resource_kernel::{
    DepletingResource, OccupyingResource, ResourceError, ResourceLifecycle,
};

proptest! {
    #[test]
    fn prop_depleting_capacity_law(capacity in 1u32..256) {
        let mut memory = DepletingResource::new("Memory", capacity).unwrap();
        for _ in 0..capacity {
            prop_assert!(memory.check_availability());
            prop_assert!(memory.allocate().is_ok());
        }
        prop_assert!(!memory.check_availability());
        let exhausted = matches!(memory.allocate(), Err(ResourceError::Exhausted { .. }));
        prop_assert!(exhausted);

        for _ in 0..capacity + 2 {
            memory.release();
        }
        prop_assert!(!memory.check_availability());
        prop_assert_eq!(memory.remaining_capacity(), 0);
    }

    #[test]
    fn prop_depleting_release_keeps_remaining(capacity in 1u32..64, allocations in 0u32..64) {
        let mut memory = DepletingResource::new("Memory", capacity).unwrap();
        let allocations = allocations.min(capacity);
        for _ in 0..allocations {
            memory.allocate().unwrap();
        }
        let remaining = memory.remaining_capacity();

        memory.release();
        memory.release();

        prop_assert_eq!(memory.remaining_capacity(), remaining);
        prop_assert_eq!(memory.check_availability(), remaining > 0);
    }

    #[test]
    fn prop_occupying_alternation(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut cpu = OccupyingResource::new("CPU", 3).unwrap();
        let mut held = false;
        for allocate in ops {
            if allocate {
                prop_assert_eq!(cpu.allocate().is_ok(), !held);
                held = true;
            } else {
                prop_assert_eq!(cpu.release().is_some(), !held);
                held = false;
            }
            prop_assert_eq!(cpu.check_availability(), !held);
        }
    }
}
