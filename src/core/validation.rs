/*!
 * Construction Validation
 * Argument checks shared by resources, tasks, processes and config
 */

use crate::core::errors::{ConstructionError, ConstructionResult};
use crate::core::limits::MAX_NESTING_DEPTH;
use crate::core::types::{Capacity, Units};

/// Names must contain at least one non-whitespace character
pub(crate) fn validate_name(name: &str) -> ConstructionResult<()> {
    if name.trim().is_empty() {
        return Err(ConstructionError::EmptyName);
    }
    Ok(())
}

pub(crate) fn validate_duration(name: &str, units: Units) -> ConstructionResult<()> {
    if units == 0 {
        return Err(ConstructionError::NonPositiveDuration {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_capacity(name: &str, capacity: Capacity) -> ConstructionResult<()> {
    if capacity == 0 {
        return Err(ConstructionError::NonPositiveCapacity {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_depth(name: &str, depth: usize) -> ConstructionResult<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ConstructionError::NestingTooDeep {
            name: name.to_string(),
            depth,
        });
    }
    Ok(())
}
