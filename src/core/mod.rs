/*!
 * Core Module
 * Fundamental kernel types, limits and error handling
 */

pub mod errors;
pub mod limits;
pub mod types;
pub(crate) mod validation;

// Re-export for convenience
pub use errors::*;
pub use types::*;
