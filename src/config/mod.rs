/*!
 * Configuration
 * Declarative process specs loaded from JSON
 */

mod spec;

pub use spec::{ExecutableSpec, ProcessSpec, ResourceSpec, UnitSpec};

use crate::core::errors::ConstructionError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors loading or building a process spec
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read process spec {path}: {source}")]
    #[diagnostic(
        code(config::io),
        help("Check that the spec file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid process spec: {0}")]
    #[diagnostic(
        code(config::parse),
        help("The spec must be a JSON process object; see ProcessSpec for the schema.")
    )]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Construction(#[from] ConstructionError),
}
