#![forbid(unsafe_code)]

//! Unified error type.
//!
//! The tracking path itself never fails: missing viewports, filtered
//! candidates and unknown labels all degrade silently. Errors only arise
//! when building a threshold table or loading configuration.

use std::fmt;

use dims_core::TableError;
#[cfg(feature = "config")]
use dims_runtime::ConfigError;

/// Top-level error type for dims.
#[derive(Debug)]
pub enum Error {
    /// A threshold table violated its invariants.
    Table(TableError),
    /// Configuration could not be loaded or validated.
    #[cfg(feature = "config")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(err) => write!(f, "{err}"),
            #[cfg(feature = "config")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<TableError> for Error {
    fn from(err: TableError) -> Self {
        Self::Table(err)
    }
}

#[cfg(feature = "config")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for dims APIs.
pub type Result<T> = std::result::Result<T, Error>;
