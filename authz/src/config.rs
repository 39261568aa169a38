//! Authorization Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env::{self, VarError};
use std::path::PathBuf;

use crate::roles::{catalog, CatalogError, LoadOptions, RoleCatalog};

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON role definitions file (default: built-in catalog)
    pub definitions_path: Option<PathBuf>,

    /// Reject `allowed_inviters` entries naming undefined roles (default: true)
    pub validate_inviters: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `ROLE_DEFINITIONS_PATH`: path to a JSON role catalog
    /// - `ROLE_VALIDATE_INVITERS`: `true` or `false`
    pub fn from_env() -> Result<Self> {
        let validate_inviters = match env::var("ROLE_VALIDATE_INVITERS") {
            Ok(value) => value.trim().parse().with_context(|| {
                format!("ROLE_VALIDATE_INVITERS must be true or false, got {value:?}")
            })?,
            Err(VarError::NotPresent) => true,
            Err(e) => return Err(e).context("ROLE_VALIDATE_INVITERS is not valid unicode"),
        };

        Ok(Self {
            definitions_path: env::var_os("ROLE_DEFINITIONS_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            validate_inviters,
        })
    }

    /// Validation options for loading the role graph.
    #[must_use]
    pub const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            validate_inviters: self.validate_inviters,
        }
    }

    /// Read the configured catalog, falling back to the built-in one.
    pub fn load_catalog(&self) -> Result<RoleCatalog, CatalogError> {
        match &self.definitions_path {
            Some(path) => RoleCatalog::from_path(path),
            None => catalog::builtin(),
        }
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub const fn default_for_test() -> Self {
        Self {
            definitions_path: None,
            validate_inviters: true,
        }
    }
}
