//! Built-in role catalog.
//!
//! The platform's default roles, embedded so deployments work without a
//! definitions file. Override with `ROLE_DEFINITIONS_PATH`.

use super::definitions::RoleCatalog;
use super::error::CatalogError;

/// JSON source of the built-in catalog.
pub const DEFAULT_CATALOG: &str = include_str!("default_roles.json");

/// Parse the built-in catalog.
pub fn builtin() -> Result<RoleCatalog, CatalogError> {
    RoleCatalog::from_json(DEFAULT_CATALOG)
}
