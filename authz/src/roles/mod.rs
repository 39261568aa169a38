//! Role graph and capability resolution.
//!
//! - Store: validated, immutable roles and capabilities
//! - Resolver: capability closure over the inheritance graph
//! - Metadata: per-role onboarding flags, never inherited
//! - Registry: atomically reloadable shared graph

pub mod catalog;
pub mod definitions;
pub mod error;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod store;

pub use definitions::{CapabilityDefinition, RoleCatalog, RoleDefinition, RoleMetadata};
pub use error::{CatalogError, ConfigProblem, ConfigurationError, NotFoundError};
pub use registry::RoleRegistry;
pub use store::{Capability, LoadOptions, Role, RoleGraph};
