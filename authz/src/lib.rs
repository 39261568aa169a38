//! Agent Platform Authorization
//!
//! Role graph store and capability resolver for the agent lead-generation
//! platform. Roles inherit capabilities from parent roles; the graph is
//! validated once at load time and read without locks afterwards.

pub mod config;
pub mod report;
pub mod roles;

pub use roles::{ConfigurationError, NotFoundError, RoleGraph, RoleRegistry};
