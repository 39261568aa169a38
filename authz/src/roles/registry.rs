//! Process-wide holder for the active role graph.
//!
//! Readers take an `Arc` snapshot and query it without holding any lock.
//! A reload validates the new definitions first and then swaps the single
//! `Arc`, so a reader sees either the old graph or the new one in full.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use super::definitions::RoleCatalog;
use super::error::ConfigurationError;
use super::store::{LoadOptions, RoleGraph};

/// Shared, reloadable role graph.
#[derive(Debug)]
pub struct RoleRegistry {
    current: RwLock<Arc<RoleGraph>>,
}

impl RoleRegistry {
    pub fn new(graph: RoleGraph) -> Self {
        Self {
            current: RwLock::new(Arc::new(graph)),
        }
    }

    /// Validate definitions and create a registry around them.
    pub fn load(catalog: RoleCatalog, options: LoadOptions) -> Result<Self, ConfigurationError> {
        RoleGraph::load_with(catalog, options).map(Self::new)
    }

    /// The graph currently in effect.
    pub fn snapshot(&self) -> Arc<RoleGraph> {
        // The guarded value is a single Arc, so it can't be left half-written.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the active graph.
    ///
    /// On validation failure the current graph stays in effect.
    #[tracing::instrument(skip(self, catalog))]
    pub fn reload(
        &self,
        catalog: RoleCatalog,
        options: LoadOptions,
    ) -> Result<(), ConfigurationError> {
        let graph = match RoleGraph::load_with(catalog, options) {
            Ok(graph) => Arc::new(graph),
            Err(e) => {
                warn!(
                    problems = e.problems.len(),
                    "Role definitions rejected, keeping current graph"
                );
                return Err(e);
            }
        };

        let roles = graph.role_count();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = graph;
        info!(roles, "Role graph reloaded");

        Ok(())
    }
}
