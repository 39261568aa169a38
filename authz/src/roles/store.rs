//! Role graph store.
//!
//! Holds the validated, immutable mapping from role name to role and from
//! capability id to capability. Roles are kept in an arena and parents are
//! resolved to arena indices once, at load time.

use std::collections::{BTreeSet, HashMap};

use ag_common::{CapabilityId, CoreClass, RoleName};
use tracing::{info, warn};

use super::definitions::{CapabilityDefinition, RoleCatalog, RoleDefinition, RoleMetadata};
use super::error::{ConfigProblem, ConfigurationError, NotFoundError};

/// Options controlling load-time validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Require every `allowed_inviters` entry to name a defined role.
    pub validate_inviters: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            validate_inviters: true,
        }
    }
}

/// A loaded role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: RoleName,
    pub core: CoreClass,
    pub display_name: String,
    pub description: String,
    /// Parent roles in declaration order, without repeats.
    pub parents: Vec<RoleName>,
    pub direct_capabilities: BTreeSet<CapabilityId>,
    pub metadata: Option<RoleMetadata>,
}

impl From<RoleDefinition> for Role {
    fn from(def: RoleDefinition) -> Self {
        let mut parents: Vec<RoleName> = Vec::with_capacity(def.parents.len());
        for parent in def.parents {
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }

        Self {
            name: def.name,
            core: def.core,
            display_name: def.display_name,
            description: def.description,
            parents,
            direct_capabilities: def.capabilities.into_iter().collect(),
            metadata: def.metadata,
        }
    }
}

/// A loaded capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub id: CapabilityId,
    pub description: String,
}

impl From<CapabilityDefinition> for Capability {
    fn from(def: CapabilityDefinition) -> Self {
        Self {
            id: def.id,
            description: def.description,
        }
    }
}

/// Validated, immutable role graph.
#[derive(Debug, Clone)]
pub struct RoleGraph {
    roles: Vec<Role>,
    role_index: HashMap<RoleName, usize>,
    /// `parent_ids[i]` holds the arena indices of `roles[i].parents`.
    parent_ids: Vec<Vec<usize>>,
    capabilities: Vec<Capability>,
    capability_index: HashMap<CapabilityId, usize>,
}

impl RoleGraph {
    /// Build a graph from definitions using default [`LoadOptions`].
    pub fn load(catalog: RoleCatalog) -> Result<Self, ConfigurationError> {
        Self::load_with(catalog, LoadOptions::default())
    }

    /// Build a graph from definitions.
    ///
    /// Every problem found is collected and returned together:
    /// duplicate definitions, unresolved parent, capability and (optionally)
    /// inviter references, and inheritance cycles.
    #[tracing::instrument(
        skip(catalog),
        fields(roles = catalog.roles.len(), capabilities = catalog.capabilities.len())
    )]
    pub fn load_with(
        catalog: RoleCatalog,
        options: LoadOptions,
    ) -> Result<Self, ConfigurationError> {
        let mut problems = Vec::new();

        let mut capabilities = Vec::with_capacity(catalog.capabilities.len());
        let mut capability_index = HashMap::with_capacity(catalog.capabilities.len());
        for def in catalog.capabilities {
            if capability_index.contains_key(&def.id) {
                problems.push(ConfigProblem::DuplicateCapability(def.id));
                continue;
            }
            capability_index.insert(def.id.clone(), capabilities.len());
            capabilities.push(Capability::from(def));
        }

        let mut roles: Vec<Role> = Vec::with_capacity(catalog.roles.len());
        let mut role_index = HashMap::with_capacity(catalog.roles.len());
        for def in catalog.roles {
            if role_index.contains_key(&def.name) {
                problems.push(ConfigProblem::DuplicateRole(def.name));
                continue;
            }
            role_index.insert(def.name.clone(), roles.len());
            roles.push(Role::from(def));
        }

        let mut parent_ids = Vec::with_capacity(roles.len());
        for role in &roles {
            let mut ids = Vec::with_capacity(role.parents.len());
            for parent in &role.parents {
                match role_index.get(parent) {
                    Some(&id) => ids.push(id),
                    None => problems.push(ConfigProblem::UnknownParent {
                        role: role.name.clone(),
                        parent: parent.clone(),
                    }),
                }
            }
            parent_ids.push(ids);

            for capability in &role.direct_capabilities {
                if !capability_index.contains_key(capability) {
                    problems.push(ConfigProblem::UnknownCapability {
                        role: role.name.clone(),
                        capability: capability.clone(),
                    });
                }
            }

            if options.validate_inviters {
                let inviters = role.metadata.iter().flat_map(|m| &m.allowed_inviters);
                for inviter in inviters {
                    if !role_index.contains_key(inviter) {
                        problems.push(ConfigProblem::UnknownInviter {
                            role: role.name.clone(),
                            inviter: inviter.clone(),
                        });
                    }
                }
            }
        }

        problems.extend(find_cycles(&roles, &parent_ids));

        if !problems.is_empty() {
            for problem in &problems {
                warn!(problem = %problem, "Invalid role definition");
            }
            return Err(ConfigurationError { problems });
        }

        info!(
            roles = roles.len(),
            capabilities = capabilities.len(),
            "Role graph loaded"
        );

        Ok(Self {
            roles,
            role_index,
            parent_ids,
            capabilities,
            capability_index,
        })
    }

    /// Look up a role by name.
    pub fn get_role(&self, name: &str) -> Result<&Role, NotFoundError> {
        self.index_of(name).map(|id| &self.roles[id])
    }

    /// Look up a capability by id.
    pub fn get_capability(&self, id: &str) -> Result<&Capability, NotFoundError> {
        self.capability_index
            .get(id)
            .map(|&idx| &self.capabilities[idx])
            .ok_or_else(|| NotFoundError::Capability(id.to_string()))
    }

    /// Roles in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// Capabilities in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }

    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn capability_count(&self) -> usize {
        self.capabilities.len()
    }

    pub(crate) fn index_of(&self, name: &str) -> Result<usize, NotFoundError> {
        self.role_index
            .get(name)
            .copied()
            .ok_or_else(|| NotFoundError::Role(name.to_string()))
    }

    pub(crate) fn role_at(&self, id: usize) -> &Role {
        &self.roles[id]
    }

    pub(crate) fn parents_of(&self, id: usize) -> &[usize] {
        &self.parent_ids[id]
    }

    pub(crate) fn is_capability_defined(&self, id: &str) -> bool {
        self.capability_index.contains_key(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the DFS stack at this depth.
    OnStack(usize),
    Done,
}

/// Depth-first search over `parents` with an on-stack marker.
///
/// Reaching a role that is still on the stack closes a cycle; the reported path
/// runs from that role's stack depth down the stack and back to it.
fn find_cycles(roles: &[Role], parent_ids: &[Vec<usize>]) -> Vec<ConfigProblem> {
    let mut marks = vec![Mark::Unvisited; roles.len()];
    let mut cycles = Vec::new();

    for root in 0..roles.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        // (role, position of the next parent to explore)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::OnStack(0);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(&parent) = parent_ids[node].get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[parent] {
                Mark::Unvisited => {
                    marks[parent] = Mark::OnStack(stack.len());
                    stack.push((parent, 0));
                }
                Mark::OnStack(start) => {
                    let mut path: Vec<RoleName> = stack[start..]
                        .iter()
                        .map(|&(id, _)| roles[id].name.clone())
                        .collect();
                    path.push(roles[parent].name.clone());
                    cycles.push(ConfigProblem::Cycle { path });
                }
                Mark::Done => {}
            }
        }
    }

    cycles
}
