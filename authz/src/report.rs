//! Resolved view of every role, as printed by the checker binary.

use std::collections::BTreeSet;

use ag_common::{CapabilityId, CoreClass, RoleName};
use serde::Serialize;

use crate::roles::{NotFoundError, RoleGraph};

/// One role with its inheritance and capability closure expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleReport {
    pub name: RoleName,
    pub display_name: String,
    pub core: CoreClass,
    /// Whether the core tier implies a signed-in identity.
    pub authenticated: bool,
    pub parents: Vec<RoleName>,
    pub ancestors: Vec<RoleName>,
    pub capabilities: BTreeSet<CapabilityId>,
    pub requires_verification: bool,
    pub verification_fields: Vec<String>,
    pub requires_invite: bool,
    pub allowed_inviters: BTreeSet<RoleName>,
}

/// Build a report for every role in declaration order.
pub fn build(graph: &RoleGraph) -> Result<Vec<RoleReport>, NotFoundError> {
    graph
        .roles()
        .map(|role| {
            let name = role.name.as_str();
            Ok(RoleReport {
                name: role.name.clone(),
                display_name: role.display_name.clone(),
                core: role.core,
                authenticated: role.core.is_authenticated(),
                parents: role.parents.clone(),
                ancestors: graph.ancestors(name)?,
                capabilities: graph.resolve_all(name)?,
                requires_verification: graph.requires_verification(name)?,
                verification_fields: graph.verification_fields(name)?.to_vec(),
                requires_invite: graph.requires_invite(name)?,
                allowed_inviters: graph.allowed_inviters(name)?,
            })
        })
        .collect()
}
