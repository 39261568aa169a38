//! Capability resolution.
//!
//! Computes capability reachability over the inheritance graph.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use ag_common::{CapabilityId, RoleName};

use super::error::NotFoundError;
use super::store::{Role, RoleGraph};

impl RoleGraph {
    /// All capabilities of `role`: its direct grants plus those of every role
    /// reachable through `parents`.
    pub fn resolve_all(&self, role: &str) -> Result<BTreeSet<CapabilityId>, NotFoundError> {
        let start = self.index_of(role)?;
        let mut resolved = BTreeSet::new();

        self.walk(start, |r| {
            resolved.extend(r.direct_capabilities.iter().cloned());
            ControlFlow::<()>::Continue(())
        });

        Ok(resolved)
    }

    /// Whether `role` holds `capability`, directly or by inheritance.
    ///
    /// An undefined capability is never held. Stops at the first role granting it.
    pub fn has_capability(&self, role: &str, capability: &str) -> Result<bool, NotFoundError> {
        let start = self.index_of(role)?;
        if !self.is_capability_defined(capability) {
            return Ok(false);
        }

        let found = self.walk(start, |r| {
            if r.direct_capabilities.contains(capability) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        Ok(found.is_some())
    }

    /// Every role `role` inherits from, directly or transitively, in
    /// depth-first order. The role itself is not included.
    pub fn ancestors(&self, role: &str) -> Result<Vec<RoleName>, NotFoundError> {
        let start = self.index_of(role)?;
        let mut ancestors = Vec::new();

        self.walk(start, |r| {
            if r.name.as_str() != role {
                ancestors.push(r.name.clone());
            }
            ControlFlow::<()>::Continue(())
        });

        Ok(ancestors)
    }

    /// Depth-first walk from `start` visiting each reachable role exactly once.
    ///
    /// Returns the break value if `visit` stopped the walk early.
    fn walk<B>(&self, start: usize, mut visit: impl FnMut(&Role) -> ControlFlow<B>) -> Option<B> {
        let mut visited = vec![false; self.role_count()];
        let mut pending = vec![start];
        visited[start] = true;

        while let Some(id) = pending.pop() {
            if let ControlFlow::Break(value) = visit(self.role_at(id)) {
                return Some(value);
            }

            // Reverse so parents are visited in declaration order.
            for &parent in self.parents_of(id).iter().rev() {
                if !visited[parent] {
                    visited[parent] = true;
                    pending.push(parent);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::definitions::RoleCatalog;
    use serde_json::json;

    fn graph(value: serde_json::Value) -> RoleGraph {
        RoleGraph::load(serde_json::from_value::<RoleCatalog>(value).unwrap()).unwrap()
    }

    fn caps(ids: &[&str]) -> BTreeSet<CapabilityId> {
        ids.iter().map(|id| CapabilityId::parse(id).unwrap()).collect()
    }

    fn member_chain() -> RoleGraph {
        graph(json!({
            "capabilities": [
                { "id": "ACCESS_DASHBOARD" },
                { "id": "ACCESS_COMPANY_RESOURCES" },
                { "id": "MANAGE_CLIENT_WORKFLOWS" },
                { "id": "MANAGE_USERS" },
                { "id": "VIEW_PUBLIC_CONTENT" }
            ],
            "roles": [
                { "name": "AUTHORIZED_USER", "core": "authenticated", "capabilities": ["ACCESS_DASHBOARD"] },
                {
                    "name": "TEAM_MEMBER",
                    "core": "authenticated",
                    "parents": ["AUTHORIZED_USER"],
                    "capabilities": ["ACCESS_COMPANY_RESOURCES"]
                },
                {
                    "name": "AGENCY_MEMBER",
                    "core": "authenticated",
                    "parents": ["TEAM_MEMBER"],
                    "capabilities": ["MANAGE_CLIENT_WORKFLOWS"]
                },
                { "name": "ADMIN", "core": "service_role", "capabilities": ["MANAGE_USERS"] },
                { "name": "GUEST", "core": "anon", "capabilities": ["VIEW_PUBLIC_CONTENT"] }
            ]
        }))
    }

    #[test]
    fn test_resolve_role_without_parents() {
        let graph = graph(json!({
            "capabilities": [{ "id": "MANAGE_USERS" }, { "id": "VIEW_ANALYTICS" }],
            "roles": [{ "name": "ADMIN", "core": "service_role", "capabilities": ["MANAGE_USERS", "VIEW_ANALYTICS"] }]
        }));

        assert_eq!(
            graph.resolve_all("ADMIN").unwrap(),
            caps(&["MANAGE_USERS", "VIEW_ANALYTICS"])
        );
    }

    #[test]
    fn test_resolve_transitive_chain() {
        let graph = member_chain();

        assert_eq!(
            graph.resolve_all("AGENCY_MEMBER").unwrap(),
            caps(&[
                "ACCESS_DASHBOARD",
                "ACCESS_COMPANY_RESOURCES",
                "MANAGE_CLIENT_WORKFLOWS"
            ])
        );
    }

    #[test]
    fn test_has_capability_without_path() {
        let graph = member_chain();

        assert!(!graph.has_capability("GUEST", "MANAGE_USERS").unwrap());
        assert!(graph.has_capability("ADMIN", "MANAGE_USERS").unwrap());
    }

    #[test]
    fn test_has_capability_inherited() {
        let graph = member_chain();

        assert!(graph.has_capability("AGENCY_MEMBER", "ACCESS_DASHBOARD").unwrap());
        assert!(!graph.has_capability("AUTHORIZED_USER", "MANAGE_CLIENT_WORKFLOWS").unwrap());
    }

    #[test]
    fn test_undefined_capability_is_false() {
        let graph = member_chain();

        assert!(!graph.has_capability("ADMIN", "LAUNCH_ROCKETS").unwrap());
        assert!(!graph.has_capability("ADMIN", "not even valid").unwrap());
    }

    #[test]
    fn test_unknown_role_not_found() {
        let graph = member_chain();

        assert_eq!(
            graph.resolve_all("NOBODY").unwrap_err(),
            NotFoundError::Role("NOBODY".into())
        );
        assert_eq!(
            graph.has_capability("NOBODY", "MANAGE_USERS").unwrap_err(),
            NotFoundError::Role("NOBODY".into())
        );
        // Unknown role wins over unknown capability.
        assert!(graph.has_capability("NOBODY", "LAUNCH_ROCKETS").is_err());
    }

    #[test]
    fn test_diamond_shared_ancestor() {
        let graph = graph(json!({
            "capabilities": [{ "id": "BASE_CAP" }, { "id": "LEFT_CAP" }, { "id": "RIGHT_CAP" }],
            "roles": [
                { "name": "BASE", "core": "authenticated", "capabilities": ["BASE_CAP"] },
                { "name": "LEFT", "core": "authenticated", "parents": ["BASE"], "capabilities": ["LEFT_CAP"] },
                { "name": "RIGHT", "core": "authenticated", "parents": ["BASE"], "capabilities": ["RIGHT_CAP"] },
                { "name": "TOP", "core": "authenticated", "parents": ["LEFT", "RIGHT"] }
            ]
        }));

        assert_eq!(
            graph.resolve_all("TOP").unwrap(),
            caps(&["BASE_CAP", "LEFT_CAP", "RIGHT_CAP"])
        );

        let ancestors = graph.ancestors("TOP").unwrap();
        let names: Vec<_> = ancestors.iter().map(RoleName::as_str).collect();
        assert_eq!(names, vec!["LEFT", "BASE", "RIGHT"]);
    }

    #[test]
    fn test_ancestors_of_root_is_empty() {
        let graph = member_chain();
        assert!(graph.ancestors("ADMIN").unwrap().is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let graph = member_chain();
        let first = graph.resolve_all("AGENCY_MEMBER").unwrap();
        let second = graph.resolve_all("AGENCY_MEMBER").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_has_capability_matches_resolve_all() {
        let graph = member_chain();
        let probes = graph
            .capabilities()
            .map(|c| c.id.to_string())
            .chain(["UNDEFINED_CAPABILITY".to_string()])
            .collect::<Vec<_>>();

        for role in graph.roles() {
            let resolved = graph.resolve_all(role.name.as_str()).unwrap();
            for probe in &probes {
                assert_eq!(
                    graph.has_capability(role.name.as_str(), probe).unwrap(),
                    resolved.contains(probe.as_str()),
                    "{} / {}",
                    role.name,
                    probe
                );
            }
        }
    }
}
