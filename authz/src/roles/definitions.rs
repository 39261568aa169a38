//! Declarative role and capability definitions.
//!
//! This is the document shape consumed by [`RoleGraph::load`](super::RoleGraph::load).
//! It is plain data: nothing here is validated beyond identifier syntax and
//! field names. Unknown keys are rejected so a misspelled `parents` can't
//! silently drop inherited capabilities.

use std::path::Path;

use ag_common::{CapabilityId, CoreClass, RoleName};
use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Complete set of role and capability definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleCatalog {
    #[serde(default)]
    pub capabilities: Vec<CapabilityDefinition>,
    #[serde(default)]
    pub roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    /// Parse a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn with_capability(mut self, capability: CapabilityDefinition) -> Self {
        self.capabilities.push(capability);
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: RoleDefinition) -> Self {
        self.roles.push(role);
        self
    }
}

/// A capability definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityDefinition {
    pub id: CapabilityId,
    #[serde(default)]
    pub description: String,
}

impl CapabilityDefinition {
    pub fn new(id: CapabilityId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

/// A role definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleDefinition {
    pub name: RoleName,
    pub core: CoreClass,
    #[serde(default, alias = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Roles this role inherits capabilities from, in declaration order.
    #[serde(default, alias = "inherits")]
    pub parents: Vec<RoleName>,
    /// Capabilities granted directly. Duplicates collapse on load.
    #[serde(default)]
    pub capabilities: Vec<CapabilityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RoleMetadata>,
}

impl RoleDefinition {
    pub fn new(name: RoleName, core: CoreClass) -> Self {
        Self {
            display_name: name.to_string(),
            name,
            core,
            description: String::new(),
            parents: Vec::new(),
            capabilities: Vec::new(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn described(
        mut self,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.display_name = display_name.into();
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn inherits(mut self, parents: impl IntoIterator<Item = RoleName>) -> Self {
        self.parents.extend(parents);
        self
    }

    #[must_use]
    pub fn grants(mut self, capabilities: impl IntoIterator<Item = CapabilityId>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: RoleMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Per-role onboarding metadata. Never inherited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleMetadata {
    #[serde(default, alias = "requiresVerification")]
    pub requires_verification: bool,
    /// Business registration fields checked during verification (e.g. `abn`).
    #[serde(
        default,
        alias = "verificationFields",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub verification_fields: Vec<String>,
    #[serde(default, alias = "requiresInvite")]
    pub requires_invite: bool,
    #[serde(
        default,
        alias = "invited_by",
        alias = "invitedBy",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub allowed_inviters: Vec<RoleName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_applies_defaults() {
        let catalog = RoleCatalog::from_json(
            r#"{
                "capabilities": [{ "id": "REGISTER" }],
                "roles": [{ "name": "GUEST", "core": "anon", "capabilities": ["REGISTER"] }]
            }"#,
        )
        .unwrap();

        let guest = &catalog.roles[0];
        assert_eq!(guest.core, CoreClass::Anonymous);
        assert!(guest.parents.is_empty());
        assert!(guest.metadata.is_none());
        assert_eq!(catalog.capabilities[0].description, "");
    }

    #[test]
    fn test_invited_by_alias() {
        let metadata: RoleMetadata = serde_json::from_str(
            r#"{ "requires_invite": true, "invited_by": ["COMPANY", "ADMIN"] }"#,
        )
        .unwrap();

        assert!(metadata.requires_invite);
        assert!(!metadata.requires_verification);
        assert_eq!(metadata.allowed_inviters.len(), 2);
        assert_eq!(metadata.allowed_inviters[0].as_str(), "COMPANY");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let misspelled = RoleCatalog::from_json(
            r#"{ "roles": [{ "name": "X", "core": "anon", "parnets": ["Y"] }] }"#,
        );
        assert!(matches!(misspelled, Err(CatalogError::Parse(_))));

        let metadata = serde_json::from_str::<RoleMetadata>(r#"{ "requires_invitation": true }"#);
        assert!(metadata.is_err());

        let capability = RoleCatalog::from_json(
            r#"{ "capabilities": [{ "id": "REGISTER", "label": "Register" }] }"#,
        );
        assert!(matches!(capability, Err(CatalogError::Parse(_))));

        let top_level = RoleCatalog::from_json(r#"{ "role": [] }"#);
        assert!(matches!(top_level, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_inherits_is_parents() {
        let catalog = RoleCatalog::from_json(
            r#"{ "roles": [{ "name": "X", "core": "anon", "inherits": ["Y"] }] }"#,
        )
        .unwrap();

        assert_eq!(catalog.roles[0].parents, vec![RoleName::parse("Y").unwrap()]);
    }

    #[test]
    fn test_camel_case_metadata_keys() {
        let definition: RoleDefinition = serde_json::from_str(
            r#"{
                "name": "TEAM_MEMBER",
                "core": "authenticated",
                "displayName": "Team Member",
                "inherits": ["AUTHORIZED_USER"],
                "metadata": {
                    "requiresVerification": true,
                    "verificationFields": ["abn"],
                    "requiresInvite": true,
                    "invitedBy": ["NOBODY"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(definition.display_name, "Team Member");
        assert_eq!(definition.parents.len(), 1);

        let metadata = definition.metadata.unwrap();
        assert!(metadata.requires_verification);
        assert_eq!(metadata.verification_fields, vec!["abn".to_string()]);
        assert!(metadata.requires_invite);
        assert_eq!(metadata.allowed_inviters[0].as_str(), "NOBODY");
    }

    #[test]
    fn test_malformed_identifier_is_parse_error() {
        let result =
            RoleCatalog::from_json(r#"{ "roles": [{ "name": "guest", "core": "anon" }] }"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = RoleCatalog::from_path(Path::new("/nonexistent/roles.json"));
        match result {
            Err(CatalogError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/roles.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_collects_fields() {
        let admin = RoleName::parse("ADMIN").unwrap();
        let team_member = RoleName::parse("TEAM_MEMBER").unwrap();
        let def = RoleDefinition::new(team_member, CoreClass::Authenticated)
            .described("Team Member", "Company team member")
            .inherits([RoleName::parse("AUTHORIZED_USER").unwrap()])
            .grants([CapabilityId::parse("USE_COMPANY_WORKFLOWS").unwrap()])
            .with_metadata(RoleMetadata {
                requires_invite: true,
                allowed_inviters: vec![admin.clone()],
                ..RoleMetadata::default()
            });

        assert_eq!(def.display_name, "Team Member");
        assert_eq!(def.parents.len(), 1);
        assert_eq!(def.capabilities.len(), 1);
        assert_eq!(def.metadata.unwrap().allowed_inviters, vec![admin]);
    }
}
