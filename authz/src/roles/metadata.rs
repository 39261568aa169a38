//! Per-role metadata queries.
//!
//! Metadata is read from the queried role only. A parent declaring
//! `requires_verification` says nothing about its children.

use std::collections::BTreeSet;

use ag_common::{CoreClass, RoleName};

use super::definitions::RoleMetadata;
use super::error::NotFoundError;
use super::store::RoleGraph;

impl RoleGraph {
    fn metadata_of(&self, role: &str) -> Result<Option<&RoleMetadata>, NotFoundError> {
        Ok(self.get_role(role)?.metadata.as_ref())
    }

    /// Whether accounts holding `role` must be verified. Defaults to `false`.
    pub fn requires_verification(&self, role: &str) -> Result<bool, NotFoundError> {
        Ok(self
            .metadata_of(role)?
            .is_some_and(|m| m.requires_verification))
    }

    /// Whether `role` can only be obtained through an invitation. Defaults to `false`.
    pub fn requires_invite(&self, role: &str) -> Result<bool, NotFoundError> {
        Ok(self.metadata_of(role)?.is_some_and(|m| m.requires_invite))
    }

    /// Roles allowed to invite someone into `role`. Empty when unset.
    pub fn allowed_inviters(&self, role: &str) -> Result<BTreeSet<RoleName>, NotFoundError> {
        Ok(self
            .metadata_of(role)?
            .map(|m| m.allowed_inviters.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Registration fields checked when verifying `role`. Empty when unset.
    pub fn verification_fields(&self, role: &str) -> Result<&[String], NotFoundError> {
        Ok(self
            .metadata_of(role)?
            .map(|m| m.verification_fields.as_slice())
            .unwrap_or_default())
    }

    /// Whether a holder of `inviter` may invite someone into `invitee`.
    pub fn can_invite(&self, inviter: &str, invitee: &str) -> Result<bool, NotFoundError> {
        let inviter = &self.get_role(inviter)?.name;
        Ok(self
            .metadata_of(invitee)?
            .is_some_and(|m| m.allowed_inviters.contains(inviter)))
    }

    /// Trust tier `role` maps to.
    pub fn core_class(&self, role: &str) -> Result<CoreClass, NotFoundError> {
        Ok(self.get_role(role)?.core)
    }
}
