//! Role graph error types.

use std::path::PathBuf;

use ag_common::{CapabilityId, RoleName};

/// A single problem found while validating role definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigProblem {
    #[error("Role {0} is defined more than once")]
    DuplicateRole(RoleName),

    #[error("Capability {0} is defined more than once")]
    DuplicateCapability(CapabilityId),

    #[error("Role {role} inherits from undefined role {parent}")]
    UnknownParent { role: RoleName, parent: RoleName },

    #[error("Role {role} grants undefined capability {capability}")]
    UnknownCapability {
        role: RoleName,
        capability: CapabilityId,
    },

    #[error("Role {role} allows undefined inviter role {inviter}")]
    UnknownInviter { role: RoleName, inviter: RoleName },

    /// Inheritance cycle; the path starts and ends on the same role.
    #[error("Inheritance cycle: {}", join_path(.path))]
    Cycle { path: Vec<RoleName> },
}

/// Role definitions failed validation.
///
/// Carries every problem detected in one pass so they can all be fixed together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid role configuration ({} problem(s)): {}",
    .problems.len(),
    join_problems(.problems)
)]
pub struct ConfigurationError {
    pub problems: Vec<ConfigProblem>,
}

impl ConfigurationError {
    /// Cycles reported by this error.
    pub fn cycles(&self) -> impl Iterator<Item = &[RoleName]> {
        self.problems.iter().filter_map(|p| match p {
            ConfigProblem::Cycle { path } => Some(path.as_slice()),
            _ => None,
        })
    }
}

/// A query named something absent from the loaded graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("Role not found: {0}")]
    Role(String),

    #[error("Capability not found: {0}")]
    Capability(String),
}

/// Reading a definitions document failed before validation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read role definitions from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed role definitions: {0}")]
    Parse(#[from] serde_json::Error),
}

fn join_path(path: &[RoleName]) -> String {
    path.iter()
        .map(RoleName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn join_problems(problems: &[ConfigProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
