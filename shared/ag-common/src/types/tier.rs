//! Core Trust Tiers

use serde::{Deserialize, Serialize};

/// Coarse trust tier a business role maps to.
///
/// Serialized with the hosted backend's technical role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreClass {
    /// Unauthenticated visitor.
    #[serde(rename = "anon", alias = "anonymous")]
    Anonymous,
    /// Signed-in user.
    #[serde(rename = "authenticated")]
    Authenticated,
    /// Backend service with elevated access.
    #[serde(rename = "service_role", alias = "service")]
    Service,
}

impl CoreClass {
    /// Technical role name as used by the hosted backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anon",
            Self::Authenticated => "authenticated",
            Self::Service => "service_role",
        }
    }

    /// Whether this tier implies a signed-in identity.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}

impl std::fmt::Display for CoreClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
