//! Role and Capability Identifiers
//!
//! Both identifiers are `SCREAMING_SNAKE_CASE` strings validated on construction,
//! so a malformed reference is rejected when definitions are parsed instead of
//! surfacing as a silent lookup miss later.

use std::borrow::Borrow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{Error, Result};

static VALID_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("valid regex"));

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(SmolStr);

        impl $name {
            /// Validate and wrap an identifier.
            pub fn parse(value: &str) -> Result<Self> {
                if VALID_IDENTIFIER.is_match(value) {
                    Ok(Self(SmolStr::new(value)))
                } else {
                    Err(Error::InvalidIdentifier {
                        kind: $kind,
                        value: value.to_string(),
                    })
                }
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        // Lookups by plain `&str` keys; SmolStr hashes and orders like `str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

identifier!(
    /// Unique name of a business role (e.g. `AGENCY_MEMBER`).
    RoleName,
    "role"
);

identifier!(
    /// Unique identifier of an atomic capability (e.g. `MANAGE_USERS`).
    CapabilityId,
    "capability"
);
