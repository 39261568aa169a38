//! Shared Types

pub mod ids;
pub mod tier;

pub use self::ids::{CapabilityId, RoleName};
pub use self::tier::CoreClass;
