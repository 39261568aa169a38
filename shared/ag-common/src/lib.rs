//! Agent Platform Common Library
//!
//! Identifier and trust-tier types shared by the authorization crates.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
