//! Common error type.

/// Errors raised while constructing shared types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Identifier does not match `SCREAMING_SNAKE_CASE`.
    #[error("Invalid {kind} identifier {value:?}: expected SCREAMING_SNAKE_CASE")]
    InvalidIdentifier { kind: &'static str, value: String },
}

/// Result alias using the common [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
