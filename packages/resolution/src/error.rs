//! Typed errors for the resolution library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep
//! infrastructure failures distinguishable from "no data found",
//! which is an ordinary outcome in this crate.

use thiserror::Error;

/// Errors that can occur during entity resolution.
///
/// Note that unresolvable or ambiguous references are *not* errors —
/// they are first-class [`Resolution`](crate::Resolution) outcomes.
/// Only infrastructure failures surface here.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Backing store unreachable or query failed
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Alias table maps one alias to two canonical names
    #[error("duplicate alias '{alias}': maps to both '{existing}' and '{canonical}'")]
    DuplicateAlias {
        alias: String,
        existing: String,
        canonical: String,
    },
}

impl ResolutionError {
    /// Wrap an arbitrary backend error as a store failure.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolutionError>;
