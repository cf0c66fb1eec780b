//! Error types for the engine

use credence_domain::ClaimId;
use thiserror::Error;

/// Errors that can occur during engine operations
///
/// Oracle failures never surface here; they degrade to the documented
/// per-call fallbacks. What remains is caller error and infrastructure
/// breakage.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Ingested text exceeds the configured maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// The referenced claim is not in the store
    #[error("Unknown claim: {0}")]
    UnknownClaim(ClaimId),

    /// Claim store error
    #[error("Store error: {0}")]
    Store(String),

    /// The store mutex was poisoned by a panicking holder
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
