//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Infrastructure implementations live in other crates.

/// Trait for raw language-model text generation
///
/// Implemented by the infrastructure layer (credence-oracle). The typed
/// oracle operations (extraction, verification, classification, synthesis)
/// are built on top of this seam.
pub trait LanguageModel {
    /// Error type for generation operations
    type Error;

    /// Generate a text completion for the given prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}
