//! Verification results attached to claims

/// Outcome of a fact-verification pass over a single claim
///
/// Created only by the verification step. Once attached to a claim it may be
/// replaced wholesale by a later re-verification but is never partially
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    /// Whether the verification judged the claim supported
    pub is_verified: bool,
    /// URL of the strongest piece of external evidence, when one was found
    pub source_url: Option<String>,
    /// Title of that evidence
    pub source_title: Option<String>,
    /// Narrative verdict
    pub summary: String,
}
