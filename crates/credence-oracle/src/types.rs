//! Request and response types for oracle operations

use credence_domain::{Claim, ClaimId, VerificationResult};

/// Outcome of a verification request, before it is attached to a claim
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    /// Narrative verdict
    pub summary: String,
    /// Whether the oracle judged the claim supported
    pub is_verified: bool,
    /// Title of the strongest evidence found, if any
    pub source_title: Option<String>,
    /// URL of that evidence
    pub source_url: Option<String>,
}

impl From<VerificationOutcome> for VerificationResult {
    fn from(outcome: VerificationOutcome) -> Self {
        VerificationResult {
            is_verified: outcome.is_verified,
            source_url: outcome.source_url,
            source_title: outcome.source_title,
            summary: outcome.summary,
        }
    }
}

/// Minimal claim projection sent to the classification oracle
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRef {
    /// Claim identity, echoed back in interaction judgments
    pub id: ClaimId,
    /// Current claim statement
    pub text: String,
}

impl From<&Claim> for ClaimRef {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            text: claim.text.clone(),
        }
    }
}
