//! Claim module - the fundamental unit of Credence's corpus

use crate::score::{self, CredibilityLevel};
use crate::source::SourceId;
use std::fmt;

/// Unique identifier for a claim based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness, collision-safe even for claims minted in the same
///   millisecond of a single extraction burst
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    ///
    /// This is primarily for tests and deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from a UUIDv7 string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Lifecycle status of a claim
///
/// Transitions: `Pending` -(extraction)-> `Analyzing` or `Flagged`
/// -(verification)-> `Verified` or `Flagged` -(contradiction)-> `Flagged`.
/// `Flagged` is not terminal: a later verification or reinforcement can move
/// a claim back to `Verified`. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    /// Not yet scored by extraction
    Pending,
    /// Scored, awaiting verification
    Analyzing,
    /// Verification completed with a supporting or inconclusive outcome
    Verified,
    /// Low credibility, refuted, or contradicted by a newer source
    Flagged,
}

impl ClaimStatus {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Analyzing => "analyzing",
            ClaimStatus::Verified => "verified",
            ClaimStatus::Flagged => "flagged",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate claim produced by the extraction oracle, shape-validated
/// before it enters the core
///
/// The raw score is a float in [0, 100] as reported by the oracle; it is
/// rounded and clamped when the claim is materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedClaim {
    /// The claim statement
    pub claim_text: String,
    /// Surrounding context from the source text
    pub context: String,
    /// The oracle's bias rationale for the initial score
    pub bias_analysis: String,
    /// Initial credibility score (0-100 float)
    pub score: f64,
}

/// A claim - an atomic factual assertion with an evolving credibility score
///
/// Claims are never destroyed once created; they are mutated by verification
/// and conflict resolution, or excluded downstream at report time.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier, never reused for the process lifetime
    pub id: ClaimId,

    /// Current claim statement
    pub text: String,

    /// The statement as originally extracted
    pub original_text: String,

    /// Source this claim was extracted from; must exist in the store at
    /// creation time
    pub source_id: SourceId,

    /// Credibility score, always in [0, 100]
    pub credibility_score: u8,

    /// Three-band classification derived from the score
    ///
    /// Always `score::level_for(credibility_score)`, with one exception: a
    /// contradiction pins the level to `Low` without recomputation.
    pub credibility_level: CredibilityLevel,

    /// Append-only narrative of scoring rationale
    ///
    /// The single exception to append-only: a contradiction replaces this
    /// text wholesale with a warning referencing the newer source.
    pub bias_analysis: String,

    /// Surrounding context from the source text
    pub context: String,

    /// Result of the most recent verification, replaced wholesale on
    /// re-verification, never partially mutated
    pub verification: Option<crate::verification::VerificationResult>,

    /// Lifecycle status
    pub status: ClaimStatus,

    /// Transient highlight flag for claims from the latest ingestion
    pub is_new: bool,
}

impl Claim {
    /// Materialize a claim from an extraction candidate
    ///
    /// Assigns a fresh id and derives score, level, and status via
    /// [`score::apply_extraction`]. The claim is marked new.
    pub fn from_extraction(source_id: SourceId, item: &ExtractedClaim) -> Self {
        let assessment = score::apply_extraction(item.score);
        Self {
            id: ClaimId::new(),
            text: item.claim_text.clone(),
            original_text: item.claim_text.clone(),
            source_id,
            credibility_score: assessment.score,
            credibility_level: assessment.level,
            bias_analysis: item.bias_analysis.clone(),
            context: item.context.clone(),
            verification: None,
            status: assessment.status,
            is_new: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(score: f64) -> ExtractedClaim {
        ExtractedClaim {
            claim_text: "Revenue grew 40% year over year".to_string(),
            context: "From the Q3 earnings section".to_string(),
            bias_analysis: "Self-reported figure from a press release".to_string(),
            score,
        }
    }

    #[test]
    fn test_claim_id_ordering() {
        let id1 = ClaimId::from_value(1000);
        let id2 = ClaimId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_claim_id_chronological() {
        // UUIDv7s generated in sequence should be chronologically ordered
        let id1 = ClaimId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(id1.timestamp() <= id2.timestamp(), "Timestamps should be ordered");
    }

    #[test]
    fn test_claim_id_display_and_parse() {
        let id = ClaimId::new();
        let id_str = id.to_string();

        // UUIDv7 strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = ClaimId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_claim_id_invalid_string() {
        assert!(ClaimId::from_string("not-a-valid-uuid").is_err());
        assert!(ClaimId::from_string("").is_err());
    }

    #[test]
    fn test_from_extraction_medium_score_is_flagged_below_sixty() {
        let claim = Claim::from_extraction(SourceId::new(), &extracted(55.0));

        assert_eq!(claim.credibility_score, 55);
        assert_eq!(claim.credibility_level, CredibilityLevel::Medium);
        assert_eq!(claim.status, ClaimStatus::Flagged);
        assert!(claim.is_new);
        assert!(claim.verification.is_none());
    }

    #[test]
    fn test_from_extraction_preserves_original_text() {
        let claim = Claim::from_extraction(SourceId::new(), &extracted(72.0));

        assert_eq!(claim.text, claim.original_text);
        assert_eq!(claim.status, ClaimStatus::Analyzing);
    }

    #[test]
    fn test_from_extraction_assigns_unique_ids() {
        let source_id = SourceId::new();
        let item = extracted(80.0);
        let a = Claim::from_extraction(source_id, &item);
        let b = Claim::from_extraction(source_id, &item);

        assert_ne!(a.id, b.id);
    }
}
