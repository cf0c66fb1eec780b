//! Report projection types

/// Placeholder summary for claims that were never verified
pub const NOT_VERIFIED: &str = "Not verified";

/// A claim projected for report synthesis
///
/// The projection is complete and lossless; exclusion decisions belong to
/// the synthesis step, which alone interprets verification content.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportItem {
    /// Current claim statement
    pub text: String,
    /// Credibility score in [0, 100]
    pub score: u8,
    /// Verification verdict, or [`NOT_VERIFIED`] when absent
    pub verification_summary: String,
    /// Whether the claim is currently flagged
    pub is_flagged: bool,
}
