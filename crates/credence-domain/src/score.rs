//! Score engine - pure credibility scoring transitions
//!
//! Every score change in the system goes through one of the functions in
//! this module. They are free functions over plain values so that the exact
//! transition rules, including keyword priority order, are enforceable by
//! unit tests in isolation.

use crate::claim::ClaimStatus;
use crate::interaction::InteractionKind;
use std::fmt;

/// Three-band credibility classification derived from score
///
/// `Unknown` is reserved for claims that have not been scored yet; it is
/// never produced by [`level_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityLevel {
    /// Score 80 and above
    High,
    /// Score 50 to 79
    Medium,
    /// Score below 50
    Low,
    /// Not yet scored
    Unknown,
}

impl CredibilityLevel {
    /// Stable uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityLevel::High => "HIGH",
            CredibilityLevel::Medium => "MEDIUM",
            CredibilityLevel::Low => "LOW",
            CredibilityLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for CredibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extraction-time assessment of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Rounded, clamped credibility score
    pub score: u8,
    /// Level derived from the score
    pub level: CredibilityLevel,
    /// Initial status
    pub status: ClaimStatus,
}

/// Effect of a pairwise interaction on an existing claim
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEffect {
    /// Contradicted by a newer source: score drops by 30, level is pinned to
    /// `Low` (not recomputed from the new score), status becomes `Flagged`,
    /// and the bias narrative is replaced wholesale with the warning
    Contradicted {
        /// New score, `max(0, prior - 30)`
        score: u8,
        /// Replacement bias text
        bias_warning: String,
    },
    /// Reinforced by a newer source: score rises by 10 (capped at 100),
    /// level is recomputed normally, status is unchanged, and the
    /// reinforcement note is appended to the bias narrative
    Reinforced {
        /// New score, `min(100, prior + 10)`
        score: u8,
        /// Level recomputed from the new score
        level: CredibilityLevel,
    },
    /// Neutral: no change at all
    Unchanged,
}

/// Keywords that mark a verification summary as refuting, checked first
const REFUTING_KEYWORDS: [&str; 4] = ["false", "incorrect", "misleading", "contradicts"];

/// Keywords that mark a verification summary as supporting
const SUPPORTING_KEYWORDS: [&str; 3] = ["true", "accurate", "supports"];

/// Note appended to the bias narrative when a claim is reinforced
pub const REINFORCEMENT_NOTE: &str = " [UPDATE] Reinforced by newer source.";

/// Build the warning that replaces the bias narrative of a contradicted claim
pub fn contradiction_warning(reason: &str) -> String {
    format!("[UPDATE WARNING] Contradicted by newer source: {}", reason)
}

/// Map a score to its credibility level
///
/// Band lower bounds are inclusive: `>= 80` is `High`, `>= 50` is `Medium`,
/// everything below is `Low`. Never returns `Unknown`.
pub fn level_for(score: u8) -> CredibilityLevel {
    if score >= 80 {
        CredibilityLevel::High
    } else if score >= 50 {
        CredibilityLevel::Medium
    } else {
        CredibilityLevel::Low
    }
}

/// Assess a freshly extracted claim
///
/// The raw oracle score is rounded to the nearest integer and clamped to
/// [0, 100]; non-finite values collapse to 0 rather than propagating NaN.
/// Claims below 60 start out `Flagged`, everything else `Analyzing`. This is
/// the only place extraction-time status is decided.
pub fn apply_extraction(raw_score: f64) -> Assessment {
    let raw = if raw_score.is_finite() { raw_score } else { 0.0 };
    let score = raw.round().clamp(0.0, 100.0) as u8;
    let status = if score < 60 {
        ClaimStatus::Flagged
    } else {
        ClaimStatus::Analyzing
    };
    Assessment {
        score,
        level: level_for(score),
        status,
    }
}

/// Re-score a claim from a verification summary
///
/// Classification is a case-insensitive keyword check in strict priority
/// order: refuting keywords win over supporting ones, and a summary matching
/// neither gets a modest +10 bump with `Verified` status. The heuristic is a
/// deliberate, cheap substitute for deeper language understanding.
pub fn apply_verification(prior: u8, summary: &str) -> (u8, ClaimStatus) {
    let lowered = summary.to_lowercase();

    if REFUTING_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return (10, ClaimStatus::Flagged);
    }

    if SUPPORTING_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        let boosted = (prior as u16 + 30).max(80).min(100) as u8;
        return (boosted, ClaimStatus::Verified);
    }

    (((prior as u16) + 10).min(100) as u8, ClaimStatus::Verified)
}

/// Compute the effect of a pairwise interaction on an existing claim
pub fn apply_interaction(prior: u8, kind: InteractionKind, reason: &str) -> InteractionEffect {
    match kind {
        InteractionKind::Contradicts => InteractionEffect::Contradicted {
            score: prior.saturating_sub(30),
            bias_warning: contradiction_warning(reason),
        },
        InteractionKind::Reinforces => {
            let score = ((prior as u16) + 10).min(100) as u8;
            InteractionEffect::Reinforced {
                score,
                level: level_for(score),
            }
        }
        InteractionKind::Neutral => InteractionEffect::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(100), CredibilityLevel::High);
        assert_eq!(level_for(80), CredibilityLevel::High);
        assert_eq!(level_for(79), CredibilityLevel::Medium);
        assert_eq!(level_for(50), CredibilityLevel::Medium);
        assert_eq!(level_for(49), CredibilityLevel::Low);
        assert_eq!(level_for(0), CredibilityLevel::Low);
    }

    #[test]
    fn test_extraction_rounds_and_clamps() {
        assert_eq!(apply_extraction(55.4).score, 55);
        assert_eq!(apply_extraction(55.5).score, 56);
        assert_eq!(apply_extraction(-20.0).score, 0);
        assert_eq!(apply_extraction(340.0).score, 100);
    }

    #[test]
    fn test_extraction_flags_below_sixty() {
        let assessment = apply_extraction(55.0);
        assert_eq!(assessment.score, 55);
        assert_eq!(assessment.level, CredibilityLevel::Medium);
        assert_eq!(assessment.status, ClaimStatus::Flagged);

        assert_eq!(apply_extraction(60.0).status, ClaimStatus::Analyzing);
        assert_eq!(apply_extraction(59.0).status, ClaimStatus::Flagged);
    }

    #[test]
    fn test_extraction_non_finite_collapses_to_zero() {
        assert_eq!(apply_extraction(f64::NAN).score, 0);
        assert_eq!(apply_extraction(f64::INFINITY).score, 100);
        assert_eq!(apply_extraction(f64::NEG_INFINITY).score, 0);
    }

    #[test]
    fn test_verification_refuting_summary() {
        let (score, status) = apply_verification(90, "The statement is FALSE per court filings.");
        assert_eq!(score, 10);
        assert_eq!(status, ClaimStatus::Flagged);
    }

    #[test]
    fn test_verification_supporting_summary() {
        // min(100, max(80, 55+30)) = 85
        let (score, status) =
            apply_verification(55, "Independent audits confirm this is TRUE and accurate.");
        assert_eq!(score, 85);
        assert_eq!(status, ClaimStatus::Verified);
    }

    #[test]
    fn test_verification_supporting_floor_and_cap() {
        // Low prior gets lifted to the floor
        assert_eq!(apply_verification(20, "accurate").0, 80);
        // High prior is capped
        assert_eq!(apply_verification(95, "supports").0, 100);
    }

    #[test]
    fn test_verification_refuting_wins_over_supporting() {
        // Both keyword classes present; refuting is checked first
        let (score, status) =
            apply_verification(70, "Partly true but the core figure is incorrect.");
        assert_eq!(score, 10);
        assert_eq!(status, ClaimStatus::Flagged);
    }

    #[test]
    fn test_verification_no_keyword_match() {
        let (score, status) = apply_verification(55, "Evidence remains inconclusive.");
        assert_eq!(score, 65);
        assert_eq!(status, ClaimStatus::Verified);
    }

    #[test]
    fn test_verification_is_case_insensitive() {
        assert_eq!(apply_verification(50, "MISLEADING at best").1, ClaimStatus::Flagged);
        assert_eq!(apply_verification(50, "AcCuRaTe").1, ClaimStatus::Verified);
    }

    #[test]
    fn test_contradiction_effect() {
        let effect = apply_interaction(70, InteractionKind::Contradicts, "newer filing disagrees");
        match effect {
            InteractionEffect::Contradicted { score, bias_warning } => {
                assert_eq!(score, 40);
                assert_eq!(
                    bias_warning,
                    "[UPDATE WARNING] Contradicted by newer source: newer filing disagrees"
                );
            }
            other => panic!("Expected Contradicted, got {:?}", other),
        }
    }

    #[test]
    fn test_contradiction_saturates_at_zero() {
        match apply_interaction(20, InteractionKind::Contradicts, "r") {
            InteractionEffect::Contradicted { score, .. } => assert_eq!(score, 0),
            other => panic!("Expected Contradicted, got {:?}", other),
        }
    }

    #[test]
    fn test_reinforcement_effect() {
        match apply_interaction(75, InteractionKind::Reinforces, "ignored") {
            InteractionEffect::Reinforced { score, level } => {
                assert_eq!(score, 85);
                assert_eq!(level, CredibilityLevel::High);
            }
            other => panic!("Expected Reinforced, got {:?}", other),
        }
    }

    #[test]
    fn test_reinforcement_caps_at_hundred() {
        match apply_interaction(95, InteractionKind::Reinforces, "r") {
            InteractionEffect::Reinforced { score, .. } => assert_eq!(score, 100),
            other => panic!("Expected Reinforced, got {:?}", other),
        }
    }

    #[test]
    fn test_neutral_is_a_no_op() {
        assert_eq!(
            apply_interaction(42, InteractionKind::Neutral, "r"),
            InteractionEffect::Unchanged
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the level bands partition [0, 100] exactly
        #[test]
        fn test_level_band_property(score in 0u8..=100) {
            let level = level_for(score);
            prop_assert_eq!(level == CredibilityLevel::High, score >= 80);
            prop_assert_eq!(level == CredibilityLevel::Medium, (50..80).contains(&score));
            prop_assert_eq!(level == CredibilityLevel::Low, score < 50);
            prop_assert_ne!(level, CredibilityLevel::Unknown);
        }

        /// Property: extraction scores stay in [0, 100] for any input
        #[test]
        fn test_extraction_clamping(raw in proptest::num::f64::ANY) {
            let assessment = apply_extraction(raw);
            prop_assert!(assessment.score <= 100);
        }

        /// Property: verification scores stay in [0, 100] for any prior and summary
        #[test]
        fn test_verification_clamping(prior in 0u8..=100, summary in ".{0,80}") {
            let (score, _) = apply_verification(prior, &summary);
            prop_assert!(score <= 100);
        }

        /// Property: contradiction always yields max(0, prior - 30), regardless
        /// of what level the prior score mapped to
        #[test]
        fn test_contradiction_monotonicity(prior in 0u8..=100) {
            match apply_interaction(prior, InteractionKind::Contradicts, "r") {
                InteractionEffect::Contradicted { score, .. } => {
                    prop_assert_eq!(score, prior.saturating_sub(30));
                }
                other => return Err(TestCaseError::fail(format!("unexpected {:?}", other))),
            }
        }

        /// Property: interaction scores stay in [0, 100]
        #[test]
        fn test_interaction_clamping(prior in 0u8..=100) {
            for kind in [InteractionKind::Contradicts, InteractionKind::Reinforces, InteractionKind::Neutral] {
                match apply_interaction(prior, kind, "r") {
                    InteractionEffect::Contradicted { score, .. } => prop_assert!(score <= 100),
                    InteractionEffect::Reinforced { score, .. } => prop_assert!(score <= 100),
                    InteractionEffect::Unchanged => {}
                }
            }
        }
    }
}
