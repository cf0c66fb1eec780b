//! Pairwise interaction judgments between existing and incoming claims

use crate::claim::ClaimId;
use std::fmt;
use std::str::FromStr;

/// How an incoming claim relates to an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// The incoming claim contradicts the existing one
    Contradicts,
    /// The incoming claim reinforces the existing one
    Reinforces,
    /// No credibility-relevant relationship
    Neutral,
}

impl InteractionKind {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Contradicts => "contradicts",
            InteractionKind::Reinforces => "reinforces",
            InteractionKind::Neutral => "neutral",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contradicts" => Ok(InteractionKind::Contradicts),
            "reinforces" => Ok(InteractionKind::Reinforces),
            "neutral" => Ok(InteractionKind::Neutral),
            _ => Err(format!("Unknown interaction kind: {}", s)),
        }
    }
}

/// A judgment that some incoming claim relates to an existing claim
///
/// Ephemeral: produced by the oracle during conflict resolution, consumed by
/// the merge, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    /// The existing claim this judgment applies to
    pub existing_claim_id: ClaimId,
    /// The relationship kind
    pub kind: InteractionKind,
    /// The oracle's rationale
    pub reason: String,
}
