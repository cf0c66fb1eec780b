//! Credence Conflict Resolver
//!
//! Reconciles a freshly extracted claim batch against the existing corpus.
//! The oracle judges pairwise interactions; this crate applies them. Claims
//! are never dropped by a merge, only re-scored or flagged, and the merged
//! ordering is a display contract: new claims first, then the existing
//! claims, each side in its original internal order.
//!
//! A failed or timed-out classification fails open: the merge returns the
//! new claims followed by the existing claims untouched, so an oracle outage
//! never blocks ingestion or silently loses claims.

#![warn(missing_docs)]

use credence_domain::score::{self, InteractionEffect};
use credence_domain::{Claim, ClaimStatus, CredibilityLevel, Interaction};
use credence_domain::traits::LanguageModel;
use credence_oracle::{ClaimRef, OracleClient};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Apply a set of interaction judgments to the existing corpus
///
/// Pure: consumes both claim lists and the judgments, returns the merged
/// list. Judgments referencing an id not present in `existing` are silently
/// ignored; they can arise from legitimate races or oracle confusion.
pub fn apply_interactions(
    existing: Vec<Claim>,
    incoming: Vec<Claim>,
    interactions: &[Interaction],
) -> Vec<Claim> {
    let by_id: HashMap<_, _> = interactions
        .iter()
        .map(|i| (i.existing_claim_id, i))
        .collect();

    let mut merged = incoming;
    merged.extend(existing.into_iter().map(|claim| {
        match by_id.get(&claim.id) {
            Some(interaction) => apply_effect(claim, interaction),
            None => claim,
        }
    }));
    merged
}

/// Apply a single judgment to a claim
fn apply_effect(mut claim: Claim, interaction: &Interaction) -> Claim {
    match score::apply_interaction(claim.credibility_score, interaction.kind, &interaction.reason) {
        InteractionEffect::Contradicted { score, bias_warning } => {
            debug!(id = %claim.id, score, "claim contradicted by newer source");
            claim.credibility_score = score;
            // Pinned, not recomputed from the new score
            claim.credibility_level = CredibilityLevel::Low;
            claim.status = ClaimStatus::Flagged;
            // The one place the bias narrative is replaced instead of appended
            claim.bias_analysis = bias_warning;
        }
        InteractionEffect::Reinforced { score, level } => {
            debug!(id = %claim.id, score, "claim reinforced by newer source");
            claim.credibility_score = score;
            claim.credibility_level = level;
            claim.bias_analysis.push_str(score::REINFORCEMENT_NOTE);
        }
        InteractionEffect::Unchanged => {}
    }
    claim
}

/// Merges claim batches, delegating interaction judgments to the oracle
pub struct Resolver<L> {
    oracle: OracleClient<L>,
    classify_timeout: Duration,
}

impl<L> Resolver<L>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a resolver with the given classification timeout
    pub fn new(oracle: OracleClient<L>, classify_timeout: Duration) -> Self {
        Self {
            oracle,
            classify_timeout,
        }
    }

    /// Merge an incoming claim batch into the existing corpus
    ///
    /// Infallible by design: every failure path degrades to a merge that
    /// leaves the existing claims untouched.
    pub async fn merge(&self, existing: Vec<Claim>, incoming: Vec<Claim>) -> Vec<Claim> {
        if existing.is_empty() {
            // Nothing to reconcile against; skip the oracle entirely
            return incoming;
        }

        let existing_refs: Vec<ClaimRef> = existing.iter().map(ClaimRef::from).collect();
        let incoming_refs: Vec<ClaimRef> = incoming.iter().map(ClaimRef::from).collect();

        match timeout(
            self.classify_timeout,
            self.oracle.classify(&existing_refs, &incoming_refs),
        )
        .await
        {
            Ok(Ok(interactions)) => {
                info!(
                    judgments = interactions.len(),
                    existing = existing.len(),
                    incoming = incoming.len(),
                    "merging with oracle judgments"
                );
                apply_interactions(existing, incoming, &interactions)
            }
            Ok(Err(e)) => {
                warn!("classification failed, merging open: {}", e);
                fail_open(existing, incoming)
            }
            Err(_) => {
                warn!("classification timed out, merging open");
                fail_open(existing, incoming)
            }
        }
    }
}

/// Concatenate the batches with the existing claims untouched
fn fail_open(existing: Vec<Claim>, incoming: Vec<Claim>) -> Vec<Claim> {
    let mut merged = incoming;
    merged.extend(existing);
    merged
}
