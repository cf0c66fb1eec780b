//! Typed oracle operations over a raw language model

use crate::parser;
use crate::prompt;
use crate::types::{ClaimRef, VerificationOutcome};
use crate::OracleError;
use credence_domain::traits::LanguageModel;
use credence_domain::{Claim, ExtractedClaim, Interaction, ReportItem, Source};
use std::sync::Arc;
use tracing::{debug, warn};

/// The oracle client pairs a prompt builder with a defensive parser for each
/// of the four analysis operations
///
/// Failure policy per operation:
/// - `extract` never fails; any oracle or parse failure yields an empty batch
/// - `verify` returns an error; the caller flags the claim and leaves
///   verification absent
/// - `classify` returns an error distinct from the valid empty result; the
///   caller fails open
/// - `synthesize` returns an error; the caller substitutes a fixed fallback
///
/// Timeouts are the caller's responsibility, not the oracle's.
pub struct OracleClient<L> {
    model: Arc<L>,
}

impl<L> Clone for OracleClient<L> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}

impl<L> OracleClient<L>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new oracle client owning its model
    pub fn new(model: L) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Create a new oracle client sharing an existing model handle
    pub fn from_shared(model: Arc<L>) -> Self {
        Self { model }
    }

    /// Extract candidate claims from a source's text
    ///
    /// Never propagates a failure: an unreachable oracle or a malformed
    /// response produces an empty batch.
    pub async fn extract(&self, text: &str, source: &Source) -> Vec<ExtractedClaim> {
        let prompt = prompt::extraction_prompt(text, source);

        let candidates = match self.call(prompt).await {
            Ok(response) => match parser::parse_extraction(&response) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("Extraction response unusable, returning empty batch: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("Extraction call failed, returning empty batch: {}", e);
                Vec::new()
            }
        };

        debug!(count = candidates.len(), source = %source.id, "extraction complete");
        candidates
    }

    /// Verify a single claim against external evidence
    pub async fn verify(&self, claim: &Claim) -> Result<VerificationOutcome, OracleError> {
        let prompt = prompt::verification_prompt(claim);
        let response = self.call(prompt).await?;
        parser::parse_verification(&response)
    }

    /// Classify how incoming claims interact with existing ones
    ///
    /// `Ok` with an empty list means the oracle found no interactions, which
    /// is distinct from a call failure.
    pub async fn classify(
        &self,
        existing: &[ClaimRef],
        incoming: &[ClaimRef],
    ) -> Result<Vec<Interaction>, OracleError> {
        let prompt = prompt::classification_prompt(existing, incoming);
        let response = self.call(prompt).await?;
        parser::parse_interactions(&response)
    }

    /// Synthesize a prose report from projected claims
    pub async fn synthesize(&self, items: &[ReportItem]) -> Result<String, OracleError> {
        let prompt = prompt::synthesis_prompt(items);
        self.call(prompt).await
    }

    /// Call the underlying model
    async fn call(&self, prompt: String) -> Result<String, OracleError> {
        let model = Arc::clone(&self.model);

        // Call in a blocking context since LanguageModel is not async
        tokio::task::spawn_blocking(move || {
            model
                .generate(&prompt)
                .map_err(|e| OracleError::Communication(e.to_string()))
        })
        .await
        .map_err(|e| OracleError::Other(format!("Task join error: {}", e)))?
    }
}
