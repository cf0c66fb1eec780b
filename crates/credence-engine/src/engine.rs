//! Core engine implementation

use crate::config::EngineConfig;
use crate::error::EngineError;
use credence_domain::score;
use credence_domain::traits::LanguageModel;
use credence_domain::{Claim, ClaimId, ClaimStatus, Source, VerificationResult};
use credence_oracle::OracleClient;
use credence_reporter::Reporter;
use credence_resolver::Resolver;
use credence_store::{ClaimStore, SourceSpec};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::timeout;
use tracing::{info, warn};

/// Attempts to land a merge before giving up on version checking
const MERGE_RETRY_LIMIT: u32 = 3;

/// Result of an ingestion round
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// The source that was created
    pub source: Source,
    /// Claims minted from this round's extraction
    pub new_claims: Vec<Claim>,
    /// Whether a reconciliation pass against the prior corpus ran
    pub merged: bool,
    /// Claims held by the store after the round
    pub total_claims: usize,
}

/// The engine drives the claim lifecycle over a shared store
///
/// Mutations serialize at the store mutex in the order their results
/// arrive. Merges are version-checked against the snapshot they were built
/// from and rebuilt when a concurrent update lands first; per-claim
/// verification updates are last-write-wins by id.
pub struct Engine<L> {
    oracle: OracleClient<L>,
    store: Arc<Mutex<ClaimStore>>,
    resolver: Resolver<L>,
    reporter: Reporter<L>,
    config: EngineConfig,
}

impl<L> Engine<L>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create an engine over a fresh store
    pub fn new(model: L, config: EngineConfig) -> Self {
        let oracle = OracleClient::new(model);
        let resolver = Resolver::new(oracle.clone(), config.classification_timeout());
        let reporter = Reporter::new(oracle.clone(), config.synthesis_timeout());

        Self {
            oracle,
            store: Arc::new(Mutex::new(ClaimStore::new())),
            resolver,
            reporter,
            config,
        }
    }

    /// Ingest a source: extract claims and record or reconcile them
    ///
    /// The first ingestion inserts extracted claims directly. Subsequent
    /// ingestions reconcile the new batch against a snapshot of the prior
    /// corpus and atomically replace it with the merged result. Extraction
    /// failures produce an empty batch, never an error.
    pub async fn ingest(&self, spec: SourceSpec) -> Result<IngestOutcome, EngineError> {
        if spec.raw_content.len() > self.config.max_text_length {
            return Err(EngineError::TextTooLong(
                spec.raw_content.len(),
                self.config.max_text_length,
            ));
        }

        let text = spec.raw_content.clone();
        let (source, first_ingestion) = {
            let mut store = self.lock()?;
            let first = store.is_empty();
            (store.create_source(spec), first)
        };

        info!(
            source = %source.id,
            category = %source.category,
            chars = text.len(),
            "starting ingestion"
        );

        let candidates = match timeout(
            self.config.extraction_timeout(),
            self.oracle.extract(&text, &source),
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(_) => {
                warn!("extraction timed out, continuing with empty batch");
                Vec::new()
            }
        };

        if first_ingestion {
            let mut store = self.lock()?;
            let created = store
                .record_extraction(source.id, &candidates)
                .map_err(|e| EngineError::Store(e.to_string()))?;
            info!(created = created.len(), "first ingestion recorded");
            return Ok(IngestOutcome {
                source,
                new_claims: created,
                merged: false,
                total_claims: store.claim_count(),
            });
        }

        let incoming: Vec<Claim> = candidates
            .iter()
            .map(|item| Claim::from_extraction(source.id, item))
            .collect();

        if incoming.is_empty() {
            let total_claims = self.lock()?.claim_count();
            info!("ingestion produced no claims, corpus unchanged");
            return Ok(IngestOutcome {
                source,
                new_claims: incoming,
                merged: false,
                total_claims,
            });
        }

        // Only the latest batch keeps the highlight flag
        let mut snapshot = {
            let mut store = self.lock()?;
            store.clear_new_flags();
            store.snapshot()
        };

        let mut attempt = 1;
        loop {
            let merged = self
                .resolver
                .merge(snapshot.claims.clone(), incoming.clone())
                .await;

            let mut store = self.lock()?;
            if attempt >= MERGE_RETRY_LIMIT {
                // Bounded retries exhausted; land the merge last-write-wins
                warn!(attempt, "merge retries exhausted, replacing unconditionally");
                store.replace_claims(merged);
                break;
            }
            match store.replace_claims_if(snapshot.version, merged) {
                Ok(()) => break,
                Err(e) => {
                    warn!(attempt, "merge lost a store race, rebuilding: {}", e);
                    snapshot = store.snapshot();
                    attempt += 1;
                }
            }
        }

        let total_claims = self.lock()?.claim_count();
        info!(
            incoming = incoming.len(),
            total_claims, "ingestion merged into corpus"
        );

        Ok(IngestOutcome {
            source,
            new_claims: incoming,
            merged: true,
            total_claims,
        })
    }

    /// Verify a single claim against external evidence
    ///
    /// The claim is marked `Analyzing` for the duration of the call. A
    /// failed or timed-out verification flags the claim and leaves its
    /// verification absent; the claim is never stranded in `Analyzing`.
    /// Returns the claim as it stands after the round.
    pub async fn verify_claim(&self, id: ClaimId) -> Result<Claim, EngineError> {
        let pending = {
            let mut store = self.lock()?;
            if !store.update_claim(id, |mut c| {
                c.status = ClaimStatus::Analyzing;
                c
            }) {
                return Err(EngineError::UnknownClaim(id));
            }
            store
                .claim(id)
                .cloned()
                .ok_or(EngineError::UnknownClaim(id))?
        };

        match timeout(
            self.config.verification_timeout(),
            self.oracle.verify(&pending),
        )
        .await
        {
            Ok(Ok(outcome)) => {
                let result: VerificationResult = outcome.into();
                let note = format!(" [VERIFICATION] {}", result.summary);
                let mut store = self.lock()?;
                store.update_claim(id, move |mut c| {
                    let (new_score, new_status) =
                        score::apply_verification(c.credibility_score, &result.summary);
                    c.credibility_score = new_score;
                    c.credibility_level = score::level_for(new_score);
                    c.status = new_status;
                    c.bias_analysis.push_str(&note);
                    // Replaced wholesale, never partially mutated
                    c.verification = Some(result);
                    c
                });
            }
            Ok(Err(e)) => {
                warn!(%id, "verification failed, flagging claim: {}", e);
                self.flag_unverified(id)?;
            }
            Err(_) => {
                warn!(%id, "verification timed out, flagging claim");
                self.flag_unverified(id)?;
            }
        }

        // The claim may have been pruned by a concurrent snapshot
        // replacement; fall back to the copy we verified against
        Ok(self.lock()?.claim(id).cloned().unwrap_or(pending))
    }

    /// Synthesize a prose report over the current corpus
    pub async fn report(&self) -> Result<String, EngineError> {
        let snapshot = self.lock()?.snapshot();
        Ok(self.reporter.synthesize(&snapshot.claims).await)
    }

    /// All claims, in display order
    pub fn claims(&self) -> Result<Vec<Claim>, EngineError> {
        Ok(self.lock()?.claims().to_vec())
    }

    /// All sources, in ingestion order
    pub fn sources(&self) -> Result<Vec<Source>, EngineError> {
        Ok(self.lock()?.sources().to_vec())
    }

    /// Find a claim whose id string starts with the given prefix
    pub fn find_claim(&self, id_prefix: &str) -> Result<Option<Claim>, EngineError> {
        let store = self.lock()?;
        Ok(store
            .claims()
            .iter()
            .find(|c| c.id.to_string().starts_with(id_prefix))
            .cloned())
    }

    fn flag_unverified(&self, id: ClaimId) -> Result<(), EngineError> {
        let mut store = self.lock()?;
        store.update_claim(id, |mut c| {
            c.status = ClaimStatus::Flagged;
            c
        });
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClaimStore>, EngineError> {
        self.store.lock().map_err(|_| EngineError::LockPoisoned)
    }
}
