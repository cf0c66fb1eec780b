//! Credence Storage Layer
//!
//! Holds the authoritative claim and source collections for the lifetime of
//! the process. The store exclusively owns both collections; every other
//! component operates on snapshots or single claims passed by value and
//! returns updated values.
//!
//! # Concurrency contract
//!
//! The store itself is synchronous and single-owner; callers share it behind
//! a mutex so mutations serialize in the order their results arrive. A
//! whole-list replacement is a total overwrite and can race destructively
//! with a per-claim update issued before the replacement but completing
//! after. Every mutation bumps a version counter, and
//! [`ClaimStore::replace_claims_if`] refuses to apply a replacement built
//! from a stale snapshot, so merge writers can detect the race and rebuild.
//! Per-claim updates are last-write-wins by id.
//!
//! # Examples
//!
//! ```
//! use credence_store::{ClaimStore, SourceSpec};
//! use credence_domain::SourceCategory;
//!
//! let mut store = ClaimStore::new();
//! let source = store.create_source(SourceSpec {
//!     name: "q3-earnings.txt".to_string(),
//!     category: SourceCategory::FinancialReport,
//!     raw_content: "Revenue grew 40%.".to_string(),
//! });
//! assert!(store.source(source.id).is_some());
//! ```

#![warn(missing_docs)]

use credence_domain::{Claim, ClaimId, ExtractedClaim, Source, SourceCategory, SourceId};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Extraction referenced a source the store does not hold
    #[error("Unknown source: {0}")]
    UnknownSource(SourceId),

    /// A replacement was built from a snapshot that is no longer current
    #[error("Stale snapshot: expected version {expected}, store is at {actual}")]
    StaleSnapshot {
        /// Version the caller's snapshot was taken at
        expected: u64,
        /// Version the store is actually at
        actual: u64,
    },
}

/// Parameters for creating a source
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Human-readable name
    pub name: String,
    /// Category used to bias interpretation
    pub category: SourceCategory,
    /// The text to ingest
    pub raw_content: String,
}

/// A point-in-time copy of the store contents
///
/// The version identifies the store state the copy was taken from and can be
/// passed back to [`ClaimStore::replace_claims_if`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// All sources, in ingestion order
    pub sources: Vec<Source>,
    /// All claims, in display order
    pub claims: Vec<Claim>,
    /// Store version at the time of the copy
    pub version: u64,
}

/// In-memory store of the authoritative claim and source collections
///
/// Claim order is a display contract: new claims go first after a merge,
/// and the store preserves whatever order a replacement hands it.
#[derive(Debug, Default)]
pub struct ClaimStore {
    sources: Vec<Source>,
    claims: Vec<Claim>,
    version: u64,
}

impl ClaimStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new source
    pub fn create_source(&mut self, spec: SourceSpec) -> Source {
        let source = Source {
            id: SourceId::new(),
            name: spec.name,
            category: spec.category,
            raw_content: spec.raw_content,
            ingested_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        };
        self.sources.push(source.clone());
        self.version += 1;
        source
    }

    /// Look up a source by id
    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Materialize and insert claims from an extraction batch
    ///
    /// Each item gets a fresh globally-unique id, a score/level/status
    /// assessment, and the new-claim highlight flag. Fails if the source is
    /// not held by the store; claims must never reference a source that does
    /// not exist at creation time.
    pub fn record_extraction(
        &mut self,
        source_id: SourceId,
        items: &[ExtractedClaim],
    ) -> Result<Vec<Claim>, StoreError> {
        if self.source(source_id).is_none() {
            return Err(StoreError::UnknownSource(source_id));
        }

        let created: Vec<Claim> = items
            .iter()
            .map(|item| Claim::from_extraction(source_id, item))
            .collect();

        self.claims.extend(created.iter().cloned());
        self.version += 1;

        debug!(count = created.len(), %source_id, "recorded extraction batch");
        Ok(created)
    }

    /// Take a point-in-time copy of the store contents
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sources: self.sources.clone(),
            claims: self.claims.clone(),
            version: self.version,
        }
    }

    /// All claims, in display order
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// All sources, in ingestion order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Look up a claim by id
    pub fn claim(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|c| c.id == id)
    }

    /// Number of claims held
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Whether the claim collection is empty
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Atomically swap the authoritative claim collection
    pub fn replace_claims(&mut self, new_claims: Vec<Claim>) {
        self.claims = new_claims;
        self.version += 1;
    }

    /// Swap the claim collection only if the store has not moved on since
    /// the snapshot the replacement was built from
    pub fn replace_claims_if(
        &mut self,
        expected_version: u64,
        new_claims: Vec<Claim>,
    ) -> Result<(), StoreError> {
        if self.version != expected_version {
            return Err(StoreError::StaleSnapshot {
                expected: expected_version,
                actual: self.version,
            });
        }
        self.replace_claims(new_claims);
        Ok(())
    }

    /// Apply a pure transformation to the claim with the given id
    ///
    /// Returns `false` without touching anything when the id is unknown. A
    /// missing claim is never an error here: the claim may have been pruned
    /// by a snapshot replacement between a verification request being issued
    /// and its response arriving.
    pub fn update_claim(&mut self, id: ClaimId, updater: impl FnOnce(Claim) -> Claim) -> bool {
        match self.claims.iter_mut().find(|c| c.id == id) {
            Some(slot) => {
                let updated = updater(slot.clone());
                *slot = updated;
                self.version += 1;
                true
            }
            None => {
                debug!(%id, "update for unknown claim id ignored");
                false
            }
        }
    }

    /// Drop the transient new-claim highlight from every claim
    ///
    /// Called before each subsequent ingestion so only the latest batch is
    /// highlighted.
    pub fn clear_new_flags(&mut self) {
        let mut changed = false;
        for claim in &mut self.claims {
            if claim.is_new {
                claim.is_new = false;
                changed = true;
            }
        }
        if changed {
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_domain::{ClaimStatus, CredibilityLevel};

    fn spec() -> SourceSpec {
        SourceSpec {
            name: "report.txt".to_string(),
            category: SourceCategory::NewsArticle,
            raw_content: "Some article text.".to_string(),
        }
    }

    fn items(scores: &[f64]) -> Vec<ExtractedClaim> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ExtractedClaim {
                claim_text: format!("claim {}", i),
                context: String::new(),
                bias_analysis: format!("rationale {}", i),
                score,
            })
            .collect()
    }

    #[test]
    fn test_create_source_assigns_identity() {
        let mut store = ClaimStore::new();
        let a = store.create_source(spec());
        let b = store.create_source(spec());

        assert_ne!(a.id, b.id);
        assert_eq!(store.sources().len(), 2);
        assert_eq!(store.source(a.id).unwrap().name, "report.txt");
    }

    #[test]
    fn test_record_extraction_requires_known_source() {
        let mut store = ClaimStore::new();
        let result = store.record_extraction(SourceId::new(), &items(&[70.0]));

        assert!(matches!(result, Err(StoreError::UnknownSource(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_extraction_scores_and_flags() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        let created = store
            .record_extraction(source.id, &items(&[55.0, 72.0]))
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(store.claim_count(), 2);

        assert_eq!(created[0].credibility_score, 55);
        assert_eq!(created[0].credibility_level, CredibilityLevel::Medium);
        assert_eq!(created[0].status, ClaimStatus::Flagged);
        assert!(created[0].is_new);

        assert_eq!(created[1].status, ClaimStatus::Analyzing);
    }

    #[test]
    fn test_record_extraction_ids_are_unique_within_a_burst() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        let created = store
            .record_extraction(source.id, &items(&[60.0; 50]))
            .unwrap();

        let mut ids: Vec<_> = created.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_update_claim_applies_transformation() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        let created = store.record_extraction(source.id, &items(&[70.0])).unwrap();
        let id = created[0].id;

        let touched = store.update_claim(id, |mut c| {
            c.credibility_score = 90;
            c
        });

        assert!(touched);
        assert_eq!(store.claim(id).unwrap().credibility_score, 90);
    }

    #[test]
    fn test_update_claim_unknown_id_is_a_silent_no_op() {
        let mut store = ClaimStore::new();
        let before = store.snapshot().version;

        let touched = store.update_claim(ClaimId::new(), |c| c);

        assert!(!touched);
        assert_eq!(store.snapshot().version, before);
    }

    #[test]
    fn test_replace_claims_is_a_total_overwrite() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        store.record_extraction(source.id, &items(&[70.0, 80.0])).unwrap();

        store.replace_claims(Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_claims_if_rejects_stale_snapshot() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        store.record_extraction(source.id, &items(&[70.0])).unwrap();

        let snap = store.snapshot();

        // A concurrent per-claim update lands after the snapshot was taken
        let id = snap.claims[0].id;
        store.update_claim(id, |mut c| {
            c.credibility_score = 10;
            c
        });

        let result = store.replace_claims_if(snap.version, Vec::new());
        assert!(matches!(result, Err(StoreError::StaleSnapshot { .. })));
        assert_eq!(store.claim_count(), 1, "stale replacement must not apply");

        // A replacement built from the current version applies
        let current = store.snapshot().version;
        store.replace_claims_if(current, Vec::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_new_flags() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        store.record_extraction(source.id, &items(&[70.0, 80.0])).unwrap();

        store.clear_new_flags();
        assert!(store.claims().iter().all(|c| !c.is_new));
    }

    #[test]
    fn test_snapshot_is_detached_from_the_store() {
        let mut store = ClaimStore::new();
        let source = store.create_source(spec());
        store.record_extraction(source.id, &items(&[70.0])).unwrap();

        let snap = store.snapshot();
        store.replace_claims(Vec::new());

        assert_eq!(snap.claims.len(), 1);
        assert!(store.is_empty());
    }
}
