//! Credence Report Filter
//!
//! Projects the current claim snapshot into report inputs and delegates
//! prose generation to the oracle. The projection is deliberately lossless
//! and order-preserving: the truth filter (which claims to exclude, and
//! whether to prefer a verified correction over the original wording) runs
//! inside the synthesis step, because only the oracle interprets
//! verification content. Pre-dropping claims here would break that.

#![warn(missing_docs)]

use credence_domain::traits::LanguageModel;
use credence_domain::{report, Claim, ClaimStatus, ReportItem};
use credence_oracle::OracleClient;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Fixed fallback returned when synthesis fails or times out
pub const SYNTHESIS_FALLBACK: &str =
    "Report generation failed: the analysis service was unavailable.";

/// Project claims into report inputs
///
/// Complete, order-preserving, lossless: one item per claim, in snapshot
/// order, with `"Not verified"` standing in for absent verification.
pub fn build_report_inputs(claims: &[Claim]) -> Vec<ReportItem> {
    claims
        .iter()
        .map(|claim| ReportItem {
            text: claim.text.clone(),
            score: claim.credibility_score,
            verification_summary: claim
                .verification
                .as_ref()
                .map(|v| v.summary.clone())
                .unwrap_or_else(|| report::NOT_VERIFIED.to_string()),
            is_flagged: claim.status == ClaimStatus::Flagged,
        })
        .collect()
}

/// Generates prose reports from the current claim snapshot
pub struct Reporter<L> {
    oracle: OracleClient<L>,
    synthesize_timeout: Duration,
}

impl<L> Reporter<L>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a reporter with the given synthesis timeout
    pub fn new(oracle: OracleClient<L>, synthesize_timeout: Duration) -> Self {
        Self {
            oracle,
            synthesize_timeout,
        }
    }

    /// Synthesize a report from the given claims
    ///
    /// Infallible: a failed or timed-out synthesis yields the fixed fallback
    /// string instead of an error.
    pub async fn synthesize(&self, claims: &[Claim]) -> String {
        let items = build_report_inputs(claims);
        info!(items = items.len(), "synthesizing report");

        match timeout(self.synthesize_timeout, self.oracle.synthesize(&items)).await {
            Ok(Ok(prose)) => prose,
            Ok(Err(e)) => {
                warn!("synthesis failed: {}", e);
                SYNTHESIS_FALLBACK.to_string()
            }
            Err(_) => {
                warn!("synthesis timed out");
                SYNTHESIS_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_domain::{ClaimId, CredibilityLevel, SourceId, VerificationResult};
    use credence_oracle::MockModel;

    fn claim(text: &str, score: u8, status: ClaimStatus) -> Claim {
        Claim {
            id: ClaimId::new(),
            text: text.to_string(),
            original_text: text.to_string(),
            source_id: SourceId::new(),
            credibility_score: score,
            credibility_level: CredibilityLevel::Medium,
            bias_analysis: String::new(),
            context: String::new(),
            verification: None,
            status,
            is_new: false,
        }
    }

    #[test]
    fn test_projection_is_lossless_and_ordered() {
        let claims = vec![
            claim("a", 90, ClaimStatus::Verified),
            claim("b", 10, ClaimStatus::Flagged),
            claim("c", 55, ClaimStatus::Analyzing),
        ];

        let items = build_report_inputs(&claims);

        assert_eq!(items.len(), 3, "no claim may be pre-dropped");
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(items[1].is_flagged);
        assert!(!items[0].is_flagged);
    }

    #[test]
    fn test_projection_defaults_missing_verification() {
        let mut verified = claim("a", 90, ClaimStatus::Verified);
        verified.verification = Some(VerificationResult {
            is_verified: true,
            source_url: None,
            source_title: None,
            summary: "Confirmed by two outlets.".to_string(),
        });
        let unverified = claim("b", 55, ClaimStatus::Analyzing);

        let items = build_report_inputs(&[verified, unverified]);

        assert_eq!(items[0].verification_summary, "Confirmed by two outlets.");
        assert_eq!(items[1].verification_summary, report::NOT_VERIFIED);
    }

    fn reporter(model: MockModel) -> Reporter<MockModel> {
        Reporter::new(OracleClient::new(model), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_synthesize_returns_oracle_prose() {
        let model = MockModel::new("Two of three claims held up under review.");

        let prose = reporter(model)
            .synthesize(&[claim("a", 90, ClaimStatus::Verified)])
            .await;

        assert_eq!(prose, "Two of three claims held up under review.");
    }

    #[tokio::test]
    async fn test_synthesize_falls_back_on_failure() {
        let model = MockModel::default();
        model.enqueue_error("backend down");

        let prose = reporter(model)
            .synthesize(&[claim("a", 90, ClaimStatus::Verified)])
            .await;

        assert_eq!(prose, SYNTHESIS_FALLBACK);
    }
}
