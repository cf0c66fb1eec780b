//! Prompt engineering for the four oracle operations

use crate::types::ClaimRef;
use credence_domain::{Claim, ReportItem, Source, SourceCategory};

/// Build the extraction prompt for a source's text
pub fn extraction_prompt(text: &str, source: &Source) -> String {
    let mut prompt = String::new();

    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt.push_str("\n\n");

    prompt.push_str(&format!("Source name: {}\n", source.name));
    prompt.push_str(&format!("Source category: {}\n", source.category));
    prompt.push_str(&format!("Reading guidance: {}\n\n", category_guidance(source.category)));

    prompt.push_str("Text to analyze:\n");
    prompt.push_str("---\n");
    prompt.push_str(text);
    prompt.push_str("\n---\n\n");

    prompt.push_str(EXTRACTION_FORMAT_REMINDER);

    prompt
}

/// Build the verification prompt for a single claim
pub fn verification_prompt(claim: &Claim) -> String {
    let mut prompt = String::new();

    prompt.push_str(VERIFICATION_INSTRUCTIONS);
    prompt.push_str("\n\n");

    prompt.push_str("Claim to verify:\n");
    prompt.push_str(&format!("---\n{}\n---\n", claim.text));
    if !claim.context.is_empty() {
        prompt.push_str(&format!("\nContext from the source: {}\n", claim.context));
    }
    prompt.push_str(&format!(
        "\nCurrent credibility score: {} ({})\n\n",
        claim.credibility_score, claim.credibility_level
    ));

    prompt.push_str(VERIFICATION_FORMAT_REMINDER);

    prompt
}

/// Build the interaction-classification prompt for a merge round
pub fn classification_prompt(existing: &[ClaimRef], incoming: &[ClaimRef]) -> String {
    let mut prompt = String::new();

    prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
    prompt.push_str("\n\nExisting claims:\n");
    for claim in existing {
        prompt.push_str(&format!("- [{}] {}\n", claim.id, claim.text));
    }

    prompt.push_str("\nNew claims:\n");
    for claim in incoming {
        prompt.push_str(&format!("- {}\n", claim.text));
    }

    prompt.push('\n');
    prompt.push_str(CLASSIFICATION_FORMAT_REMINDER);

    prompt
}

/// Build the report-synthesis prompt from projected claims
pub fn synthesis_prompt(items: &[ReportItem]) -> String {
    let mut prompt = String::new();

    prompt.push_str(SYNTHESIS_INSTRUCTIONS);
    prompt.push_str("\n\nClaims:\n");
    for item in items {
        prompt.push_str(&format!(
            "- {} (score: {}, flagged: {}, verification: {})\n",
            item.text, item.score, item.is_flagged, item.verification_summary
        ));
    }

    prompt
}

/// Reading guidance keyed to the source category
fn category_guidance(category: SourceCategory) -> &'static str {
    match category {
        SourceCategory::FinancialReport => {
            "Audited figures carry weight; forward-looking statements do not."
        }
        SourceCategory::PressRelease => {
            "Promotional framing is expected; discount superlatives and unaudited numbers."
        }
        SourceCategory::NewsArticle => {
            "Distinguish reported facts from quoted opinion and speculation."
        }
        SourceCategory::AcademicPaper => {
            "Weigh methodology and sample size; preprints are weaker than peer review."
        }
        SourceCategory::UserInput => {
            "Unvetted text; treat every assertion as unconfirmed until verified."
        }
        SourceCategory::SupplementalUpdate => {
            "Newer material; pay attention to statements that revise earlier figures."
        }
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract discrete, factual claims from the following text.
Each claim should follow this format:

{
  "claim_text": "one atomic factual assertion",
  "context": "surrounding text that situates the assertion",
  "bias_analysis": "why the source might overstate or understate this",
  "score": 0-100
}

Rules:
- One assertion per claim; split compound statements
- claim_text must be checkable against external evidence
- bias_analysis names the incentive or framing behind the statement
- score is your initial credibility estimate given the source category:
  - Speculative or promotional: 20-45
  - Plausible but unaudited: 45-60
  - Consistent with known context: 60-80
  - Independently corroborated in the text itself: 80-95
- Include numeric and temporal qualifiers in claim_text verbatim"#;

const EXTRACTION_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "claim_text": "...",
    "context": "...",
    "bias_analysis": "...",
    "score": 0-100
  }
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

const VERIFICATION_INSTRUCTIONS: &str = r#"Verify the following claim against evidence you can establish.
Search your knowledge for corroborating or refuting information and narrate a verdict.
State plainly in the summary whether the claim is true, false, misleading, or unresolved,
and name the strongest piece of evidence if you have one."#;

const VERIFICATION_FORMAT_REMINDER: &str = r#"Output format (single JSON object only, no additional text):
{
  "summary": "narrative verdict",
  "is_verified": true or false,
  "source_title": "title of strongest evidence or null",
  "source_url": "url of strongest evidence or null"
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

const CLASSIFICATION_INSTRUCTIONS: &str = r#"Compare each existing claim against the new claims.
For every existing claim that some new claim meaningfully relates to, emit one judgment:
- "contradicts" if a new claim disputes, revises, or undermines it
- "reinforces" if a new claim independently supports it
- "neutral" if they touch the same subject without affecting credibility
Existing claims with no related new claim get no entry at all."#;

const CLASSIFICATION_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "existing_id": "id in brackets from the existing list",
    "interaction": "contradicts | reinforces | neutral",
    "reason": "one sentence naming the new claim responsible"
  }
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

const SYNTHESIS_INSTRUCTIONS: &str = r#"Write a concise research report from the claims below.
Apply these rules exactly:
- Exclude flagged claims unless their verification summary states a correction; when it does, report the corrected fact
- Exclude unverified claims scoring below 50
- Prefer wording from a verification summary over the original claim text when they differ
- Group related claims into paragraphs; note credibility caveats inline where scores are middling
- Do not invent facts beyond the claims and their verification summaries"#;

#[cfg(test)]
mod tests {
    use super::*;
    use credence_domain::{report, ClaimId, ClaimStatus, CredibilityLevel, SourceId};

    fn source(category: SourceCategory) -> Source {
        Source {
            id: SourceId::new(),
            name: "q3.txt".to_string(),
            category,
            raw_content: String::new(),
            ingested_at: 0,
        }
    }

    fn claim(text: &str) -> Claim {
        Claim {
            id: ClaimId::new(),
            text: text.to_string(),
            original_text: text.to_string(),
            source_id: SourceId::new(),
            credibility_score: 55,
            credibility_level: CredibilityLevel::Medium,
            bias_analysis: String::new(),
            context: "earnings call".to_string(),
            verification: None,
            status: ClaimStatus::Analyzing,
            is_new: false,
        }
    }

    #[test]
    fn test_extraction_prompt_includes_text_and_category() {
        let prompt = extraction_prompt("Revenue grew 40%.", &source(SourceCategory::PressRelease));

        assert!(prompt.contains("Revenue grew 40%."));
        assert!(prompt.contains("press-release"));
        assert!(prompt.contains("Promotional framing"));
        assert!(prompt.contains("claim_text"));
    }

    #[test]
    fn test_verification_prompt_includes_claim_and_score() {
        let prompt = verification_prompt(&claim("The merger closed in June."));

        assert!(prompt.contains("The merger closed in June."));
        assert!(prompt.contains("earnings call"));
        assert!(prompt.contains("55"));
        assert!(prompt.contains("is_verified"));
    }

    #[test]
    fn test_classification_prompt_lists_both_sides_with_ids() {
        let existing = vec![ClaimRef {
            id: ClaimId::from_value(7),
            text: "Headcount doubled.".to_string(),
        }];
        let incoming = vec![ClaimRef {
            id: ClaimId::from_value(9),
            text: "Headcount fell 10%.".to_string(),
        }];

        let prompt = classification_prompt(&existing, &incoming);

        assert!(prompt.contains(&ClaimId::from_value(7).to_string()));
        assert!(prompt.contains("Headcount doubled."));
        assert!(prompt.contains("Headcount fell 10%."));
        assert!(prompt.contains("contradicts"));
    }

    #[test]
    fn test_synthesis_prompt_carries_every_item() {
        let items = vec![
            ReportItem {
                text: "A".to_string(),
                score: 90,
                verification_summary: "Confirmed true.".to_string(),
                is_flagged: false,
            },
            ReportItem {
                text: "B".to_string(),
                score: 10,
                verification_summary: report::NOT_VERIFIED.to_string(),
                is_flagged: true,
            },
        ];

        let prompt = synthesis_prompt(&items);

        assert!(prompt.contains("A (score: 90"));
        assert!(prompt.contains("B (score: 10"));
        assert!(prompt.contains(report::NOT_VERIFIED));
    }
}
