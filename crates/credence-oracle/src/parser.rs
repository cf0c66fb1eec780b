//! Parse oracle output into validated core types
//!
//! Nothing the oracle returns is trusted: every field is shape-checked, a
//! missing numeric score defaults to a safe low value instead of propagating
//! NaN, and malformed array entries are skipped with a warning rather than
//! failing the batch.

use crate::types::VerificationOutcome;
use crate::OracleError;
use credence_domain::{ClaimId, ExtractedClaim, Interaction, InteractionKind};
use serde_json::Value;
use tracing::warn;

/// Parse an extraction response into claim candidates
pub fn parse_extraction(response: &str) -> Result<Vec<ExtractedClaim>, OracleError> {
    let entries = parse_array(response)?;

    let mut claims = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        match parse_extracted_claim(entry) {
            Ok(claim) => claims.push(claim),
            Err(e) => warn!("Skipping extraction candidate {}: {}", idx, e),
        }
    }

    Ok(claims)
}

/// Parse a verification response
pub fn parse_verification(response: &str) -> Result<VerificationOutcome, OracleError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| OracleError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| OracleError::InvalidResponse("Expected JSON object".to_string()))?;

    let summary = obj
        .get("summary")
        .and_then(|v| v.as_str())
        .ok_or_else(|| OracleError::InvalidResponse("Missing or invalid 'summary'".to_string()))?
        .to_string();

    Ok(VerificationOutcome {
        summary,
        is_verified: obj.get("is_verified").and_then(|v| v.as_bool()).unwrap_or(false),
        source_title: obj
            .get("source_title")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        source_url: obj
            .get("source_url")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    })
}

/// Parse a classification response into interaction judgments
///
/// An empty array is a valid "no interactions found" result. Entries with an
/// unparseable id or an unknown interaction kind are dropped; an id that
/// parses but matches no live claim is the merge's problem, not ours.
pub fn parse_interactions(response: &str) -> Result<Vec<Interaction>, OracleError> {
    let entries = parse_array(response)?;

    let mut interactions = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        match parse_interaction(entry) {
            Ok(interaction) => interactions.push(interaction),
            Err(e) => warn!("Skipping interaction judgment {}: {}", idx, e),
        }
    }

    Ok(interactions)
}

/// Extract JSON from a response, handling markdown code blocks
///
/// Language models sometimes wrap JSON in fenced blocks despite being told
/// not to.
fn extract_json(response: &str) -> Result<String, OracleError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(OracleError::InvalidResponse("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_array(response: &str) -> Result<Vec<Value>, OracleError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| OracleError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    json.as_array()
        .cloned()
        .ok_or_else(|| OracleError::InvalidResponse("Expected JSON array".to_string()))
}

fn parse_extracted_claim(json: &Value) -> Result<ExtractedClaim, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Candidate is not a JSON object".to_string())?;

    let claim_text = obj
        .get("claim_text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'claim_text'".to_string())?
        .to_string();

    if claim_text.trim().is_empty() {
        return Err("'claim_text' is empty".to_string());
    }

    // Missing or non-numeric scores default low rather than erroring
    let score = obj.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0);

    Ok(ExtractedClaim {
        claim_text,
        context: obj
            .get("context")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        bias_analysis: obj
            .get("bias_analysis")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        score,
    })
}

fn parse_interaction(json: &Value) -> Result<Interaction, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Judgment is not a JSON object".to_string())?;

    let id_str = obj
        .get("existing_id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'existing_id'".to_string())?;

    let existing_claim_id = ClaimId::from_string(id_str)?;

    let kind: InteractionKind = obj
        .get("interaction")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'interaction'".to_string())?
        .parse()?;

    Ok(Interaction {
        existing_claim_id,
        kind,
        reason: obj
            .get("reason")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
    })
}
