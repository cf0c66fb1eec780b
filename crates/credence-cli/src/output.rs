//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use credence_domain::{Claim, ClaimStatus, Source};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format claims output.
    pub fn format_claims(&self, claims: &[Claim]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_claims_json(claims),
            OutputFormat::Table => self.format_claims_table(claims),
            OutputFormat::Quiet => self.format_claims_quiet(claims),
        }
    }

    /// Format claims as JSON.
    fn format_claims_json(&self, claims: &[Claim]) -> Result<String> {
        let json_claims: Vec<serde_json::Value> = claims
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id.to_string(),
                    "text": c.text,
                    "original_text": c.original_text,
                    "source_id": c.source_id.to_string(),
                    "credibility_score": c.credibility_score,
                    "credibility_level": c.credibility_level.as_str(),
                    "status": c.status.as_str(),
                    "bias_analysis": c.bias_analysis,
                    "verification": c.verification.as_ref().map(|v| {
                        serde_json::json!({
                            "is_verified": v.is_verified,
                            "summary": v.summary,
                            "source_title": v.source_title,
                            "source_url": v.source_url,
                        })
                    }),
                    "is_new": c.is_new,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_claims)?)
    }

    /// Format claims as a table.
    fn format_claims_table(&self, claims: &[Claim]) -> Result<String> {
        if claims.is_empty() {
            return Ok(self.colorize("No claims in the corpus.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Score", "Level", "Status", "New", "Claim"]);

        for claim in claims {
            builder.push_record([
                &claim.id.to_string()[..8], // Truncate ID for readability
                &claim.credibility_score.to_string(),
                claim.credibility_level.as_str(),
                claim.status.as_str(),
                if claim.is_new { "*" } else { "" },
                &truncate(&claim.text, 48),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format claims in quiet mode (IDs only).
    fn format_claims_quiet(&self, claims: &[Claim]) -> Result<String> {
        let ids: Vec<String> = claims.iter().map(|c| c.id.to_string()).collect();
        Ok(ids.join("\n"))
    }

    /// Format sources as a table.
    pub fn format_sources(&self, sources: &[Source]) -> Result<String> {
        if sources.is_empty() {
            return Ok(self.colorize("No sources ingested.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Category", "Ingested at"]);

        for source in sources {
            builder.push_record([
                &source.id.to_string()[..8],
                &source.name,
                source.category.as_str(),
                &source.ingested_at.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format the full detail view of a single claim.
    pub fn format_claim_detail(&self, claim: &Claim) -> String {
        let mut out = String::new();
        out.push_str(&format!("Claim {}\n", claim.id));
        out.push_str(&format!("  Text:   {}\n", claim.text));
        out.push_str(&format!(
            "  Score:  {} ({}) - {}\n",
            claim.credibility_score, claim.credibility_level, claim.status
        ));
        out.push_str(&format!("  Bias:   {}\n", claim.bias_analysis));
        match &claim.verification {
            Some(v) => {
                out.push_str(&format!(
                    "  Verification: {} ({})\n",
                    v.summary,
                    if v.is_verified { "verified" } else { "not verified" }
                ));
                if let Some(title) = &v.source_title {
                    out.push_str(&format!("  Evidence: {}\n", title));
                }
                if let Some(url) = &v.source_url {
                    out.push_str(&format!("  URL: {}\n", url));
                }
            }
            None => out.push_str("  Verification: none\n"),
        }
        if claim.status == ClaimStatus::Flagged {
            out.push_str(&format!("  {}\n", self.warning("flagged for low credibility")));
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Apply color if enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Truncate a string for table display.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
