//! Source module - units of ingested text

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a source based on UUIDv7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u128);

impl SourceId {
    /// Generate a new UUIDv7-based SourceId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SourceId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Category of an ingested source, used to bias interpretation during
/// extraction (a press release reads differently from an academic paper)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    /// Quarterly or annual financial report
    FinancialReport,
    /// Corporate press release
    PressRelease,
    /// Journalistic coverage
    NewsArticle,
    /// Peer-reviewed or preprint academic work
    AcademicPaper,
    /// Text supplied directly by the user
    UserInput,
    /// Follow-up material updating an earlier source
    SupplementalUpdate,
}

impl SourceCategory {
    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCategory::FinancialReport => "financial-report",
            SourceCategory::PressRelease => "press-release",
            SourceCategory::NewsArticle => "news-article",
            SourceCategory::AcademicPaper => "academic-paper",
            SourceCategory::UserInput => "user-input",
            SourceCategory::SupplementalUpdate => "supplemental-update",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financial-report" => Ok(SourceCategory::FinancialReport),
            "press-release" => Ok(SourceCategory::PressRelease),
            "news-article" => Ok(SourceCategory::NewsArticle),
            "academic-paper" => Ok(SourceCategory::AcademicPaper),
            "user-input" => Ok(SourceCategory::UserInput),
            "supplemental-update" => Ok(SourceCategory::SupplementalUpdate),
            _ => Err(format!("Unknown source category: {}", s)),
        }
    }
}

/// A unit of ingested text
///
/// Immutable once created. Identity is the `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Unique identifier
    pub id: SourceId,

    /// Human-readable name (file name, headline, ...)
    pub name: String,

    /// Category used to bias interpretation
    pub category: SourceCategory,

    /// The ingested text itself
    pub raw_content: String,

    /// When this source was ingested (seconds since Unix epoch)
    pub ingested_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            SourceCategory::FinancialReport,
            SourceCategory::PressRelease,
            SourceCategory::NewsArticle,
            SourceCategory::AcademicPaper,
            SourceCategory::UserInput,
            SourceCategory::SupplementalUpdate,
        ] {
            let parsed: SourceCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!("tabloid".parse::<SourceCategory>().is_err());
        assert!("".parse::<SourceCategory>().is_err());
    }

    #[test]
    fn test_source_id_uniqueness() {
        let a = SourceId::new();
        let b = SourceId::new();
        assert_ne!(a, b);
    }
}
