//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use credence_domain::SourceCategory;
use std::path::PathBuf;

/// Credence CLI - Track the credibility of claims across evolving sources.
#[derive(Debug, Parser)]
#[command(name = "credence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Oracle endpoint override (e.g. http://localhost:11434)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Oracle model override (e.g. llama2, mistral)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest files in order, reconciling each against the growing corpus
    Analyze(AnalyzeArgs),

    /// Enter interactive session mode
    Repl,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Files to ingest, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Source category applied to every file
    #[arg(short, long, value_enum, default_value = "news-article")]
    pub category: CategoryArg,

    /// Verify every claim after ingestion
    #[arg(long)]
    pub verify: bool,

    /// Synthesize a report once every file is ingested
    #[arg(short, long)]
    pub report: bool,
}

/// Source category argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CategoryArg {
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

impl From<CategoryArg> for SourceCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::FinancialReport => SourceCategory::FinancialReport,
            CategoryArg::PressRelease => SourceCategory::PressRelease,
            CategoryArg::NewsArticle => SourceCategory::NewsArticle,
            CategoryArg::AcademicPaper => SourceCategory::AcademicPaper,
            CategoryArg::UserInput => SourceCategory::UserInput,
            CategoryArg::SupplementalUpdate => SourceCategory::SupplementalUpdate,
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
