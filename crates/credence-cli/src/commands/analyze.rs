//! One-shot analysis: ingest files in order, optionally verify and report.

use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::output::Formatter;
use credence_domain::traits::LanguageModel;
use credence_engine::Engine;
use credence_store::SourceSpec;

/// Execute the analyze command.
///
/// Files are ingested in argument order, so later files are reconciled
/// against the claims extracted from earlier ones.
pub async fn execute_analyze<L>(
    args: AnalyzeArgs,
    engine: &Engine<L>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    for file in &args.files {
        let text = std::fs::read_to_string(file)?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let outcome = engine
            .ingest(SourceSpec {
                name: name.clone(),
                category: args.category.into(),
                raw_content: text,
            })
            .await?;

        let suffix = if outcome.merged {
            ", reconciled against the corpus"
        } else {
            ""
        };
        println!(
            "{}",
            formatter.success(&format!(
                "Ingested {}: {} new claims{}",
                name,
                outcome.new_claims.len(),
                suffix
            ))
        );
    }

    if args.verify {
        let claims = engine.claims()?;
        println!(
            "{}",
            formatter.info(&format!("Verifying {} claims...", claims.len()))
        );
        for claim in claims {
            let updated = engine.verify_claim(claim.id).await?;
            println!(
                "{}",
                formatter.info(&format!(
                    "{}: {} ({}) - {}",
                    &updated.id.to_string()[..8],
                    updated.credibility_score,
                    updated.credibility_level,
                    updated.status
                ))
            );
        }
    }

    println!();
    println!("{}", formatter.format_claims(&engine.claims()?)?);

    if args.report {
        println!();
        println!("{}", formatter.info("Synthesizing report..."));
        println!();
        println!("{}", engine.report().await?);
    }

    Ok(())
}
