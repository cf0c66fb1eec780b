//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The corpus lives for the lifetime of the process, so the REPL is the
//! natural way to run multiple ingestion rounds, verify individual claims,
//! and watch credibility evolve between them.

use crate::cli::CategoryArg;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use credence_domain::traits::LanguageModel;
use credence_engine::Engine;
use credence_store::SourceSpec;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl<L>(engine: &Engine<L>, formatter: &Formatter) -> Result<()>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    println!(
        "{}",
        formatter.info("Credence REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("credence> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, engine, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
enum ReplCommand {
    Ingest { category: CategoryArg, file: PathBuf },
    Claims,
    Sources,
    Verify { id_prefix: String },
    Report,
    Help,
    Exit,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "ingest" => parse_ingest_command(&parts[1..]),
        "claims" => Ok(ReplCommand::Claims),
        "sources" => Ok(ReplCommand::Sources),
        "verify" => {
            let id_prefix = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: verify <claim-id>".to_string()))?;
            Ok(ReplCommand::Verify {
                id_prefix: id_prefix.to_string(),
            })
        }
        "report" => Ok(ReplCommand::Report),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_ingest_command(args: &[&str]) -> Result<ReplCommand> {
    if args.len() < 2 {
        return Err(CliError::InvalidInput(
            "Usage: ingest <category> <file>".to_string(),
        ));
    }

    let category = parse_category_arg(args[0]).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown category: {}. Expected one of financial-report, press-release, \
             news-article, academic-paper, user-input, supplemental-update.",
            args[0]
        ))
    })?;

    Ok(ReplCommand::Ingest {
        category,
        file: PathBuf::from(args[1]),
    })
}

/// Execute a REPL command.
async fn execute_repl_command<L>(
    cmd: ReplCommand,
    engine: &Engine<L>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LanguageModel + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    match cmd {
        ReplCommand::Ingest { category, file } => {
            let text = std::fs::read_to_string(&file)?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            let outcome = engine
                .ingest(SourceSpec {
                    name: name.clone(),
                    category: category.into(),
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
                    "Ingested {}: {} new claims{} ({} total)",
                    name,
                    outcome.new_claims.len(),
                    suffix,
                    outcome.total_claims
                ))
            );
        }
        ReplCommand::Claims => {
            println!("{}", formatter.format_claims(&engine.claims()?)?);
        }
        ReplCommand::Sources => {
            println!("{}", formatter.format_sources(&engine.sources()?)?);
        }
        ReplCommand::Verify { id_prefix } => {
            let claim = engine
                .find_claim(&id_prefix)?
                .ok_or(CliError::NoSuchClaim(id_prefix))?;
            println!("{}", formatter.info("Verifying, this may take a moment..."));

            let updated = engine.verify_claim(claim.id).await?;
            print!("{}", formatter.format_claim_detail(&updated));
        }
        ReplCommand::Report => {
            println!("{}", formatter.info("Synthesizing report..."));
            println!();
            println!("{}", engine.report().await?);
        }
        ReplCommand::Help | ReplCommand::Exit => unreachable!(),
    }

    Ok(())
}

fn parse_category_arg(s: &str) -> Option<CategoryArg> {
    match s.to_lowercase().as_str() {
        "financial-report" => Some(CategoryArg::FinancialReport),
        "press-release" => Some(CategoryArg::PressRelease),
        "news-article" => Some(CategoryArg::NewsArticle),
        "academic-paper" => Some(CategoryArg::AcademicPaper),
        "user-input" => Some(CategoryArg::UserInput),
        "supplemental-update" => Some(CategoryArg::SupplementalUpdate),
        _ => None,
    }
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let credence_dir = home.join(".credence");
    std::fs::create_dir_all(&credence_dir)?;
    Ok(credence_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  ingest <category> <file>  - Extract claims from a file and reconcile them");
    println!("    category: financial-report | press-release | news-article |");
    println!("              academic-paper | user-input | supplemental-update");
    println!("  claims                    - List the current claim corpus");
    println!("  sources                   - List ingested sources");
    println!("  verify <claim-id>         - Verify one claim (id prefix is enough)");
    println!("  report                    - Synthesize a prose report from the corpus");
    println!("  help, ?                   - Show this help");
    println!("  exit, quit, q             - Exit REPL");
    println!();
}
