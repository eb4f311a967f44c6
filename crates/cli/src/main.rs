use anyhow::{Context, Result};
use capture_renamer_core::{
    DefaultAnswer, ExifReader, Flow, LinePrompt, PathError, RenameEngine, RenameOptions,
    RenameStats,
};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "capture-renamer", version)]
#[command(about = "Rename image files to the date and time they were taken")]
struct Cli {
    /// Files or directories to rename
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,
    /// Recurse into subdirectories of directory arguments
    #[arg(short, long, default_value_t = false)]
    recursive: bool,
    /// Rename without asking for confirmation
    #[arg(short, long, default_value_t = false)]
    force: bool,
    /// Report every file examined
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Answer assumed for an empty confirmation response
    #[arg(long, value_enum, default_value_t = Answer::No)]
    default_answer: Answer,
    /// Format of the end-of-run summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Answer {
    Yes,
    No,
}

impl From<Answer> for DefaultAnswer {
    fn from(value: Answer) -> Self {
        match value {
            Answer::Yes => DefaultAnswer::Yes,
            Answer::No => DefaultAnswer::No,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Ctrl-C at a prompt ends the run the same way closed input does.
    ctrlc::set_handler(|| {
        let _ = writeln!(io::stdout());
        std::process::exit(0);
    })
    .context("failed to install interrupt handler")?;

    let options = RenameOptions {
        force: cli.force,
        verbose: cli.verbose,
        default_answer: cli.default_answer.into(),
    };

    let reader = ExifReader;
    let mut prompt = LinePrompt::new(io::stdin().lock(), io::stdout(), options.default_answer);
    let mut out = io::stdout();
    let mut engine = RenameEngine::new(&reader, &mut prompt, &mut out, options);

    let mut missing = 0usize;
    for path in &cli.paths {
        match engine.rename_path(path, cli.recursive) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Cancelled) => {
                // Leave the dangling prompt on its own line.
                println!();
                break;
            }
            Err(err) => match err.downcast_ref::<PathError>() {
                Some(path_err) => {
                    eprintln!("error: {path_err}");
                    missing += 1;
                }
                None => return Err(err),
            },
        }
    }

    let stats = engine.into_stats();
    print_summary(&stats, cli.output, cli.verbose)?;

    if missing > 0 || stats.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(stats: &RenameStats, output: OutputFormat, verbose: bool) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        OutputFormat::Text if verbose => {
            eprintln!(
                "summary: examined={} renamed={} non_image={} no_date={} malformed={} unchanged={} declined={} exists={} failed={}",
                stats.examined,
                stats.renamed,
                stats.skipped_non_image,
                stats.skipped_no_date,
                stats.skipped_malformed,
                stats.unchanged,
                stats.declined,
                stats.target_exists,
                stats.failed
            );
        }
        OutputFormat::Text => {}
    }
    Ok(())
}
