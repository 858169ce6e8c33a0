//! docbook-lint CLI entry point

use clap::Parser;
use docbook_lint::{
    dictionary, CliOptions, Config, Linter, NumericTokens, PrintingReporter, Reporter,
};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "docbook-lint")]
#[command(author, version, about = "A linter for DocBook-like documentation XML", long_about = None)]
struct Cli {
    /// XML files to lint (glob patterns accepted)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Config file path (default: auto-detect .docbooklintrc.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum line length for <screen> and <computeroutput> checks
    #[arg(short = 'l', long, value_name = "N")]
    max_line_length: Option<usize>,

    /// Disable spell checking
    #[arg(long)]
    no_spellcheck: bool,

    /// Default language code for spell checking
    #[arg(long, value_name = "CODE")]
    language: Option<String>,

    /// Forbid a word (can be used multiple times)
    #[arg(long = "forbid", value_name = "WORD")]
    forbidden_words: Vec<String>,

    /// Numeric tokens the spell check skips
    #[arg(long, value_enum, value_name = "PATTERN")]
    numeric_tokens: Option<NumericFilter>,

    /// Directory of per-language word lists
    #[arg(long, env = "DOCBOOK_LINT_DICTIONARIES", value_name = "DIR")]
    dict_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum NumericFilter {
    Digits,
    Decimal,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load or create configuration
    let mut config = if let Some(ref config_path) = cli.config {
        Config::from_file(config_path).into_diagnostic()?
    } else {
        let start_dir = std::env::current_dir().into_diagnostic()?;
        match Config::find_and_load(&start_dir) {
            Ok(Some((path, cfg))) => {
                if cli.verbose {
                    eprintln!("Using config: {}", path.display());
                }
                cfg
            }
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("Warning: Failed to load config: {}", e);
                Config::default()
            }
        }
    };

    config.merge_cli(CliOptions {
        max_line_length: cli.max_line_length,
        spell_check: cli.no_spellcheck.then_some(false),
        default_language: cli.language,
        forbidden_words: cli.forbidden_words,
        numeric_tokens: cli.numeric_tokens.map(|n| match n {
            NumericFilter::Digits => NumericTokens::Digits,
            NumericFilter::Decimal => NumericTokens::DigitsAndDecimal,
        }),
        dictionary_dir: cli.dict_dir,
        verbose: cli.verbose,
    });

    let dictionaries = Arc::new(dictionary::default_provider(
        config.dictionary_dir.as_deref(),
    ));
    let linter = Linter::new(&config, dictionaries);

    if config.verbose {
        eprintln!("Checks: {}", linter.check_names().join(", "));
    }

    // Collect files to lint, expanding glob patterns
    let mut files_to_lint = Vec::new();
    for pattern in &cli.files {
        let pattern_str = pattern.to_string_lossy();
        if pattern_str.contains('*') {
            for entry in glob::glob(&pattern_str).into_diagnostic()? {
                files_to_lint.push(entry.into_diagnostic()?);
            }
        } else {
            files_to_lint.push(pattern.clone());
        }
    }

    if files_to_lint.is_empty() {
        eprintln!("No files to lint");
        return Ok(ExitCode::from(0));
    }

    let mut total_violations = 0usize;
    let mut fatal_errors = 0usize;

    // One reporter per file; a file that fails to parse is reported and
    // does not abort the remaining files.
    for file in &files_to_lint {
        if config.verbose {
            eprintln!("Linting: {}", file.display());
        }

        let mut reporter = PrintingReporter::stderr();
        match linter.lint_file(file, &mut reporter) {
            Ok(()) => total_violations += reporter.violation_count(),
            Err(e) => {
                eprintln!("Failed to lint {}: {}", file.display(), e);
                total_violations += reporter.violation_count();
                fatal_errors += 1;
            }
        }
    }

    if config.verbose {
        let file_count = files_to_lint.len();
        let file_word = if file_count == 1 { "file" } else { "files" };
        eprintln!(
            "Found {} problem{} in {} {}",
            total_violations,
            if total_violations == 1 { "" } else { "s" },
            file_count,
            file_word
        );
    }

    if fatal_errors > 0 {
        Ok(ExitCode::from(2))
    } else if total_violations > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::from(0))
    }
}
