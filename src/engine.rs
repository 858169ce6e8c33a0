//! Linter orchestration
//!
//! Two phases: configure (build the ordered check list from the
//! configuration) then run (load or accept a document, execute each check
//! in order, forward every violation to the reporter). A configured
//! linter is reusable across documents; checks carry no cross-document
//! state.

use crate::config::Config;
use crate::diagnostics::{Location, Violation};
use crate::dictionary::DictionaryProvider;
use crate::parser::{Document, ParseError};
use crate::reporter::Reporter;
use crate::rules::{Check, ForbiddenWords, IdNamingConvention, LineLengths, SpellCheck};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LintError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Include element at {location} has no href attribute")]
    MissingHref { location: Location },
    #[error("Inclusion cycle: {path} is already being expanded")]
    IncludeCycle { path: PathBuf },
    /// A violation surfaced as a failure by the fail-fast reporting policy
    #[error("{0}")]
    Violation(Violation),
    #[error("Failed to write diagnostic: {0}")]
    Write(#[source] std::io::Error),
}

/// The linter: an ordered list of configured checks
pub struct Linter {
    checks: Vec<Box<dyn Check>>,
}

impl Linter {
    /// Build the check list from the configuration. The line-length,
    /// forbidden-words and id-convention checks always run (the
    /// forbidden-word set may be empty); spell check only when enabled.
    pub fn new(config: &Config, dictionaries: Arc<dyn DictionaryProvider>) -> Self {
        let mut checks: Vec<Box<dyn Check>> =
            vec![Box::new(LineLengths::new(config.max_line_length))];

        if config.spell_check {
            checks.push(Box::new(SpellCheck::new(
                config.default_language.clone(),
                config.numeric_tokens,
                dictionaries,
            )));
        }

        checks.push(Box::new(ForbiddenWords::new(
            config.forbidden_words.iter().cloned(),
        )));
        checks.push(Box::new(IdNamingConvention::new()));

        Self { checks }
    }

    /// Parse a file and lint it
    pub fn lint_file(&self, path: &Path, reporter: &mut dyn Reporter) -> Result<(), LintError> {
        let doc = Document::parse_file(path)?;
        self.lint_document(&doc, reporter)
    }

    /// Run every check against a parsed document in list order,
    /// forwarding all violations to the reporter
    pub fn lint_document(
        &self,
        doc: &Document,
        reporter: &mut dyn Reporter,
    ) -> Result<(), LintError> {
        for check in &self.checks {
            check.check(doc, reporter)?;
        }
        Ok(())
    }

    /// Names of the configured checks, in execution order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::MemoryProvider;
    use crate::reporter::{CollectingReporter, FailFastReporter};

    fn provider() -> Arc<dyn DictionaryProvider> {
        Arc::new(MemoryProvider::new().with_language(
            "en_US",
            [
                "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "example", "of",
                "a", "this", "is", "an", "bad", "good", "id",
            ],
        ))
    }

    fn linter(config: &Config) -> Linter {
        Linter::new(config, provider())
    }

    #[test]
    fn test_check_list_with_spellcheck() {
        let config = Config::default();
        assert_eq!(
            linter(&config).check_names(),
            vec![
                "line-lengths",
                "spellcheck",
                "forbidden-words",
                "id-naming-convention"
            ]
        );
    }

    #[test]
    fn test_check_list_without_spellcheck() {
        let config = Config {
            spell_check: false,
            ..Config::default()
        };
        assert_eq!(
            linter(&config).check_names(),
            vec!["line-lengths", "forbidden-words", "id-naming-convention"]
        );
    }

    #[test]
    fn test_clean_document_produces_nothing() {
        let doc = Document::parse_str(
            r#"<article><section id="sn-intro"><para>the quick brown fox</para></section></article>"#,
        )
        .unwrap();
        let mut reporter = CollectingReporter::new();
        linter(&Config::default())
            .lint_document(&doc, &mut reporter)
            .unwrap();

        assert_eq!(reporter.violation_count(), 0);
    }

    #[test]
    fn test_fail_fast_surfaces_first_violation() {
        let doc = Document::parse_str(
            r#"<article><section id="wrong"><para>the fox</para></section></article>"#,
        )
        .unwrap();
        let result = linter(&Config::default()).lint_document(&doc, &mut FailFastReporter::new());

        match result {
            Err(LintError::Violation(Violation::IdPrefixMismatch { id, .. })) => {
                assert_eq!(id, "wrong")
            }
            other => panic!("expected id violation, got {:?}", other),
        }
    }

    #[test]
    fn test_rules_run_in_list_order() {
        // One long screen line, one forbidden word and one bad id: the
        // diagnostics arrive grouped by rule, in configuration order.
        let long = "x".repeat(90);
        let xml = format!(
            r#"<article><section id="wrong"><screen>{}</screen><para>the ethereal fox</para></section></article>"#,
            long
        );
        let doc = Document::parse_str(&xml).unwrap();

        let mut config = Config {
            spell_check: false,
            ..Config::default()
        };
        config.forbidden_words.push("ethereal".to_string());

        let mut reporter = CollectingReporter::new();
        linter(&config).lint_document(&doc, &mut reporter).unwrap();

        assert_eq!(reporter.violations.len(), 3);
        assert!(matches!(reporter.violations[0], Violation::LineTooLong { .. }));
        assert!(matches!(reporter.violations[1], Violation::ForbiddenWord { .. }));
        assert!(matches!(
            reporter.violations[2],
            Violation::IdPrefixMismatch { .. }
        ));
    }

    #[test]
    fn test_two_runs_identical_sequence() {
        let xml = r#"<article><section id="first"><para>the quzck fox</para></section><chapter id="second"/></article>"#;
        let doc = Document::parse_str(xml).unwrap();
        let linter = linter(&Config::default());

        let mut first = CollectingReporter::new();
        linter.lint_document(&doc, &mut first).unwrap();
        let mut second = CollectingReporter::new();
        linter.lint_document(&doc, &mut second).unwrap();

        assert!(!first.violations.is_empty());
        assert_eq!(first.violations, second.violations);
    }

    #[test]
    fn test_linter_reusable_across_documents() {
        let linter = linter(&Config::default());

        let doc1 =
            Document::parse_str(r#"<article><section id="bad1"/></article>"#).unwrap();
        let doc2 =
            Document::parse_str(r#"<article><section id="bad2"/></article>"#).unwrap();

        let mut r1 = CollectingReporter::new();
        linter.lint_document(&doc1, &mut r1).unwrap();
        let mut r2 = CollectingReporter::new();
        linter.lint_document(&doc2, &mut r2).unwrap();

        assert_eq!(r1.violation_count(), 1);
        assert_eq!(r2.violation_count(), 1);
    }

    #[test]
    fn test_lint_missing_file_is_parse_error() {
        let result = linter(&Config::default()).lint_file(
            Path::new("/nonexistent/doc.xml"),
            &mut CollectingReporter::new(),
        );
        assert!(matches!(result, Err(LintError::Parse(_))));
    }
}
