//! Reporting policies for lint violations
//!
//! Reporters decide what happens to each violation a rule produces:
//! surface it immediately as a failure, or render it to a stream and keep
//! counting. Callers choose a policy by picking a variant, not by
//! catching; a failing `report` propagates through the rule's traversal
//! via `?`.

use crate::diagnostics::Violation;
use crate::engine::LintError;
use std::io::{self, Write};

/// Policy object deciding the disposition of each violation
pub trait Reporter {
    /// Handle one violation. An `Err` aborts the current document's run.
    fn report(&mut self, violation: Violation) -> Result<(), LintError>;

    /// Number of violations handled so far
    fn violation_count(&self) -> usize;
}

/// Surfaces the first violation as a failure. Intended for tests that
/// assert "the first (or only) diagnostic equals X".
#[derive(Debug, Default)]
pub struct FailFastReporter;

impl FailFastReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for FailFastReporter {
    fn report(&mut self, violation: Violation) -> Result<(), LintError> {
        Err(LintError::Violation(violation))
    }

    fn violation_count(&self) -> usize {
        0
    }
}

/// Renders each violation as one line to a stream the moment it arrives,
/// keeping a running count. The run always completes.
pub struct PrintingReporter<W: Write> {
    out: W,
    count: usize,
}

impl<W: Write> PrintingReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    /// Consume the reporter, returning the stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl PrintingReporter<io::Stderr> {
    /// A reporter writing to stderr, the conventional CLI disposition
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Reporter for PrintingReporter<W> {
    fn report(&mut self, violation: Violation) -> Result<(), LintError> {
        // Write failures are not a lint condition; surface them as-is.
        writeln!(self.out, "{}", violation).map_err(LintError::Write)?;
        self.count += 1;
        Ok(())
    }

    fn violation_count(&self) -> usize {
        self.count
    }
}

/// Collects violations in memory. Used throughout the test suite to
/// assert on exact ordered sequences.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub violations: Vec<Violation>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, violation: Violation) -> Result<(), LintError> {
        self.violations.push(violation);
        Ok(())
    }

    fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Location;

    fn sample_violation() -> Violation {
        Violation::ForbiddenWord {
            location: Location::default(),
            word: "ethereal".to_string(),
            context: "an ethereal appearance".to_string(),
        }
    }

    #[test]
    fn test_fail_fast_surfaces_first_violation() {
        let mut reporter = FailFastReporter::new();
        let result = reporter.report(sample_violation());

        match result {
            Err(LintError::Violation(v)) => assert_eq!(v, sample_violation()),
            other => panic!("expected Violation error, got {:?}", other),
        }
        assert_eq!(reporter.violation_count(), 0);
    }

    #[test]
    fn test_printing_reporter_writes_and_counts() {
        let mut reporter = PrintingReporter::new(Vec::new());
        reporter.report(sample_violation()).unwrap();
        reporter.report(sample_violation()).unwrap();

        assert_eq!(reporter.violation_count(), 2);
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("Forbidden word: \"ethereal\""));
    }

    #[test]
    fn test_printing_reporter_preserves_order() {
        let mut reporter = PrintingReporter::new(Vec::new());
        for word in ["first", "second", "third"] {
            reporter
                .report(Violation::ForbiddenWord {
                    location: Location::default(),
                    word: word.to_string(),
                    context: String::new(),
                })
                .unwrap();
        }

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
        assert!(lines[2].contains("third"));
    }

    #[test]
    fn test_collecting_reporter() {
        let mut reporter = CollectingReporter::new();
        reporter.report(sample_violation()).unwrap();

        assert_eq!(reporter.violation_count(), 1);
        assert_eq!(reporter.violations[0], sample_violation());
    }
}
