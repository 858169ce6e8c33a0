//! The checks the linter runs, plus shared tokenisation helpers
//!
//! Each check is independently configurable, carries no cross-document
//! state, and produces zero or more violations through the reporter it is
//! handed. Checks traverse the document themselves via the walker, so an
//! inclusion-expanded document looks to every check like one physical
//! file.

mod forbidden_words;
mod id_conventions;
mod line_lengths;
mod spellcheck;

pub use forbidden_words::ForbiddenWords;
pub use id_conventions::IdNamingConvention;
pub use line_lengths::LineLengths;
pub use spellcheck::SpellCheck;

use crate::engine::LintError;
use crate::parser::Document;
use crate::reporter::Reporter;

/// One independent check over a document tree
pub trait Check {
    /// Stable identifier, used in verbose output
    fn name(&self) -> &'static str;

    /// Run the check over the whole (inclusion-expanded) document,
    /// forwarding every violation to the reporter.
    fn check(&self, doc: &Document, reporter: &mut dyn Reporter) -> Result<(), LintError>;
}

/// Punctuation trimmed from spell-check tokens
pub(crate) const SPELL_TRIM: &[char] = &[' ', '.', ',', '(', ')', '-', ':', ';', '<', '>'];

/// Narrower punctuation set trimmed from forbidden-word tokens
pub(crate) const FORBIDDEN_TRIM: &[char] = &[' ', '.', ',', '(', ')', '-', ':', ';'];

/// Tokenise a merged text run: split on line breaks, then on whitespace,
/// then trim each token of the given punctuation set. Empty tokens are
/// dropped.
pub(crate) fn tokenize<'t>(text: &'t str, trim: &'t [char]) -> impl Iterator<Item = &'t str> {
    text.lines()
        .flat_map(|line| line.trim().split_whitespace())
        .map(move |token| token.trim_matches(|c| trim.contains(&c)))
        .filter(|token| !token.is_empty())
}
