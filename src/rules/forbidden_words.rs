//! Forbidden-word scan
//!
//! Flags configured words wherever they appear verbatim, including inside
//! code samples; there is no exclusion list, unlike the spell check.

use super::{tokenize, Check, FORBIDDEN_TRIM};
use crate::diagnostics::{context_snippet, Violation};
use crate::engine::LintError;
use crate::parser::{Document, NodeRef};
use crate::reporter::Reporter;
use crate::walker::{walk_document, Visitor};
use std::collections::HashSet;

pub struct ForbiddenWords {
    words: HashSet<String>,
}

impl ForbiddenWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl Check for ForbiddenWords {
    fn name(&self) -> &'static str {
        "forbidden-words"
    }

    fn check(&self, doc: &Document, reporter: &mut dyn Reporter) -> Result<(), LintError> {
        if self.words.is_empty() {
            // Still a configured rule; just nothing to find.
            return Ok(());
        }
        let mut visitor = ForbiddenWordsVisitor {
            words: &self.words,
            reporter,
        };
        walk_document(doc, &mut visitor)
    }
}

struct ForbiddenWordsVisitor<'a> {
    words: &'a HashSet<String>,
    reporter: &'a mut dyn Reporter,
}

impl Visitor for ForbiddenWordsVisitor<'_> {
    fn visit_textual(&mut self, node: NodeRef<'_>) -> Result<(), LintError> {
        let text = node.text().unwrap_or("");
        for word in tokenize(text, FORBIDDEN_TRIM) {
            if self.words.contains(word) {
                self.reporter.report(Violation::ForbiddenWord {
                    location: node.location(),
                    word: word.to_string(),
                    context: context_snippet(text, 100),
                })?;
            }
        }
        Ok(())
    }
}
