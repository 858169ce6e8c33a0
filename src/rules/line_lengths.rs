//! Line-length checks for verbatim and inline monospace content
//!
//! `screen` is a verbatim multi-line block, so individual long lines are
//! the defect. `computeroutput` is an inline run that many toolchains
//! cannot wrap at all, so any excess total length is the defect there,
//! regardless of embedded line breaks.

use super::Check;
use crate::diagnostics::Violation;
use crate::engine::LintError;
use crate::parser::{Document, NodeRef};
use crate::reporter::Reporter;
use crate::walker::{walk_document, Visitor};

pub struct LineLengths {
    max_line_length: usize,
}

impl LineLengths {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }
}

impl Check for LineLengths {
    fn name(&self) -> &'static str {
        "line-lengths"
    }

    fn check(&self, doc: &Document, reporter: &mut dyn Reporter) -> Result<(), LintError> {
        let mut visitor = LineLengthVisitor {
            max_line_length: self.max_line_length,
            reporter,
        };
        walk_document(doc, &mut visitor)
    }
}

struct LineLengthVisitor<'r> {
    max_line_length: usize,
    reporter: &'r mut dyn Reporter,
}

impl LineLengthVisitor<'_> {
    /// The whole text of the element's first child, if that child is
    /// textual
    fn leading_text<'d>(node: NodeRef<'d>) -> Option<(&'d str, NodeRef<'d>)> {
        let first = node.first_child()?;
        first.text().map(|text| (text, first))
    }
}

impl Visitor for LineLengthVisitor<'_> {
    fn visit_element(&mut self, node: NodeRef<'_>) -> Result<(), LintError> {
        if node.is_named("screen") {
            if let Some((text, _)) = Self::leading_text(node) {
                for line in text.lines() {
                    if line.chars().count() > self.max_line_length {
                        self.reporter.report(Violation::LineTooLong {
                            location: node.location(),
                            line: line.to_string(),
                        })?;
                    }
                }
            }
        } else if node.is_named("computeroutput") {
            if let Some((text, text_node)) = Self::leading_text(node) {
                if text.chars().count() > self.max_line_length {
                    self.reporter.report(Violation::InlineTextTooLong {
                        location: text_node.location(),
                        text: text.to_string(),
                    })?;
                }
            }
        }
        Ok(())
    }
}
