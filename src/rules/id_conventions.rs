//! Id naming-convention check
//!
//! Documentation ids follow a fixed tag-to-prefix scheme (the Fedora
//! documentation convention). Tags outside the table are never checked,
//! and an element without an `id` attribute is never flagged.

use super::Check;
use crate::diagnostics::Violation;
use crate::engine::LintError;
use crate::parser::{Document, NodeRef};
use crate::reporter::Reporter;
use crate::walker::{walk_document, Visitor};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Required id prefix per element tag
static PREFIX_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("preface", "pr-"),
        ("chapter", "ch-"),
        ("section", "sn-"),
        ("sect1", "s1-"),
        ("sect2", "s2-"),
        ("sect3", "s3-"),
        ("sect4", "s4-"),
        ("figure", "fig-"),
        ("table", "tb-"),
        ("appendix", "ap-"),
        ("part", "pt-"),
        ("example", "ex-"),
    ])
});

#[derive(Default)]
pub struct IdNamingConvention;

impl IdNamingConvention {
    pub fn new() -> Self {
        Self
    }
}

impl Check for IdNamingConvention {
    fn name(&self) -> &'static str {
        "id-naming-convention"
    }

    fn check(&self, doc: &Document, reporter: &mut dyn Reporter) -> Result<(), LintError> {
        let mut visitor = IdConventionVisitor { reporter };
        walk_document(doc, &mut visitor)
    }
}

struct IdConventionVisitor<'r> {
    reporter: &'r mut dyn Reporter,
}

impl Visitor for IdConventionVisitor<'_> {
    fn visit_element(&mut self, node: NodeRef<'_>) -> Result<(), LintError> {
        let Some(id) = node.attribute("id") else {
            return Ok(());
        };
        let Some(tag) = node.tag_name() else {
            return Ok(());
        };
        if let Some(expected_prefix) = PREFIX_TABLE.get(tag) {
            if !id.starts_with(expected_prefix) {
                self.reporter.report(Violation::IdPrefixMismatch {
                    location: node.location(),
                    tag: tag.to_string(),
                    id: id.to_string(),
                    expected_prefix: (*expected_prefix).to_string(),
                })?;
            }
        }
        Ok(())
    }
}
