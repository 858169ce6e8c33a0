//! Depth-first tree traversal with transparent XInclude expansion
//!
//! The walker visits every node of a document exactly once, in pre-order.
//! An inclusion reference is never visited itself: the referenced file is
//! loaded as a fresh [`Document`] and its root subtree is walked in the
//! reference's place, so rules observe one logical document regardless of
//! how many physical files it spans. The current document context (base
//! directory for resolving relative references) is threaded explicitly
//! through the recursion.

use crate::engine::LintError;
use crate::parser::{Document, NodeRef};
use std::path::PathBuf;

/// The XInclude namespace; an `include` element in this namespace with an
/// `href` attribute is an inclusion reference.
pub const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";

/// Per-node-kind hooks for a traversal. Rules implement the hooks they
/// care about; the defaults do nothing.
pub trait Visitor {
    fn visit_element(&mut self, _node: NodeRef<'_>) -> Result<(), LintError> {
        Ok(())
    }

    fn visit_textual(&mut self, _node: NodeRef<'_>) -> Result<(), LintError> {
        Ok(())
    }
}

/// Walk a document depth-first, expanding inclusion references in place.
///
/// A missing or unparsable included file fails the whole traversal. An
/// inclusion chain that re-enters a document currently being expanded is
/// reported as [`LintError::IncludeCycle`] rather than recursing forever.
pub fn walk_document(doc: &Document, visitor: &mut dyn Visitor) -> Result<(), LintError> {
    let mut active = Vec::new();
    if let Some(path) = doc.canonical_path() {
        active.push(path);
    }
    walk_node(doc, doc.root(), visitor, &mut active)
}

fn walk_node(
    doc: &Document,
    node: NodeRef<'_>,
    visitor: &mut dyn Visitor,
    active: &mut Vec<PathBuf>,
) -> Result<(), LintError> {
    if node.is_named_ns("include", Some(XINCLUDE_NS)) {
        return expand_include(doc, node, visitor, active);
    }

    if node.is_element() {
        visitor.visit_element(node)?;
        for child in node.children() {
            walk_node(doc, child, visitor, active)?;
        }
    } else if node.is_textual() {
        visitor.visit_textual(node)?;
    }

    Ok(())
}

fn expand_include(
    doc: &Document,
    node: NodeRef<'_>,
    visitor: &mut dyn Visitor,
    active: &mut Vec<PathBuf>,
) -> Result<(), LintError> {
    let href = node.attribute("href").ok_or_else(|| LintError::MissingHref {
        location: node.location(),
    })?;

    let target = doc.resolve_reference(href);

    // Canonicalised for cycle detection; a path that cannot be
    // canonicalised cannot be read either, so let the parse surface it.
    if let Ok(canonical) = target.canonicalize() {
        if active.contains(&canonical) {
            return Err(LintError::IncludeCycle { path: target });
        }
        active.push(canonical);
        let included = Document::parse_file(&target)?;
        let result = walk_node(&included, included.root(), visitor, active);
        active.pop();
        result
    } else {
        let included = Document::parse_file(&target)?;
        walk_node(&included, included.root(), visitor, active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Records the visit sequence as tag names / text payloads
    #[derive(Default)]
    struct TraceVisitor {
        visits: Vec<String>,
    }

    impl Visitor for TraceVisitor {
        fn visit_element(&mut self, node: NodeRef<'_>) -> Result<(), LintError> {
            self.visits.push(format!("<{}>", node.tag_name().unwrap()));
            Ok(())
        }

        fn visit_textual(&mut self, node: NodeRef<'_>) -> Result<(), LintError> {
            self.visits.push(node.text().unwrap().trim().to_string());
            Ok(())
        }
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_preorder_traversal() {
        let doc = Document::parse_str(
            "<article><title>t</title><section><para>p</para></section></article>",
        )
        .unwrap();
        let mut visitor = TraceVisitor::default();
        walk_document(&doc, &mut visitor).unwrap();

        assert_eq!(
            visitor.visits,
            vec!["<article>", "<title>", "t", "<section>", "<para>", "p"]
        );
    }

    #[test]
    fn test_include_substitutes_referenced_content() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "chapter.xml", "<chapter><para>included</para></chapter>");
        let main = write_file(
            &dir,
            "main.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude">
<xi:include href="chapter.xml"/>
</book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let mut visitor = TraceVisitor::default();
        walk_document(&doc, &mut visitor).unwrap();

        let elements: Vec<&String> = visitor
            .visits
            .iter()
            .filter(|v| v.starts_with('<'))
            .collect();
        assert_eq!(elements, ["<book>", "<chapter>", "<para>"]);
        assert!(visitor.visits.iter().any(|v| v == "included"));
    }

    #[test]
    fn test_include_children_not_visited() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "chapter.xml", "<chapter/>");
        let main = write_file(
            &dir,
            "main.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude">
<xi:include href="chapter.xml"><xi:fallback><para>fallback</para></xi:fallback></xi:include>
</book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let mut visitor = TraceVisitor::default();
        walk_document(&doc, &mut visitor).unwrap();

        assert!(!visitor.visits.iter().any(|v| v.contains("fallback")));
        assert!(visitor.visits.contains(&"<chapter>".to_string()));
    }

    #[test]
    fn test_nested_includes() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "inner.xml", "<para>deep</para>");
        write_file(
            &dir,
            "middle.xml",
            r#"<chapter xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="inner.xml"/></chapter>"#,
        );
        let main = write_file(
            &dir,
            "main.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="middle.xml"/></book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let mut visitor = TraceVisitor::default();
        walk_document(&doc, &mut visitor).unwrap();

        assert!(visitor.visits.iter().any(|v| v == "deep"));
    }

    #[test]
    fn test_missing_included_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let main = write_file(
            &dir,
            "main.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="absent.xml"/></book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let mut visitor = TraceVisitor::default();
        let result = walk_document(&doc, &mut visitor);

        assert!(matches!(result, Err(LintError::Parse(_))));
    }

    #[test]
    fn test_unparsable_included_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "broken.xml", "<chapter><para></chapter>");
        let main = write_file(
            &dir,
            "main.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="broken.xml"/></book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let result = walk_document(&doc, &mut TraceVisitor::default());
        assert!(matches!(result, Err(LintError::Parse(_))));
    }

    #[test]
    fn test_missing_href_is_an_error() {
        let doc = Document::parse_str(
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include/></book>"#,
        )
        .unwrap();
        let result = walk_document(&doc, &mut TraceVisitor::default());
        assert!(matches!(result, Err(LintError::MissingHref { .. })));
    }

    #[test]
    fn test_include_cycle_detected() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "a.xml",
            r#"<chapter xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="b.xml"/></chapter>"#,
        );
        write_file(
            &dir,
            "b.xml",
            r#"<chapter xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="a.xml"/></chapter>"#,
        );

        let doc = Document::parse_file(&dir.path().join("a.xml")).unwrap();
        let result = walk_document(&doc, &mut TraceVisitor::default());
        assert!(matches!(result, Err(LintError::IncludeCycle { .. })));
    }

    #[test]
    fn test_self_include_detected() {
        let dir = TempDir::new().unwrap();
        let main = write_file(
            &dir,
            "self.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude"><xi:include href="self.xml"/></book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let result = walk_document(&doc, &mut TraceVisitor::default());
        assert!(matches!(result, Err(LintError::IncludeCycle { .. })));
    }

    #[test]
    fn test_repeated_non_cyclic_include_is_fine() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "shared.xml", "<para>shared</para>");
        let main = write_file(
            &dir,
            "main.xml",
            r#"<book xmlns:xi="http://www.w3.org/2001/XInclude">
<xi:include href="shared.xml"/>
<xi:include href="shared.xml"/>
</book>"#,
        );

        let doc = Document::parse_file(&main).unwrap();
        let mut visitor = TraceVisitor::default();
        walk_document(&doc, &mut visitor).unwrap();

        let count = visitor.visits.iter().filter(|v| *v == "shared").count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_plain_include_element_without_namespace_is_ordinary() {
        let doc = Document::parse_str("<book><include href=\"x\"/></book>").unwrap();
        let mut visitor = TraceVisitor::default();
        walk_document(&doc, &mut visitor).unwrap();

        // Not in the XInclude namespace, so it is just an element.
        assert_eq!(visitor.visits, vec!["<book>", "<include>"]);
    }
}
