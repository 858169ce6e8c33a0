//! XML parser - parses documentation sources into a lintable node arena
//!
//! roxmltree borrows from the input string, so the borrowed tree is
//! converted into an owned arena here. Documents and the diagnostics
//! derived from them then carry no lifetime entanglement, which matters
//! once the walker starts loading included files mid-traversal.

use crate::diagnostics::Location;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    ParseXml {
        path: PathBuf,
        source: roxmltree::Error,
    },
}

/// Node payload. CDATA sections surface as text nodes (roxmltree
/// behaviour), and adjacent text/CDATA children are merged at parse time,
/// so a `Text` node's payload is the whole merged run.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element {
        /// Local tag name
        name: String,
        /// Namespace URI, if the element is namespace-qualified
        namespace: Option<String>,
        /// Attributes keyed by local name. Lookups like `lang` therefore
        /// also find `xml:lang`; when both are present on one element, the
        /// later attribute in document order wins.
        attributes: HashMap<String, String>,
    },
    Text(String),
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Parent node index (None for the root element)
    pub parent: Option<usize>,
    /// Child node indices in sibling order
    pub children: Vec<usize>,
    /// Source location (1-based)
    pub line: usize,
    pub column: usize,
}

/// A parsed document: the node arena plus its originating path and the
/// base directory used to resolve relative inclusion references.
#[derive(Debug)]
pub struct Document {
    /// Originating file path (empty for in-memory sources)
    pub path: PathBuf,
    /// Directory that relative `href` values resolve against
    pub base_dir: PathBuf,
    nodes: Vec<NodeData>,
}

impl Document {
    /// Parse a file on disk
    pub fn parse_file(path: &Path) -> Result<Self, ParseError> {
        let source = fs::read_to_string(path).map_err(|source| ParseError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::parse_source(&source, path.to_path_buf(), base_dir)
    }

    /// Parse XML from a string. Relative inclusion references resolve
    /// against the current directory.
    pub fn parse_str(source: &str) -> Result<Self, ParseError> {
        Self::parse_source(source, PathBuf::new(), PathBuf::from("."))
    }

    fn parse_source(source: &str, path: PathBuf, base_dir: PathBuf) -> Result<Self, ParseError> {
        let doc = roxmltree::Document::parse(source).map_err(|source| ParseError::ParseXml {
            path: if path.as_os_str().is_empty() {
                PathBuf::from("<string>")
            } else {
                path.clone()
            },
            source,
        })?;

        let mut nodes = Vec::new();
        build_element(doc.root_element(), &mut nodes, None);

        Ok(Self {
            path,
            base_dir,
            nodes,
        })
    }

    /// The root element of the document
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            index: 0,
        }
    }

    /// Get a node handle by arena index
    pub fn node(&self, index: usize) -> Option<NodeRef<'_>> {
        (index < self.nodes.len()).then_some(NodeRef { doc: self, index })
    }

    /// Total node count (elements plus merged text runs)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolve an inclusion reference: absolute paths are used verbatim,
    /// relative paths are joined to the base directory.
    pub fn resolve_reference(&self, href: &str) -> PathBuf {
        let href_path = Path::new(href);
        if href_path.is_absolute() {
            href_path.to_path_buf()
        } else {
            self.base_dir.join(href_path)
        }
    }

    /// Canonical path of the backing file, if the document came from disk
    pub fn canonical_path(&self) -> Option<PathBuf> {
        if self.path.as_os_str().is_empty() {
            None
        } else {
            fs::canonicalize(&self.path).ok()
        }
    }

    fn data(&self, index: usize) -> &NodeData {
        &self.nodes[index]
    }
}

/// Build an element and its subtree into the arena, coalescing runs of
/// adjacent text/CDATA children into single text nodes.
fn build_element(
    node: roxmltree::Node<'_, '_>,
    nodes: &mut Vec<NodeData>,
    parent: Option<usize>,
) -> usize {
    let pos = node.document().text_pos_at(node.range().start);

    let attributes: HashMap<String, String> = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    let index = nodes.len();
    nodes.push(NodeData {
        kind: NodeKind::Element {
            name: node.tag_name().name().to_string(),
            namespace: node.tag_name().namespace().map(str::to_string),
            attributes,
        },
        parent,
        children: Vec::new(),
        line: pos.row as usize,
        column: pos.col as usize,
    });

    let mut children = Vec::new();
    let mut pending_text: Option<(String, usize, usize)> = None;

    for child in node.children() {
        if child.is_text() {
            let piece = child.text().unwrap_or("");
            match pending_text {
                Some((ref mut text, _, _)) => text.push_str(piece),
                None => {
                    let pos = child.document().text_pos_at(child.range().start);
                    pending_text = Some((piece.to_string(), pos.row as usize, pos.col as usize));
                }
            }
            continue;
        }

        if let Some((text, line, column)) = pending_text.take() {
            children.push(push_text(nodes, text, line, column, index));
        }

        if child.is_element() {
            children.push(build_element(child, nodes, Some(index)));
        }
        // Comments and processing instructions are dropped from the arena.
    }

    if let Some((text, line, column)) = pending_text.take() {
        children.push(push_text(nodes, text, line, column, index));
    }

    nodes[index].children = children;
    index
}

fn push_text(nodes: &mut Vec<NodeData>, text: String, line: usize, column: usize, parent: usize) -> usize {
    let index = nodes.len();
    nodes.push(NodeData {
        kind: NodeKind::Text(text),
        parent: Some(parent),
        children: Vec::new(),
        line,
        column,
    });
    index
}

/// A cheap, copyable handle into a document's node arena
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'doc> {
    doc: &'doc Document,
    index: usize,
}

impl<'doc> NodeRef<'doc> {
    /// The document this node belongs to
    pub fn document(&self) -> &'doc Document {
        self.doc
    }

    pub fn kind(&self) -> &'doc NodeKind {
        &self.doc.data(self.index).kind
    }

    /// True for text and CDATA nodes
    pub fn is_textual(&self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element { .. })
    }

    /// True iff this is an element with the given local name. The
    /// namespace is deliberately ignored, matching non-namespaced legacy
    /// documents; use [`is_named_ns`](Self::is_named_ns) for a
    /// namespace-aware match.
    pub fn is_named(&self, name: &str) -> bool {
        self.tag_name() == Some(name)
    }

    /// Namespace-aware variant of [`is_named`](Self::is_named)
    pub fn is_named_ns(&self, name: &str, namespace: Option<&str>) -> bool {
        self.is_named(name) && self.namespace() == namespace
    }

    /// Local tag name (None for text nodes)
    pub fn tag_name(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    /// Namespace URI (None for text nodes and unqualified elements)
    pub fn namespace(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Element { namespace, .. } => namespace.as_deref(),
            NodeKind::Text(_) => None,
        }
    }

    /// Get an attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// The whole merged text run, for text nodes
    pub fn text(&self) -> Option<&'doc str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'doc>> {
        self.doc.data(self.index).parent.map(|index| NodeRef {
            doc: self.doc,
            index,
        })
    }

    pub fn first_child(&self) -> Option<NodeRef<'doc>> {
        self.doc
            .data(self.index)
            .children
            .first()
            .map(|&index| NodeRef {
                doc: self.doc,
                index,
            })
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'doc>> {
        let parent = self.doc.data(self.index).parent?;
        let siblings = &self.doc.data(parent).children;
        let pos = siblings.iter().position(|&i| i == self.index)?;
        siblings.get(pos + 1).map(|&index| NodeRef {
            doc: self.doc,
            index,
        })
    }

    /// Child nodes in sibling order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'doc>> + 'doc {
        let doc = self.doc;
        self.doc
            .data(self.index)
            .children
            .iter()
            .map(move |&index| NodeRef { doc, index })
    }

    /// Source location of this node, for diagnostics
    pub fn location(&self) -> Location {
        let data = self.doc.data(self.index);
        Location {
            file: self.doc.path.clone(),
            line: data.line,
            column: data.column,
        }
    }
}
