//! Diagnostic types for lint results
//!
//! Each violation is an immutable record created by a rule during
//! traversal and consumed once by a reporter. Context needed for the
//! rendered message (offending text, word, id) is extracted from the
//! referencing node at creation time, because the node may belong to an
//! included document that only lives for the duration of the walk.

use std::fmt;
use std::path::PathBuf;

/// Source location in a file (1-based)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// File path (empty for in-memory sources)
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.as_os_str().is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
        }
    }
}

/// A lint violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// An inline run (e.g. `computeroutput`) whose entire text exceeds the
    /// configured maximum, regardless of embedded line breaks
    InlineTextTooLong { location: Location, text: String },
    /// A single line of a verbatim block (e.g. `screen`) exceeding the
    /// configured maximum
    LineTooLong { location: Location, line: String },
    /// A word not found in the dictionary for its language
    Misspelling {
        location: Location,
        language: String,
        word: String,
        /// The surrounding merged text, pre-trimmed by the rule
        context: String,
    },
    /// A configured forbidden word appearing verbatim in text
    ForbiddenWord {
        location: Location,
        word: String,
        context: String,
    },
    /// An `id` attribute that does not start with the prefix required for
    /// its element tag
    IdPrefixMismatch {
        location: Location,
        tag: String,
        id: String,
        expected_prefix: String,
    },
    /// No dictionary could be loaded for a language; spell checking for
    /// that language was skipped
    DictionaryUnavailable {
        location: Location,
        language: String,
        reason: String,
    },
}

impl Violation {
    /// The location of the single node this violation refers to
    pub fn location(&self) -> &Location {
        match self {
            Violation::InlineTextTooLong { location, .. }
            | Violation::LineTooLong { location, .. }
            | Violation::Misspelling { location, .. }
            | Violation::ForbiddenWord { location, .. }
            | Violation::IdPrefixMismatch { location, .. }
            | Violation::DictionaryUnavailable { location, .. } => location,
        }
    }
}

/// Truncate a context string, marking the cut with an ellipsis
pub(crate) fn context_snippet(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_len) {
        Some((byte_idx, _)) => format!("{}...", &trimmed[..byte_idx]),
        None => trimmed.to_string(),
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::InlineTextTooLong { text, .. } => write!(
                f,
                "Inline text too long: \"{}\" ({} characters)",
                text,
                text.chars().count()
            ),
            Violation::LineTooLong { line, .. } => write!(
                f,
                "Line too long: \"{}\" ({} characters)",
                line,
                line.chars().count()
            ),
            Violation::Misspelling {
                language,
                word,
                context,
                ..
            } => write!(
                f,
                "Possibly misspelled word for \"{}\": \"{}\" in context \"{}\"",
                language, word, context
            ),
            Violation::ForbiddenWord { word, context, .. } => {
                write!(f, "Forbidden word: \"{}\" in context \"{}\"", word, context)
            }
            Violation::IdPrefixMismatch {
                tag,
                id,
                expected_prefix,
                ..
            } => write!(
                f,
                "Element <{}>'s id (\"{}\") does not start with prefix \"{}\"",
                tag, id, expected_prefix
            ),
            Violation::DictionaryUnavailable {
                language, reason, ..
            } => write!(
                f,
                "No dictionary available for \"{}\" ({}); spell checking skipped",
                language, reason
            ),
        }
    }
}
