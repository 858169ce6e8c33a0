//! docbook-lint: A linter for DocBook-like technical documentation XML
//!
//! This library parses a documentation XML tree (possibly assembled from
//! several physical files via XInclude references), runs a fixed set of
//! independent checks over it, and routes every violation through a
//! pluggable reporting policy.

pub mod config;
pub mod diagnostics;
pub mod dictionary;
pub mod engine;
pub mod parser;
pub mod reporter;
pub mod rules;
pub mod walker;

pub use config::{CliOptions, Config, ConfigError, NumericTokens};
pub use diagnostics::{Location, Violation};
pub use dictionary::{
    Dictionary, DictionaryError, DictionaryProvider, MemoryProvider, WordListProvider,
    WordSetDictionary,
};
pub use engine::{LintError, Linter};
pub use parser::{Document, NodeRef, ParseError};
pub use reporter::{CollectingReporter, FailFastReporter, PrintingReporter, Reporter};
pub use walker::{walk_document, Visitor, XINCLUDE_NS};
