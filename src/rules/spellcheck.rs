//! Spell checking of document prose
//!
//! Text inside markup that holds literal computer input/output is not
//! prose and is excluded. Misspellings are gathered per language during
//! the walk and flushed afterwards, so spell-check diagnostics never
//! interleave with another rule's traversal. Dictionaries load lazily,
//! once per distinct language code encountered; a language with no
//! dictionary degrades to a single warning instead of failing the run.

use super::{tokenize, Check, SPELL_TRIM};
use crate::config::NumericTokens;
use crate::diagnostics::{context_snippet, Violation};
use crate::dictionary::{Dictionary, DictionaryProvider};
use crate::engine::LintError;
use crate::parser::{Document, NodeRef};
use crate::reporter::Reporter;
use crate::walker::{walk_document, Visitor};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Tags whose immediate text children are never spell-checked
const EXCLUDED_PARENTS: &[&str] = &[
    "computeroutput",
    "filename",
    "ulink",
    "command",
    "keycap",
    "tag",
    "screen",
];

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*$").unwrap());
static DIGITS_AND_DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9.]*$").unwrap());

pub struct SpellCheck {
    default_language: String,
    numeric_tokens: NumericTokens,
    provider: Arc<dyn DictionaryProvider>,
}

impl SpellCheck {
    pub fn new(
        default_language: impl Into<String>,
        numeric_tokens: NumericTokens,
        provider: Arc<dyn DictionaryProvider>,
    ) -> Self {
        Self {
            default_language: default_language.into(),
            numeric_tokens,
            provider,
        }
    }
}

impl Check for SpellCheck {
    fn name(&self) -> &'static str {
        "spellcheck"
    }

    fn check(&self, doc: &Document, reporter: &mut dyn Reporter) -> Result<(), LintError> {
        let numeric = match self.numeric_tokens {
            NumericTokens::Digits => &*DIGITS_ONLY,
            NumericTokens::DigitsAndDecimal => &*DIGITS_AND_DECIMAL,
        };

        let mut visitor = SpellCheckVisitor {
            default_language: &self.default_language,
            numeric,
            provider: self.provider.as_ref(),
            languages: BTreeMap::new(),
        };
        walk_document(doc, &mut visitor)?;

        // Flush buffered findings, languages in sorted order for
        // deterministic output across runs.
        for (_, state) in visitor.languages {
            if let Some(unavailable) = state.unavailable {
                reporter.report(unavailable)?;
            }
            for misspelling in state.misspellings {
                reporter.report(misspelling)?;
            }
        }
        Ok(())
    }
}

/// Accumulated spell-check state for one language code
struct LanguageState {
    dictionary: Option<Box<dyn Dictionary>>,
    /// Set when the dictionary could not be loaded; reported once
    unavailable: Option<Violation>,
    misspellings: Vec<Violation>,
}

struct SpellCheckVisitor<'a> {
    default_language: &'a str,
    numeric: &'a Regex,
    provider: &'a dyn DictionaryProvider,
    languages: BTreeMap<String, LanguageState>,
}

impl SpellCheckVisitor<'_> {
    fn should_spellcheck(node: NodeRef<'_>) -> bool {
        match node.parent() {
            Some(parent) => !EXCLUDED_PARENTS.iter().any(|tag| parent.is_named(tag)),
            None => true,
        }
    }

    /// The language of a text node: the nearest ancestor carrying a
    /// `lang` attribute (DocBook `lang` / `xml:lang`), else the default.
    fn language_of(&self, node: NodeRef<'_>) -> String {
        let mut current = node.parent();
        while let Some(element) = current {
            if let Some(lang) = element.attribute("lang") {
                return lang.to_string();
            }
            current = element.parent();
        }
        self.default_language.to_string()
    }

    fn language_state(&mut self, language: &str, node: NodeRef<'_>) -> &mut LanguageState {
        if !self.languages.contains_key(language) {
            let state = match self.provider.load(language) {
                Ok(dictionary) => LanguageState {
                    dictionary: Some(dictionary),
                    unavailable: None,
                    misspellings: Vec::new(),
                },
                Err(error) => LanguageState {
                    dictionary: None,
                    unavailable: Some(Violation::DictionaryUnavailable {
                        location: node.location(),
                        language: language.to_string(),
                        reason: error.to_string(),
                    }),
                    misspellings: Vec::new(),
                },
            };
            self.languages.insert(language.to_string(), state);
        }
        self.languages.get_mut(language).unwrap()
    }
}

impl Visitor for SpellCheckVisitor<'_> {
    fn visit_textual(&mut self, node: NodeRef<'_>) -> Result<(), LintError> {
        if !Self::should_spellcheck(node) {
            return Ok(());
        }

        let text = node.text().unwrap_or("");
        let language = self.language_of(node);
        let location = node.location();
        let context = context_snippet(text, 50);
        let numeric = self.numeric;

        let state = self.language_state(&language, node);
        let Some(dictionary) = state.dictionary.as_deref() else {
            return Ok(());
        };

        for word in tokenize(text, SPELL_TRIM) {
            if numeric.is_match(word) {
                continue;
            }
            if !dictionary.check(word) {
                state.misspellings.push(Violation::Misspelling {
                    location: location.clone(),
                    language: language.clone(),
                    word: word.to_string(),
                    context: context.clone(),
                });
            }
        }
        Ok(())
    }
}
