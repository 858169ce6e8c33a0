//! Dictionary collaborator for the spell-check rule
//!
//! Spell checking delegates word lookups to an external provider keyed by
//! language code (`en_US`, `de_DE`, ...). Loading a dictionary may block
//! on file I/O; the spell-check rule loads each distinct language once per
//! run. A language without a dictionary is a recoverable condition, not a
//! crash: the rule reports it and skips that language's text.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("no dictionary for language \"{language}\"")]
    UnsupportedLanguage { language: String },
    #[error("failed to read word list {path}: {source}")]
    ReadWordList {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A loaded dictionary for one language
pub trait Dictionary {
    /// Whether `word` is a correctly spelled word in this language
    fn check(&self, word: &str) -> bool;
}

/// Supplies dictionaries by language code
pub trait DictionaryProvider {
    fn load(&self, language: &str) -> Result<Box<dyn Dictionary>, DictionaryError>;
}

/// A dictionary backed by a set of known words. Lookup is exact with a
/// lowercase fallback, so sentence-initial capitalisation does not flag.
pub struct WordSetDictionary {
    words: HashSet<String>,
}

impl WordSetDictionary {
    pub fn new(words: HashSet<String>) -> Self {
        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl Dictionary for WordSetDictionary {
    fn check(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }
}

/// Loads word lists from a directory: `<lang>.dic` or `<lang>.txt`, one
/// word per line, `#` lines ignored.
pub struct WordListProvider {
    dir: PathBuf,
}

impl WordListProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn word_list_path(&self, language: &str) -> Option<PathBuf> {
        for ext in ["dic", "txt"] {
            let candidate = self.dir.join(format!("{}.{}", language, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl DictionaryProvider for WordListProvider {
    fn load(&self, language: &str) -> Result<Box<dyn Dictionary>, DictionaryError> {
        let path = self
            .word_list_path(language)
            .ok_or_else(|| DictionaryError::UnsupportedLanguage {
                language: language.to_string(),
            })?;

        let content = fs::read_to_string(&path).map_err(|source| DictionaryError::ReadWordList {
            path: path.clone(),
            source,
        })?;

        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        Ok(Box::new(WordSetDictionary::new(words)))
    }
}

/// An in-memory provider mapping language codes to word sets. Useful for
/// tests and for embedders with their own dictionary source.
#[derive(Default)]
pub struct MemoryProvider {
    languages: HashMap<String, HashSet<String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language's word set, replacing any existing one
    pub fn with_language<I, S>(mut self, language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.insert(
            language.to_string(),
            words.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl DictionaryProvider for MemoryProvider {
    fn load(&self, language: &str) -> Result<Box<dyn Dictionary>, DictionaryError> {
        match self.languages.get(language) {
            Some(words) => Ok(Box::new(WordSetDictionary::new(words.clone()))),
            None => Err(DictionaryError::UnsupportedLanguage {
                language: language.to_string(),
            }),
        }
    }
}

/// Convenience: a provider for word lists relative to `dir`, or rooted at
/// the conventional system location when `dir` is `None`.
pub fn default_provider(dir: Option<&Path>) -> WordListProvider {
    match dir {
        Some(dir) => WordListProvider::new(dir),
        None => WordListProvider::new("/usr/share/docbook-lint/dictionaries"),
    }
}
