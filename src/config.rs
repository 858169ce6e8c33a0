//! Configuration handling
//!
//! Options come from an optional config file (`.docbooklintrc.json` or
//! `.yaml`, discovered by walking up from the start directory) merged
//! with command-line overrides. The resulting [`Config`] is immutable for
//! the duration of a run and shared read-only by all checks.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("Failed to parse JSON config: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("Failed to parse YAML config: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
}

/// Which tokens the spell check treats as numbers and skips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericTokens {
    /// Pure digit sequences only (`^[0-9]*$`)
    Digits,
    /// Digit sequences with optional decimal points (`^[0-9.]*$`)
    #[default]
    #[serde(rename = "decimal")]
    DigitsAndDecimal,
}

/// Runtime lint configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum line length for verbatim/inline length checks
    pub max_line_length: usize,
    /// Whether the spell-check rule runs
    pub spell_check: bool,
    /// Language assumed for text with no `lang` attribute in scope
    pub default_language: String,
    /// Words flagged wherever they appear
    pub forbidden_words: Vec<String>,
    /// Numeric-token pattern for the spell-check skip
    pub numeric_tokens: NumericTokens,
    /// Directory holding per-language word lists
    pub dictionary_dir: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_length: 80,
            spell_check: true,
            default_language: "en_US".to_string(),
            forbidden_words: Vec::new(),
            numeric_tokens: NumericTokens::default(),
            dictionary_dir: None,
            verbose: false,
        }
    }
}

/// CLI options to merge into config
#[derive(Debug, Default)]
pub struct CliOptions {
    pub max_line_length: Option<usize>,
    pub spell_check: Option<bool>,
    pub default_language: Option<String>,
    /// Added to the configured set, not replacing it
    pub forbidden_words: Vec<String>,
    pub numeric_tokens: Option<NumericTokens>,
    pub dictionary_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Configuration file format (`.docbooklintrc.json` / `.docbooklintrc.yaml`)
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub max_line_length: Option<usize>,

    #[serde(default)]
    pub spell_check: Option<bool>,

    /// Language code, e.g. "en_US"
    #[serde(default)]
    pub default_language: Option<String>,

    #[serde(default)]
    pub forbidden_words: Vec<String>,

    /// "digits" or "decimal"
    #[serde(default)]
    pub numeric_tokens: Option<NumericTokens>,

    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let file: ConfigFile = if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(Self::from_config_file(file))
    }

    /// Try to find and load config from standard locations, walking up
    /// from `start_dir`
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let config_names = [
            ".docbooklintrc.json",
            ".docbooklintrc.yaml",
            ".docbooklintrc.yml",
            ".docbooklintrc",
            "docbooklint.json",
            "docbooklint.yaml",
        ];

        let mut current = start_dir.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    let config = Self::from_file(&config_path)?;
                    return Ok(Some((config_path, config)));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            max_line_length: file.max_line_length.unwrap_or(defaults.max_line_length),
            spell_check: file.spell_check.unwrap_or(defaults.spell_check),
            default_language: file
                .default_language
                .unwrap_or(defaults.default_language),
            forbidden_words: file.forbidden_words,
            numeric_tokens: file.numeric_tokens.unwrap_or_default(),
            dictionary_dir: file.dictionary_dir,
            verbose: false,
        }
    }

    /// Merge CLI options into this config (CLI takes precedence)
    pub fn merge_cli(&mut self, opts: CliOptions) {
        if let Some(max) = opts.max_line_length {
            self.max_line_length = max;
        }
        if let Some(spell) = opts.spell_check {
            self.spell_check = spell;
        }
        if let Some(language) = opts.default_language {
            self.default_language = language;
        }
        self.forbidden_words.extend(opts.forbidden_words);
        if let Some(numeric) = opts.numeric_tokens {
            self.numeric_tokens = numeric;
        }
        if let Some(dir) = opts.dictionary_dir {
            self.dictionary_dir = Some(dir);
        }
        self.verbose = opts.verbose;
    }
}
