//! Target languages offered by the `translate` command.
//!
//! The registry is the single source of truth for the command's choice set
//! and for validating the `language` option on incoming invocations.

use thiserror::Error;

/// Metadata for a supported target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language, shown as the choice label
    pub name: &'static str,
}

static LANGUAGES: &[LanguageConfig] = &[
    LanguageConfig {
        code: "en",
        name: "English",
    },
    LanguageConfig {
        code: "fr",
        name: "French",
    },
    LanguageConfig {
        code: "de",
        name: "German",
    },
    LanguageConfig {
        code: "zh",
        name: "Chinese",
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Target language `{0}` is not supported.")]
pub struct UnsupportedLanguage(pub String);

/// A validated target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    config: &'static LanguageConfig,
}

impl Language {
    /// All supported languages, in the order they are offered to users.
    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGES.iter().map(|config| Language { config })
    }

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is in the registry
    /// * `Err(UnsupportedLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language, UnsupportedLanguage> {
        LANGUAGES
            .iter()
            .find(|lang| lang.code == code)
            .map(|config| Language { config })
            .ok_or_else(|| UnsupportedLanguage(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.config.code
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }
}
