use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source languages the NER service is configured for
///
/// Codes are accepted in ISO 639-1 or ISO 639-3 form, or as English names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    En,
    Es,
}

impl SourceLanguage {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// English name of the language
    pub fn display_name(&self) -> String {
        get_language_name(self.code()).unwrap_or_else(|_| self.code().to_string())
    }

    /// All supported languages
    pub fn all() -> [SourceLanguage; 2] {
        [Self::En, Self::Es]
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SourceLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let language = resolve_language(s)
            .ok_or_else(|| anyhow!("Invalid language code: {}", s))?;

        match language.to_639_1() {
            Some("en") => Ok(Self::En),
            Some("es") => Ok(Self::Es),
            _ => Err(anyhow!(
                "Unsupported source language: {} (supported: {})",
                s,
                Self::all().map(|l| l.code()).join(", ")
            )),
        }
    }
}

/// Resolve a 2-letter code, 3-letter code or English name
fn resolve_language(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        0 | 1 => None,
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => Language::from_name(&capitalize(&normalized)),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Get the English name of a language from its code
pub fn get_language_name(code: &str) -> Result<String> {
    resolve_language(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}
