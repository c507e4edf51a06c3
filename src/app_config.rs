use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::file_utils::FileManager;
use crate::language_utils::SourceLanguage;
use crate::providers::gemini;

/// Application configuration module
/// This module handles loading, overriding and validating service settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default source language
    #[serde(default)]
    pub language: SourceLanguage,

    /// NER service settings
    #[serde(default)]
    pub ner: NerConfig,

    /// Dictionary service settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Generative fallback settings
    #[serde(default)]
    pub generative: GenerativeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// CoreNLP service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NerConfig {
    /// Server root URL
    #[serde(default = "default_corenlp_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_corenlp_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_corenlp_endpoint(),
            timeout_secs: default_corenlp_timeout_secs(),
        }
    }
}

/// Dict Reader service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Service base URL
    #[serde(default = "default_dict_reader_endpoint")]
    pub endpoint: String,

    /// API key sent as `X-API-Key` (optional)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_dict_reader_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_dict_reader_endpoint(),
            api_key: String::new(),
            timeout_secs: default_dict_reader_timeout_secs(),
        }
    }
}

/// Gemini configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerativeConfig {
    /// Models collection URL
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "gemini-2.5-flash")
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key; required only when the fallback is used
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_gemini_endpoint(),
            model: default_gemini_model(),
            api_key: String::new(),
            timeout_secs: default_gemini_timeout_secs(),
            temperature: default_temperature(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_corenlp_endpoint() -> String {
    "https://corenlp-production-e3ae.up.railway.app".to_string()
}

fn default_corenlp_timeout_secs() -> u64 {
    30
}

fn default_dict_reader_endpoint() -> String {
    "https://dict-reader-production.up.railway.app".to_string()
}

fn default_dict_reader_timeout_secs() -> u64 {
    10
}

fn default_gemini_endpoint() -> String {
    gemini::DEFAULT_ENDPOINT.to_string()
}

fn default_gemini_model() -> String {
    gemini::DEFAULT_MODEL.to_string()
}

fn default_gemini_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.3
}

impl Config {
    /// Load a configuration file, or write and return the default one when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            let content = FileManager::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .context(format!("Failed to parse config file: {:?}", path))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(path, &config_json)
            .context(format!("Failed to write default config to file: {:?}", path))?;

        Ok((config, true))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Recognised variables: `CORENLP_URL`, `CORENLP_TIMEOUT`,
    /// `DICT_READER_URL`, `DICT_READER_TIMEOUT`, `MCP_API_KEY`,
    /// `GEMINI_API_KEY`, `GEMINI_MODEL`. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("CORENLP_URL") {
            self.ner.endpoint = url;
        }
        if let Some(timeout) = var("CORENLP_TIMEOUT") {
            self.ner.timeout_secs = parse_timeout("CORENLP_TIMEOUT", &timeout)?;
        }
        if let Some(url) = var("DICT_READER_URL") {
            self.dictionary.endpoint = url;
        }
        if let Some(timeout) = var("DICT_READER_TIMEOUT") {
            self.dictionary.timeout_secs = parse_timeout("DICT_READER_TIMEOUT", &timeout)?;
        }
        if let Some(key) = var("MCP_API_KEY") {
            self.dictionary.api_key = key;
        }
        if let Some(key) = var("GEMINI_API_KEY") {
            self.generative.api_key = key;
        }
        if let Some(model) = var("GEMINI_MODEL") {
            self.generative.model = model;
        }

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        validate_endpoint("ner.endpoint", &self.ner.endpoint)?;
        validate_endpoint("dictionary.endpoint", &self.dictionary.endpoint)?;
        validate_endpoint("generative.endpoint", &self.generative.endpoint)?;

        for (name, timeout) in [
            ("ner.timeout_secs", self.ner.timeout_secs),
            ("dictionary.timeout_secs", self.dictionary.timeout_secs),
            ("generative.timeout_secs", self.generative.timeout_secs),
        ] {
            if timeout == 0 {
                return Err(anyhow!("{} must be greater than zero", name));
            }
        }

        if !(0.0..=1.0).contains(&self.generative.temperature) {
            return Err(anyhow!(
                "generative.temperature must be between 0.0 and 1.0, got {}",
                self.generative.temperature
            ));
        }

        Ok(())
    }

    /// Whether a Gemini API key is configured
    pub fn has_generative_credentials(&self) -> bool {
        !self.generative.api_key.trim().is_empty()
    }
}

fn parse_timeout(name: &str, value: &str) -> Result<u64> {
    // CORENLP_TIMEOUT and friends may be written as "30.0"
    let seconds: f64 = value.trim().parse()
        .map_err(|_| anyhow!("{} must be a number of seconds, got '{}'", name, value))?;
    if seconds <= 0.0 {
        return Err(anyhow!("{} must be greater than zero", name));
    }
    Ok(seconds.ceil() as u64)
}

fn validate_endpoint(name: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|e| anyhow!("{} is not a valid URL ('{}'): {}", name, endpoint, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("{} must use http or https, got '{}'", name, url.scheme()));
    }
    Ok(())
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: SourceLanguage::default(),
            ner: NerConfig::default(),
            dictionary: DictionaryConfig::default(),
            generative: GenerativeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
