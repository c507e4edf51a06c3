/*!
 * Mock service implementations for testing.
 *
 * Each mock answers from a script and records every call in a log shared
 * between clones, so a test can hand one clone to the pipeline and keep
 * another to assert on call counts afterwards:
 * - `MockRecognizer` - returns a fixed entity list
 * - `MockDictionary` - answers from a (word, database) table
 * - `MockGenerator` - returns a fixed reply
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::Entity;
use crate::errors::ProviderError;
use crate::language_utils::SourceLanguage;
use crate::providers::{DictionaryLookup, EntityRecognizer, GenerativeModel, LookupOutcome};

fn connection_failure(service: &str) -> ProviderError {
    ProviderError::ConnectionError(format!("{} unreachable", service))
}

/// Recognizer returning a scripted entity list
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    entities: Vec<Entity>,
    failing: bool,
    calls: Arc<Mutex<Vec<(String, SourceLanguage)>>>,
}

impl MockRecognizer {
    /// Recognizer that always returns `entities`
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            ..Default::default()
        }
    }

    /// Recognizer that always fails with a connection error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Every (text, language) pair received so far
    pub fn calls(&self) -> Vec<(String, SourceLanguage)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl EntityRecognizer for MockRecognizer {
    async fn extract_entities(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<Vec<Entity>, ProviderError> {
        self.calls.lock().push((text.to_string(), language));
        if self.failing {
            return Err(connection_failure("NER service"));
        }
        Ok(self.entities.clone())
    }
}

/// Dictionary answering from a scripted table
#[derive(Debug, Clone, Default)]
pub struct MockDictionary {
    entries: HashMap<(String, String), LookupOutcome>,
    failing: bool,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary that always fails with a connection error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Add an entry; its source label and database id are both `database`
    pub fn with_entry(self, word: &str, database: &str, raw: &str) -> Self {
        self.with_labelled_entry(word, database, raw, database)
    }

    /// Add an entry with an explicit source label
    pub fn with_labelled_entry(mut self, word: &str, database: &str, raw: &str, source: &str) -> Self {
        self.entries.insert(
            (word.to_string(), database.to_string()),
            LookupOutcome {
                translation: raw.to_string(),
                source: source.to_string(),
                database_id: database.to_string(),
            },
        );
        self
    }

    /// Every (word, database) pair queried so far, in order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl DictionaryLookup for MockDictionary {
    async fn lookup(
        &self,
        word: &str,
        database: &str,
    ) -> Result<Option<LookupOutcome>, ProviderError> {
        self.calls.lock().push((word.to_string(), database.to_string()));
        if self.failing {
            return Err(connection_failure("Dictionary service"));
        }
        Ok(self.entries.get(&(word.to_string(), database.to_string())).cloned())
    }
}

/// Generative model returning a scripted reply
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    reply: String,
    failing: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// Model that always answers `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Default::default()
        }
    }

    /// Model that always fails with a connection error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Every prompt received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl GenerativeModel for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().push(prompt.to_string());
        if self.failing {
            return Err(connection_failure("Generative service"));
        }
        Ok(self.reply.clone())
    }
}
