/*!
 * Clients for the remote services the pipeline depends on.
 *
 * This module contains the capability traits the translation pipeline is
 * written against, and a client implementation for each:
 * - CoreNLP: named-entity recognition
 * - Dict Reader: person, place and general dictionaries
 * - Gemini: generative fallback translation
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::entities::{Entity, EntityKind};
use crate::errors::ProviderError;
use crate::language_utils::SourceLanguage;

/// Dictionary database ids understood by the Dict Reader service
pub mod databases {
    /// World person-name translation dictionary
    pub const PERSON: &str = "person";
    /// World place-name translation dictionary
    pub const PLACE: &str = "place";
    /// General English-Chinese dictionary
    pub const GENERAL: &str = "ec_dict";
    /// Search every dictionary
    pub const ALL: &str = "*";
}

/// One dictionary hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    /// Raw definition text, possibly containing HTML
    pub translation: String,
    /// Display name of the dictionary the entry came from
    pub source: String,
    /// Id of the dictionary the entry came from
    pub database_id: String,
}

/// Named-entity recognition service
#[async_trait]
pub trait EntityRecognizer: Send + Sync + Debug {
    /// Extract every entity from `text`, in the order they appear
    async fn extract_entities(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<Vec<Entity>, ProviderError>;

    /// Extract only person and location entities
    async fn extract_persons_and_locations(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<Vec<Entity>, ProviderError> {
        let entities = self.extract_entities(text, language).await?;
        Ok(entities
            .into_iter()
            .filter(|e| matches!(e.kind, EntityKind::Person | EntityKind::Location))
            .collect())
    }
}

/// Dictionary lookup service
#[async_trait]
pub trait DictionaryLookup: Send + Sync + Debug {
    /// Look up `word` in `database`; `Ok(None)` when there is no entry
    async fn lookup(&self, word: &str, database: &str)
        -> Result<Option<LookupOutcome>, ProviderError>;
}

/// Generative language model used for fallback translation
#[async_trait]
pub trait GenerativeModel: Send + Sync + Debug {
    /// Send one prompt and return the model's free-text reply
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

pub mod corenlp;
pub mod dict_reader;
pub mod gemini;
pub mod mock;
