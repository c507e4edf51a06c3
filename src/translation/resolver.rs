/*!
 * Tiered dictionary resolution for a single entity.
 *
 * Tiers run strictly in order and stop at the first one whose entry cleans
 * to a translation:
 * 1. the dictionary for the entity's kind (person, place, or all)
 * 2. the general English-Chinese dictionary
 * 3. for multi-word person names, the surname alone in the person dictionary
 */

use log::debug;

use crate::entities::{Entity, EntityKind};
use crate::errors::ProviderError;
use crate::providers::dict_reader::database_for_kind;
use crate::providers::{DictionaryLookup, databases};
use super::cleaner::TranslationCleaner;

/// Suffix appended to the source label of surname-only matches
pub const SURNAME_SUFFIX: &str = " (surname)";

/// A translation and the label of the dictionary it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub translation: String,
    pub source: String,
}

/// Resolves entities against a dictionary with tiered fallback
#[derive(Debug)]
pub struct TieredResolver<D> {
    dictionary: D,
    cleaner: TranslationCleaner,
}

impl<D: DictionaryLookup> TieredResolver<D> {
    pub fn new(dictionary: D) -> Self {
        Self::with_cleaner(dictionary, TranslationCleaner::default())
    }

    pub fn with_cleaner(dictionary: D, cleaner: TranslationCleaner) -> Self {
        Self { dictionary, cleaner }
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Resolve one entity; `Ok(None)` when every tier misses.
    ///
    /// Dictionary failures are returned as errors, never counted as misses.
    pub async fn resolve(&self, entity: &Entity) -> Result<Option<Resolution>, ProviderError> {
        let kind = entity.kind.normalized();

        if let Some(resolution) = self.try_lookup(&entity.text, database_for_kind(&kind), None).await? {
            debug!("'{}' resolved by {} dictionary", entity.text, database_for_kind(&kind));
            return Ok(Some(resolution));
        }

        if let Some(resolution) = self.try_lookup(&entity.text, databases::GENERAL, None).await? {
            debug!("'{}' resolved by general dictionary", entity.text);
            return Ok(Some(resolution));
        }

        if let Some(surname) = surname_of(&entity.text, &kind) {
            if let Some(resolution) = self.try_lookup(surname, databases::PERSON, Some(SURNAME_SUFFIX)).await? {
                debug!("'{}' resolved by surname '{}'", entity.text, surname);
                return Ok(Some(resolution));
            }
        }

        debug!("'{}' not found in any dictionary", entity.text);
        Ok(None)
    }

    /// Query one tier; an entry that cleans to nothing is a miss
    async fn try_lookup(
        &self,
        word: &str,
        database: &str,
        label_suffix: Option<&str>,
    ) -> Result<Option<Resolution>, ProviderError> {
        let Some(outcome) = self.dictionary.lookup(word, database).await? else {
            return Ok(None);
        };

        let Some(translation) = self.cleaner.clean(&outcome.translation) else {
            debug!("Entry for '{}' in {} has no usable translation", word, database);
            return Ok(None);
        };

        let source = match label_suffix {
            Some(suffix) => format!("{}{}", outcome.source, suffix),
            None => outcome.source,
        };

        Ok(Some(Resolution { translation, source }))
    }
}

/// Last token of a person name written with an internal space
pub fn surname_of<'a>(text: &'a str, kind: &EntityKind) -> Option<&'a str> {
    if !kind.is_person() {
        return None;
    }

    let trimmed = text.trim();
    if !trimmed.contains(char::is_whitespace) {
        return None;
    }

    trimmed.split_whitespace().last()
}
