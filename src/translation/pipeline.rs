/*!
 * Name extraction and dictionary translation pipeline.
 *
 * The pipeline takes its collaborators by value at construction. Entities
 * are resolved one after another in discovery order; the generative
 * fallback is a separate step the caller opts into.
 */

use log::{debug, info};

use crate::entities::{Entity, dedup_entities};
use crate::errors::ProviderError;
use crate::language_utils::SourceLanguage;
use crate::providers::{DictionaryLookup, EntityRecognizer};
use super::cleaner::TranslationCleaner;
use super::resolver::TieredResolver;
use super::result::{ResolvedEntity, TranslationResult, UnresolvedEntity};

/// Extracts person and location names and resolves their translations
#[derive(Debug)]
pub struct TranslationPipeline<R, D> {
    recognizer: R,
    resolver: TieredResolver<D>,
}

impl<R: EntityRecognizer, D: DictionaryLookup> TranslationPipeline<R, D> {
    pub fn new(recognizer: R, dictionary: D) -> Self {
        Self::with_cleaner(recognizer, dictionary, TranslationCleaner::default())
    }

    pub fn with_cleaner(recognizer: R, dictionary: D, cleaner: TranslationCleaner) -> Self {
        Self {
            recognizer,
            resolver: TieredResolver::with_cleaner(dictionary, cleaner),
        }
    }

    pub fn resolver(&self) -> &TieredResolver<D> {
        &self.resolver
    }

    /// Extract entities from `text` and translate them.
    ///
    /// Service failures abort the run; names without a translation go to
    /// `not_found`.
    pub async fn extract_and_translate(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<TranslationResult, ProviderError> {
        let entities = self.recognizer.extract_persons_and_locations(text, language).await?;
        let entities = dedup_entities(entities);
        debug!("{} unique person and location names", entities.len());

        let result = self.translate_entities(entities).await?;
        info!(
            "Dictionary lookup: {} found, {} not found",
            result.found.len(),
            result.not_found.len()
        );
        Ok(result)
    }

    /// Resolve already-extracted entities, preserving their order
    pub async fn translate_entities(&self, entities: Vec<Entity>) -> Result<TranslationResult, ProviderError> {
        let mut result = TranslationResult::default();

        for entity in entities {
            match self.resolver.resolve(&entity).await? {
                Some(resolution) => result.found.push(ResolvedEntity {
                    text: entity.text,
                    kind: entity.kind,
                    translation: resolution.translation,
                    source: resolution.source,
                }),
                None => result.not_found.push(UnresolvedEntity::from(entity)),
            }
        }

        Ok(result)
    }
}
