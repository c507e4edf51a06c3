/*!
 * Generative fallback for names the dictionaries do not know.
 *
 * A batch is translated with exactly one model call. Reply lines map back
 * to the input by position only; missing lines leave an empty translation.
 */

use log::{info, warn};

use crate::entities::{Entity, EntityKind};
use crate::errors::ProviderError;
use crate::providers::GenerativeModel;
use super::prompts;
use super::result::ResolvedEntity;

/// Source label attached to every fallback translation
pub const FALLBACK_SOURCE: &str = "generative-fallback";

/// Translates unresolved entities with a generative model
#[derive(Debug)]
pub struct FallbackTranslator<G> {
    model: G,
}

impl<G: GenerativeModel> FallbackTranslator<G> {
    pub fn new(model: G) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &G {
        &self.model
    }

    /// Translate a batch of entities with one model call.
    ///
    /// An empty batch returns immediately without calling the model.
    pub async fn translate_batch(&self, entities: &[Entity]) -> Result<Vec<ResolvedEntity>, ProviderError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        info!("Translating {} names with the generative fallback", entities.len());
        let prompt = prompts::batch_prompt(entities);
        let reply = self.model.generate(&prompt).await?;

        let lines: Vec<&str> = reply.trim().lines().map(str::trim).collect();
        if lines.len() < entities.len() {
            warn!(
                "Generative fallback returned {} lines for {} names; the rest stay empty",
                lines.len(),
                entities.len()
            );
        }

        Ok(entities.iter()
            .enumerate()
            .map(|(i, entity)| ResolvedEntity {
                text: entity.text.clone(),
                kind: entity.kind.clone(),
                translation: lines.get(i).map(|line| line.to_string()).unwrap_or_default(),
                source: FALLBACK_SOURCE.to_string(),
            })
            .collect())
    }

    /// Translate one name, optionally with a sentence of context
    pub async fn translate_name(
        &self,
        name: &str,
        kind: &EntityKind,
        context: &str,
    ) -> Result<String, ProviderError> {
        let prompt = prompts::single_prompt(name, kind, context);
        let reply = self.model.generate(&prompt).await?;
        Ok(reply.trim().to_string())
    }
}
