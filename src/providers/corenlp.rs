use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::entities::{Entity, EntityKind};
use crate::errors::ProviderError;
use crate::language_utils::SourceLanguage;
use crate::providers::EntityRecognizer;

/// Tag CoreNLP uses for tokens outside any entity
const OUTSIDE_TAG: &str = "O";

/// CoreNLP client for the NER annotator
#[derive(Debug)]
pub struct CoreNlp {
    /// HTTP client for API requests
    client: Client,
    /// Server root URL
    endpoint: String,
}

/// Annotated document returned by CoreNLP
#[derive(Debug, Deserialize)]
pub struct CoreNlpResponse {
    #[serde(default)]
    pub sentences: Vec<CoreNlpSentence>,
}

#[derive(Debug, Deserialize)]
pub struct CoreNlpSentence {
    #[serde(default)]
    pub tokens: Vec<CoreNlpToken>,
}

#[derive(Debug, Deserialize)]
pub struct CoreNlpToken {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub ner: Option<String>,
}

impl CoreNlp {
    /// Create a new CoreNLP client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::from_reqwest("CoreNLP", e))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    /// Annotator properties for a language, serialized as CoreNLP expects
    pub fn properties(language: SourceLanguage) -> String {
        let mut properties = json!({
            "annotators": "tokenize,ssplit,ner",
            "outputFormat": "json",
        });
        if language == SourceLanguage::Es {
            properties["pipelineLanguage"] = json!("es");
        }
        properties.to_string()
    }

    /// Run the annotator and return the raw document
    pub async fn annotate(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<CoreNlpResponse, ProviderError> {
        let url = format!("{}/", self.endpoint);

        let response = self.client.post(&url)
            .query(&[("properties", Self::properties(language))])
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(text.as_bytes().to_vec())
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest("CoreNLP", e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("CoreNLP error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response.json::<CoreNlpResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("CoreNLP response: {}", e)))
    }

    /// Extract entities restricted to the given kinds
    pub async fn extract_entities_of(
        &self,
        text: &str,
        language: SourceLanguage,
        kinds: &[EntityKind],
    ) -> Result<Vec<Entity>, ProviderError> {
        let entities = self.extract_entities(text, language).await?;
        Ok(entities.into_iter().filter(|e| kinds.contains(&e.kind)).collect())
    }

    /// Merge consecutive tokens sharing an NER tag into entities.
    ///
    /// Entities never span sentence boundaries.
    pub fn merge_tokens(response: &CoreNlpResponse) -> Vec<Entity> {
        let mut entities = Vec::new();

        for sentence in &response.sentences {
            let mut current: Option<(String, String)> = None;

            for token in &sentence.tokens {
                let tag = token.ner.as_deref().unwrap_or(OUTSIDE_TAG);

                if tag == OUTSIDE_TAG {
                    if let Some((text, tag)) = current.take() {
                        entities.push(Entity::new(text, tag));
                    }
                    continue;
                }

                let same_entity = matches!(&current, Some((_, current_tag)) if current_tag.as_str() == tag);

                if same_entity {
                    if let Some((text, _)) = current.as_mut() {
                        text.push(' ');
                        text.push_str(&token.word);
                    }
                } else {
                    if let Some((text, tag)) = current.take() {
                        entities.push(Entity::new(text, tag));
                    }
                    current = Some((token.word.clone(), tag.to_string()));
                }
            }

            if let Some((text, tag)) = current.take() {
                entities.push(Entity::new(text, tag));
            }
        }

        entities
    }
}

#[async_trait]
impl EntityRecognizer for CoreNlp {
    async fn extract_entities(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<Vec<Entity>, ProviderError> {
        let response = self.annotate(text, language).await?;
        let entities = Self::merge_tokens(&response);
        debug!("CoreNLP found {} entities", entities.len());
        Ok(entities)
    }

    async fn extract_persons_and_locations(
        &self,
        text: &str,
        language: SourceLanguage,
    ) -> Result<Vec<Entity>, ProviderError> {
        self.extract_entities_of(text, language, &[EntityKind::Person, EntityKind::Location]).await
    }
}
