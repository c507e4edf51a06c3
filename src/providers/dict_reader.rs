use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::entities::EntityKind;
use crate::errors::ProviderError;
use crate::providers::{DictionaryLookup, LookupOutcome, databases};

/// Dict Reader client for the person, place and general dictionaries
#[derive(Debug)]
pub struct DictReader {
    /// HTTP client for API requests
    client: Client,
    /// Service base URL
    endpoint: String,
}

/// Body of a `/define` request
#[derive(Debug, Serialize)]
pub struct DefineRequest<'a> {
    pub word: &'a str,
    pub database: &'a str,
}

/// Body of a `/define` response
#[derive(Debug, Deserialize)]
pub struct DefineResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

/// One definition inside a `/define` response
#[derive(Debug, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub database_name: Option<String>,
}

/// Pattern matching strategy for `/match`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    Prefix,
    Suffix,
    Exact,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
            Self::Exact => "exact",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    pattern: &'a str,
    database: &'a str,
    strategy: MatchStrategy,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(default)]
    matches: Vec<serde_json::Value>,
}

impl DefineResponse {
    /// First definition as a lookup outcome, if the word was found
    pub fn into_outcome(self, requested_database: &str) -> Option<LookupOutcome> {
        if !self.found {
            return None;
        }

        let first = self.definitions.into_iter().next()?;
        let database_id = first.database.unwrap_or_else(|| requested_database.to_string());
        let source = first.database_name.unwrap_or_else(|| database_id.clone());

        Some(LookupOutcome {
            translation: first.definition,
            source,
            database_id,
        })
    }
}

impl DictReader {
    /// Create a new Dict Reader client; `api_key` is sent as `X-API-Key` when non-empty
    pub fn new(
        endpoint: impl Into<String>,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        if !api_key.is_empty() {
            let value = header::HeaderValue::from_str(api_key)
                .map_err(|e| ProviderError::AuthenticationError(format!("Invalid API key: {}", e)))?;
            headers.insert("X-API-Key", value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::from_reqwest("Dict Reader", e))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<B: Serialize + Sync + ?Sized, R: DeserializeOwned>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<R, ProviderError> {
        let url = format!("{}/{}", self.endpoint, route);

        let response = self.client.post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest("Dict Reader", e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Dict Reader error ({}): {}", status, message);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(message),
                code => ProviderError::ApiError { status_code: code, message },
            });
        }

        response.json::<R>().await
            .map_err(|e| ProviderError::ParseError(format!("Dict Reader response: {}", e)))
    }

    /// Look up a name in the person-name dictionary
    pub async fn lookup_person(&self, name: &str) -> Result<Option<LookupOutcome>, ProviderError> {
        self.lookup(name, databases::PERSON).await
    }

    /// Look up a name in the place-name dictionary
    pub async fn lookup_place(&self, name: &str) -> Result<Option<LookupOutcome>, ProviderError> {
        self.lookup(name, databases::PLACE).await
    }

    /// Look up a word in the general English-Chinese dictionary
    pub async fn lookup_general(&self, word: &str) -> Result<Option<LookupOutcome>, ProviderError> {
        self.lookup(word, databases::GENERAL).await
    }

    /// Look up a name in the dictionary matching its entity kind
    pub async fn lookup_by_entity_kind(
        &self,
        name: &str,
        kind: &EntityKind,
    ) -> Result<Option<LookupOutcome>, ProviderError> {
        self.lookup(name, database_for_kind(kind)).await
    }

    /// Find headwords matching `pattern`
    pub async fn match_pattern(
        &self,
        pattern: &str,
        database: &str,
        strategy: MatchStrategy,
    ) -> Result<Vec<serde_json::Value>, ProviderError> {
        let request = MatchRequest { pattern, database, strategy };
        let response: MatchResponse = self.post_json("match", &request).await?;
        debug!("{} {} matches for '{}' in {}", response.matches.len(), strategy, pattern, database);
        Ok(response.matches)
    }

    /// Whether the service answers its health endpoint
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.endpoint);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().as_u16() == 200,
            Err(e) => {
                warn!("Dict Reader health check failed: {}", e);
                false
            }
        }
    }
}

/// Dictionary database for an entity kind; subtypes of location use the place dictionary
pub fn database_for_kind(kind: &EntityKind) -> &'static str {
    match kind.normalized() {
        EntityKind::Person => databases::PERSON,
        EntityKind::Location => databases::PLACE,
        _ => databases::ALL,
    }
}

#[async_trait]
impl DictionaryLookup for DictReader {
    async fn lookup(
        &self,
        word: &str,
        database: &str,
    ) -> Result<Option<LookupOutcome>, ProviderError> {
        let request = DefineRequest { word, database };
        let response: DefineResponse = self.post_json("define", &request).await?;
        Ok(response.into_outcome(database))
    }
}
