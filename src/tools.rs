/*!
 * Named tools with a JSON-in, JSON-out interface.
 *
 * Tools are registered into an explicit `ToolRegistry` built at startup.
 * The two built-in tools are the dictionary pipeline (`name_extractor`)
 * and the generative fallback (`gemini_caller`).
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::entities::{Entity, EntityKind};
use crate::errors::AppError;
use crate::language_utils::SourceLanguage;
use crate::providers::{DictionaryLookup, EntityRecognizer, GenerativeModel};
use crate::translation::{FallbackTranslator, TranslationPipeline};

/// Name of the dictionary pipeline tool
pub const NAME_EXTRACTOR: &str = "name_extractor";

/// Name of the generative fallback tool
pub const GEMINI_CALLER: &str = "gemini_caller";

/// Type label used when a fallback request gives none
const DEFAULT_NAME_TYPE: &str = "专有名词";

/// A named capability that maps a JSON input to a JSON output
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registry key
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Run the tool
    async fn run(&self, input: Value) -> Result<Value, AppError>;
}

/// Tools available to the application, keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_tools())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), AppError> {
        let name = tool.name().trim().to_string();
        if name.is_empty() {
            return Err(AppError::Tool("Tool must have a name".to_string()));
        }
        debug!("Registering tool '{}'", name);
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Registered tool names, sorted
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Name and description of every tool
    pub fn describe(&self) -> Vec<(String, String)> {
        self.tools
            .values()
            .map(|tool| (tool.name().to_string(), tool.description().to_string()))
            .collect()
    }

    /// Run the tool called `name`
    pub async fn run_tool(&self, name: &str, input: Value) -> Result<Value, AppError> {
        let tool = self.get(name).ok_or_else(|| {
            AppError::Tool(format!(
                "Tool '{}' not found. Available: [{}]",
                name,
                self.list_tools().join(", ")
            ))
        })?;
        tool.run(input).await
    }
}

#[derive(Debug, Deserialize)]
struct ExtractorInput {
    #[serde(default)]
    text: String,
    #[serde(default)]
    language: Option<String>,
}

#[async_trait]
impl<R, D> Tool for TranslationPipeline<R, D>
where
    R: EntityRecognizer + 'static,
    D: DictionaryLookup + 'static,
{
    fn name(&self) -> &str {
        NAME_EXTRACTOR
    }

    fn description(&self) -> &str {
        "Extract person and place names with NER and look up their Chinese translations in the dictionaries"
    }

    async fn run(&self, input: Value) -> Result<Value, AppError> {
        let input: ExtractorInput = serde_json::from_value(input)
            .map_err(|e| AppError::Tool(format!("Invalid {} input: {}", NAME_EXTRACTOR, e)))?;

        let language = match input.language.as_deref() {
            Some(code) => code.parse::<SourceLanguage>()
                .map_err(|e| AppError::Tool(e.to_string()))?,
            None => SourceLanguage::default(),
        };

        let result = self.extract_and_translate(&input.text, language).await?;
        serde_json::to_value(result.summary())
            .map_err(|e| AppError::Tool(format!("Failed to serialize result: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct NameRequest {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl NameRequest {
    fn kind(&self) -> EntityKind {
        EntityKind::from(self.kind.as_deref().unwrap_or(DEFAULT_NAME_TYPE))
    }
}

#[derive(Debug, Deserialize)]
struct SingleNameRequest {
    #[serde(flatten)]
    name: NameRequest,
    #[serde(default)]
    context: String,
}

#[derive(Debug, Serialize)]
struct NameTranslation {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    translation: String,
    source: String,
}

#[async_trait]
impl<G> Tool for FallbackTranslator<G>
where
    G: GenerativeModel + 'static,
{
    fn name(&self) -> &str {
        GEMINI_CALLER
    }

    fn description(&self) -> &str {
        "Translate names into Chinese with a generative model"
    }

    async fn run(&self, input: Value) -> Result<Value, AppError> {
        let invalid = |e: serde_json::Error| AppError::Tool(format!("Invalid {} input: {}", GEMINI_CALLER, e));

        if let Some(names) = input.get("names") {
            let requests: Vec<NameRequest> = serde_json::from_value(names.clone()).map_err(invalid)?;
            let entities: Vec<Entity> = requests
                .iter()
                .map(|request| Entity::new(request.name.clone(), request.kind()))
                .collect();

            let translations: Vec<NameTranslation> = self.translate_batch(&entities)
                .await?
                .into_iter()
                .zip(requests)
                .map(|(resolved, request)| NameTranslation {
                    name: resolved.text,
                    kind: request.kind.unwrap_or_default(),
                    translation: resolved.translation,
                    source: resolved.source,
                })
                .collect();

            return Ok(json!({ "translations": translations }));
        }

        let request: SingleNameRequest = serde_json::from_value(input).map_err(invalid)?;
        let translation = self.translate_name(&request.name.name, &request.name.kind(), &request.context).await?;
        Ok(json!({ "translation": translation }))
    }
}
