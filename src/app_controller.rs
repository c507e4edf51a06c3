use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::Config;
use crate::entities::Entity;
use crate::errors::{ConfigError, ProviderError};
use crate::export;
use crate::language_utils::SourceLanguage;
use crate::providers::corenlp::CoreNlp;
use crate::providers::dict_reader::DictReader;
use crate::providers::gemini::Gemini;
use crate::providers::{DictionaryLookup, EntityRecognizer, GenerativeModel};
use crate::tools::ToolRegistry;
use crate::translation::{FallbackTranslator, TranslationPipeline, TranslationResult};

// @module: Application controller for glossary runs

/// One glossary run as requested on the command line
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Text to extract names from
    pub text: String,
    /// Where the TSV glossary is written
    pub output: PathBuf,
    /// Source language of the text
    pub language: SourceLanguage,
    /// Translate dictionary misses with the generative model
    pub use_generative: bool,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dictionary pipeline backed by the configured services
    pub fn build_pipeline(&self) -> Result<TranslationPipeline<CoreNlp, DictReader>, ProviderError> {
        let recognizer = CoreNlp::new(&self.config.ner.endpoint, self.config.ner.timeout_secs)?;
        let dictionary = DictReader::new(
            &self.config.dictionary.endpoint,
            &self.config.dictionary.api_key,
            self.config.dictionary.timeout_secs,
        )?;
        Ok(TranslationPipeline::new(recognizer, dictionary))
    }

    /// Generative fallback; fails when no API key is configured
    pub fn build_fallback(&self) -> Result<FallbackTranslator<Gemini>, ConfigError> {
        let generative = &self.config.generative;
        let model = Gemini::new(
            &generative.api_key,
            &generative.model,
            &generative.endpoint,
            generative.timeout_secs,
        )?
        .with_temperature(generative.temperature);
        Ok(FallbackTranslator::new(model))
    }

    /// Registry with `name_extractor`, plus `gemini_caller` when a Gemini key is configured
    pub fn build_registry(&self) -> Result<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(self.build_pipeline()?))?;

        if self.config.has_generative_credentials() {
            registry.register(Box::new(self.build_fallback()?))?;
        }

        Ok(registry)
    }

    /// Run the workflow: extract, look up, optionally fall back, export
    pub async fn run(&self, request: &RunRequest) -> Result<TranslationResult> {
        let start_time = std::time::Instant::now();
        info!("Processing text ({})", request.language.display_name());

        let pipeline = self.build_pipeline()?;

        let fallback = if request.use_generative {
            match self.build_fallback() {
                Ok(fallback) => Some(fallback),
                Err(e) => {
                    warn!("Generative fallback unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message("Looking up names");

        let outcome = translate_with_fallback(&pipeline, fallback.as_ref(), &request.text, request.language).await;
        spinner.finish_and_clear();
        let result = outcome.context("Name extraction failed")?;

        export::export_tsv(&result, &request.output)
            .with_context(|| format!("Failed to write glossary to {:?}", request.output))?;

        info!(
            "Glossary saved to {:?}: {} translated, {} not translated ({:.1}s)",
            request.output,
            result.found.len(),
            result.not_found.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(result)
    }
}

/// Run the dictionary pipeline, then the fallback over its misses.
///
/// A fallback failure is logged and the dictionary result is returned as is.
pub async fn translate_with_fallback<R, D, G>(
    pipeline: &TranslationPipeline<R, D>,
    fallback: Option<&FallbackTranslator<G>>,
    text: &str,
    language: SourceLanguage,
) -> Result<TranslationResult, ProviderError>
where
    R: EntityRecognizer,
    D: DictionaryLookup,
    G: GenerativeModel,
{
    let mut result = pipeline.extract_and_translate(text, language).await?;

    let Some(fallback) = fallback else {
        return Ok(result);
    };
    if result.not_found.is_empty() {
        return Ok(result);
    }

    info!("Translating {} names not found in the dictionaries", result.not_found.len());
    let pending: Vec<Entity> = result.not_found.iter().map(Into::into).collect();
    match fallback.translate_batch(&pending).await {
        Ok(translations) => result.absorb_fallback(translations),
        Err(e) => warn!("Generative translation failed: {}", e),
    }

    Ok(result)
}
