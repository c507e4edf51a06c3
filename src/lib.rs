/*!
 * # nametrans - named-entity glossary builder
 *
 * A Rust library that finds person and place names in English or Spanish
 * text and builds a Chinese translation glossary for them.
 *
 * ## Features
 *
 * - Named-entity recognition with a Stanford CoreNLP server
 * - Tiered lookup in the Dict Reader person, place and general dictionaries
 * - Surname fallback for multi-word person names
 * - Optional Gemini translation for names the dictionaries do not know
 * - Tab-separated glossary export
 * - Named tools with a JSON interface
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `entities`: Entity model and deduplication
 * - `translation`: Name resolution:
 *   - `translation::cleaner`: Translation extraction from raw dictionary text
 *   - `translation::resolver`: Tiered dictionary lookup
 *   - `translation::fallback`: Generative batch translation
 *   - `translation::pipeline`: Extraction and resolution of a whole text
 * - `providers`: Service traits and clients:
 *   - `providers::corenlp`: CoreNLP NER client
 *   - `providers::dict_reader`: Dict Reader client
 *   - `providers::gemini`: Gemini client
 * - `export`: TSV glossary export
 * - `tools`: Tool trait and registry
 * - `file_utils`: File system operations and input sources
 * - `app_controller`: Main application controller
 * - `language_utils`: Source language codes
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod entities;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod tools;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use entities::{Entity, EntityKind};
pub use language_utils::{SourceLanguage, get_language_name};
pub use translation::{TranslationPipeline, TranslationResult};
pub use errors::{AppError, ConfigError, ProviderError};
