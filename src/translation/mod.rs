/*!
 * Translation of extracted names.
 *
 * This module contains the resolution pipeline. It is split into:
 *
 * - `cleaner`: extraction of a translation from raw dictionary text
 * - `resolver`: tiered dictionary lookup for one entity
 * - `fallback`: batch translation with a generative model
 * - `pipeline`: extraction, deduplication and resolution of a whole text
 * - `prompts`: prompt templates for the generative fallback
 * - `result`: resolved and unresolved entities
 */

// Re-export main types for easier usage
pub use self::cleaner::{TranslationCleaner, clean_translation};
pub use self::fallback::{FALLBACK_SOURCE, FallbackTranslator};
pub use self::pipeline::TranslationPipeline;
pub use self::resolver::{Resolution, TieredResolver};
pub use self::result::{ResolvedEntity, TranslationResult, TranslationSummary, UnresolvedEntity};

// Submodules
pub mod cleaner;
pub mod fallback;
pub mod pipeline;
pub mod prompts;
pub mod resolver;
pub mod result;
