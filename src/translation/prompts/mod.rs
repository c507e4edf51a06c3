/*!
 * Prompts for the generative fallback.
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, batch_prompt, kind_description, single_prompt};
