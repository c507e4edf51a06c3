/*!
 * Prompt templates for proper-name translation.
 *
 * Both templates ask for authoritative Chinese renderings: person names
 * follow the World Dictionary of Personal Name Translations, place names
 * follow the national geographic-names standard.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entities::{Entity, EntityKind};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Prompt template with `{placeholder}` slots
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Single-name translation
    pub const SINGLE_NAME: &'static str = "你是一名专业翻译。请将以下英文{entity_type}翻译为中文：

名称：{name}
{context_section}
要求：
1. 使用权威译名或通用译法
2. 人名音译遵循《世界人名翻译大辞典》规范
3. 地名遵循中国地名委员会标准

请只返回中文译名，不要解释。";

    /// Batch translation, one reply line per name
    pub const BATCH: &'static str = "你是一名专业翻译。请将以下英文专有名词翻译为中文：

{names_list}

要求：
1. 使用权威译名或通用译法
2. 人名音译遵循《世界人名翻译大辞典》规范
3. 地名遵循中国地名委员会标准

请按原顺序返回译名，每行一个，不要编号或解释。";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template, replacing each `{key}` with its value.
    ///
    /// Placeholders are substituted in one pass over the template, so braces
    /// inside values are copied verbatim. Unknown keys are left in place.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| {
                values.iter()
                    .find(|(key, _)| *key == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Chinese description of an entity kind for the single-name prompt
pub fn kind_description(kind: &EntityKind) -> String {
    match kind {
        EntityKind::Person => "人名".to_string(),
        EntityKind::Location | EntityKind::Gpe => "地名".to_string(),
        EntityKind::Organization => "组织名".to_string(),
        other => other.as_tag().to_string(),
    }
}

/// Prompt listing every entity as `- {text} ({TYPE})`
pub fn batch_prompt(entities: &[Entity]) -> String {
    let names_list = entities.iter()
        .map(|e| format!("- {} ({})", e.text, e.kind))
        .collect::<Vec<_>>()
        .join("\n");

    PromptTemplate::new(PromptTemplate::BATCH).render(&[("names_list", names_list.as_str())])
}

/// Prompt for one name with an optional context sentence
pub fn single_prompt(name: &str, kind: &EntityKind, context: &str) -> String {
    let context_section = if context.trim().is_empty() {
        String::new()
    } else {
        format!("上下文：{}\n", context.trim())
    };

    let entity_type = kind_description(kind);

    PromptTemplate::new(PromptTemplate::SINGLE_NAME).render(&[
        ("entity_type", entity_type.as_str()),
        ("name", name),
        ("context_section", context_section.as_str()),
    ])
}
