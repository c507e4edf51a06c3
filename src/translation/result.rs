use serde::{Deserialize, Serialize};

use crate::entities::{Entity, EntityKind};

/// An entity for which some resolution tier produced a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub translation: String,
    /// Label of the dictionary or service the translation came from
    pub source: String,
}

/// An entity no resolution tier could translate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

impl From<Entity> for UnresolvedEntity {
    fn from(entity: Entity) -> Self {
        Self {
            text: entity.text,
            kind: entity.kind,
        }
    }
}

impl From<&UnresolvedEntity> for Entity {
    fn from(entity: &UnresolvedEntity) -> Self {
        Entity::new(entity.text.clone(), entity.kind.clone())
    }
}

/// Outcome of one pipeline run.
///
/// Every deduplicated entity appears in exactly one of the two lists, in
/// the order the recogniser reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub found: Vec<ResolvedEntity>,
    pub not_found: Vec<UnresolvedEntity>,
}

/// Serializable view of a result with counts
#[derive(Debug, Clone, Serialize)]
pub struct TranslationSummary<'a> {
    pub found: &'a [ResolvedEntity],
    pub not_found: &'a [UnresolvedEntity],
    pub total: usize,
    pub found_count: usize,
    pub not_found_count: usize,
}

impl TranslationResult {
    pub fn total(&self) -> usize {
        self.found.len() + self.not_found.len()
    }

    /// Result with counts, as returned by the `name_extractor` tool
    pub fn summary(&self) -> TranslationSummary<'_> {
        TranslationSummary {
            found: &self.found,
            not_found: &self.not_found,
            total: self.total(),
            found_count: self.found.len(),
            not_found_count: self.not_found.len(),
        }
    }

    /// Replace `not_found` with the fallback outcome. Non-empty translations
    /// join `found`; entities the model left blank stay unresolved.
    pub fn absorb_fallback(&mut self, translations: Vec<ResolvedEntity>) {
        self.not_found.clear();
        for item in translations {
            if item.translation.trim().is_empty() {
                self.not_found.push(UnresolvedEntity {
                    text: item.text,
                    kind: item.kind,
                });
            } else {
                self.found.push(item);
            }
        }
    }
}
