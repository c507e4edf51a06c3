/*!
 * Named entities as returned by the NER service.
 *
 * Entity kinds keep the raw CoreNLP tag so the glossary shows what the
 * recogniser reported; `EntityKind::normalized` folds location subtypes
 * into `Location` for dictionary selection.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Category of a named entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Person,
    Location,
    City,
    Country,
    StateOrProvince,
    Gpe,
    Organization,
    /// Any other tag reported by the recogniser
    Other(String),
}

impl EntityKind {
    /// Raw uppercase tag, as used by CoreNLP
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Location => "LOCATION",
            Self::City => "CITY",
            Self::Country => "COUNTRY",
            Self::StateOrProvince => "STATE_OR_PROVINCE",
            Self::Gpe => "GPE",
            Self::Organization => "ORGANIZATION",
            Self::Other(tag) => tag,
        }
    }

    /// Fold location subtypes into `Location`; everything else is unchanged
    pub fn normalized(&self) -> EntityKind {
        match self {
            Self::Location | Self::City | Self::Country | Self::StateOrProvince | Self::Gpe => {
                Self::Location
            }
            other => other.clone(),
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Self::Person)
    }
}

impl From<&str> for EntityKind {
    fn from(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "PERSON" => Self::Person,
            "LOCATION" => Self::Location,
            "CITY" => Self::City,
            "COUNTRY" => Self::Country,
            "STATE_OR_PROVINCE" => Self::StateOrProvince,
            "GPE" => Self::Gpe,
            "ORGANIZATION" => Self::Organization,
            _ => Self::Other(tag.trim().to_string()),
        }
    }
}

impl From<String> for EntityKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_tag().to_string()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A named entity recognised in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity surface text
    pub text: String,

    /// Entity kind
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(text: impl Into<String>, kind: impl Into<EntityKind>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

/// Remove duplicate entities, keeping the first occurrence.
///
/// Two entities are duplicates when their lowercased text and their kind
/// are both equal. Output order is the input order.
pub fn dedup_entities(entities: Vec<Entity>) -> Vec<Entity> {
    let mut seen: HashSet<(String, EntityKind)> = HashSet::with_capacity(entities.len());

    entities
        .into_iter()
        .filter(|entity| seen.insert((entity.text.to_lowercase(), entity.kind.clone())))
        .collect()
}
