/*!
 * Tests for the entity model and deduplication
 */

use nametrans::entities::{Entity, EntityKind, dedup_entities};

#[test]
fn test_dedup_withCaseVariants_shouldKeepEarliest() {
    let entities = vec![
        Entity::new("Paris", "LOCATION"),
        Entity::new("John", "PERSON"),
        Entity::new("PARIS", "LOCATION"),
        Entity::new("paris", "LOCATION"),
    ];

    let unique = dedup_entities(entities);

    assert_eq!(unique, vec![
        Entity::new("Paris", "LOCATION"),
        Entity::new("John", "PERSON"),
    ]);
}

#[test]
fn test_dedup_withSameTextDifferentKind_shouldKeepBoth() {
    let entities = vec![
        Entity::new("Washington", "PERSON"),
        Entity::new("Washington", "LOCATION"),
    ];

    let unique = dedup_entities(entities.clone());

    assert_eq!(unique, entities);
}

#[test]
fn test_dedup_output_shouldBeOrderedSubsequenceOfInput() {
    let entities = vec![
        Entity::new("A", "PERSON"),
        Entity::new("B", "LOCATION"),
        Entity::new("a", "PERSON"),
        Entity::new("C", "PERSON"),
        Entity::new("b", "LOCATION"),
    ];

    let unique = dedup_entities(entities.clone());

    let mut remaining = entities.iter();
    for kept in &unique {
        assert!(remaining.any(|e| e == kept), "{:?} out of order", kept);
    }
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_dedup_withEmptyInput_shouldReturnEmpty() {
    assert!(dedup_entities(Vec::new()).is_empty());
}

#[test]
fn test_entity_kind_fromTag_shouldParseKnownTags() {
    assert_eq!(EntityKind::from("PERSON"), EntityKind::Person);
    assert_eq!(EntityKind::from("location"), EntityKind::Location);
    assert_eq!(EntityKind::from("STATE_OR_PROVINCE"), EntityKind::StateOrProvince);
    assert_eq!(EntityKind::from("MISC"), EntityKind::Other("MISC".to_string()));
}

#[test]
fn test_entity_kind_normalized_shouldMapLocationSubtypes() {
    for tag in ["CITY", "COUNTRY", "STATE_OR_PROVINCE", "GPE", "LOCATION"] {
        assert_eq!(EntityKind::from(tag).normalized(), EntityKind::Location, "{}", tag);
    }
    assert_eq!(EntityKind::Person.normalized(), EntityKind::Person);
    assert_eq!(EntityKind::Organization.normalized(), EntityKind::Organization);
}

#[test]
fn test_entity_serialization_shouldUseTypeField() {
    let entity = Entity::new("Paris", "CITY");

    let json = serde_json::to_value(&entity).unwrap();

    assert_eq!(json, serde_json::json!({ "text": "Paris", "type": "CITY" }));
}
