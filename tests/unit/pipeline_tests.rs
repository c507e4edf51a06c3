/*!
 * Tests for the extraction and dictionary translation pipeline
 */

use nametrans::entities::{Entity, EntityKind};
use nametrans::errors::ProviderError;
use nametrans::language_utils::SourceLanguage;
use nametrans::providers::databases;
use nametrans::providers::mock::{MockDictionary, MockRecognizer};
use nametrans::translation::{ResolvedEntity, TranslationPipeline, UnresolvedEntity};

use crate::common;

#[tokio::test]
async fn test_extract_and_translate_withJohnSmithExample_shouldResolveBoth() {
    common::init_logging();
    let dictionary = common::john_smith_dictionary();
    let pipeline = TranslationPipeline::new(common::john_smith_recognizer(), dictionary.clone());

    let result = pipeline
        .extract_and_translate("John Smith is from Paris.", SourceLanguage::En)
        .await
        .unwrap();

    assert_eq!(result.found, vec![
        ResolvedEntity {
            text: "John Smith".to_string(),
            kind: EntityKind::Person,
            translation: "斯米特".to_string(),
            source: "世界人名翻译大辞典 (surname)".to_string(),
        },
        ResolvedEntity {
            text: "Paris".to_string(),
            kind: EntityKind::Location,
            translation: "巴黎".to_string(),
            source: "世界地名翻译大辞典".to_string(),
        },
    ]);
    assert!(result.not_found.is_empty());
    assert_eq!(dictionary.call_count(), 4);
}

#[tokio::test]
async fn test_extract_and_translate_withBareMarkerAndShortPersonEntry_shouldResolveBoth() {
    let dictionary = MockDictionary::new()
        .with_labelled_entry("Paris", databases::PLACE, "【译名】巴黎", "place-src")
        .with_labelled_entry("Smith", databases::PERSON, "Smith史密斯[英]", "person-src");
    let pipeline = TranslationPipeline::new(common::john_smith_recognizer(), dictionary.clone());

    let result = pipeline
        .extract_and_translate("John Smith is from Paris.", SourceLanguage::En)
        .await
        .unwrap();

    // Rows follow discovery order, so John Smith comes before Paris
    let found: Vec<(&str, &str, &str)> = result.found
        .iter()
        .map(|e| (e.text.as_str(), e.translation.as_str(), e.source.as_str()))
        .collect();
    assert_eq!(found, vec![
        ("John Smith", "史密斯", "person-src (surname)"),
        ("Paris", "巴黎", "place-src"),
    ]);
    assert!(result.not_found.is_empty());
    assert_eq!(dictionary.calls()[..3].to_vec(), vec![
        ("John Smith".to_string(), databases::PERSON.to_string()),
        ("John Smith".to_string(), databases::GENERAL.to_string()),
        ("Smith".to_string(), databases::PERSON.to_string()),
    ]);
}

#[tokio::test]
async fn test_extract_and_translate_shouldPassTextAndLanguageToRecognizer() {
    let recognizer = MockRecognizer::with_entities(Vec::new());
    let pipeline = TranslationPipeline::new(recognizer.clone(), MockDictionary::new());

    let result = pipeline.extract_and_translate("Juan vive en Madrid.", SourceLanguage::Es).await.unwrap();

    assert_eq!(result.total(), 0);
    assert_eq!(recognizer.calls(), vec![("Juan vive en Madrid.".to_string(), SourceLanguage::Es)]);
}

#[tokio::test]
async fn test_extract_and_translate_shouldPartitionUniqueEntities() {
    let recognizer = MockRecognizer::with_entities(vec![
        Entity::new("Paris", "LOCATION"),
        Entity::new("Zorblax", "PERSON"),
        Entity::new("paris", "LOCATION"),
        Entity::new("Acme", "ORGANIZATION"),
        Entity::new("Quux", "LOCATION"),
    ]);
    let dictionary = MockDictionary::new()
        .with_entry("Paris", databases::PLACE, "【译名】巴黎");
    let pipeline = TranslationPipeline::new(recognizer, dictionary);

    let result = pipeline.extract_and_translate("...", SourceLanguage::En).await.unwrap();

    // Organizations are filtered out, the duplicate Paris is dropped
    assert_eq!(result.total(), 3);
    let found: Vec<&str> = result.found.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(found, vec!["Paris"]);
    assert_eq!(result.not_found, vec![
        UnresolvedEntity { text: "Zorblax".to_string(), kind: EntityKind::Person },
        UnresolvedEntity { text: "Quux".to_string(), kind: EntityKind::Location },
    ]);
}

#[tokio::test]
async fn test_extract_and_translate_withFailingRecognizer_shouldPropagateError() {
    let dictionary = MockDictionary::new();
    let pipeline = TranslationPipeline::new(MockRecognizer::failing(), dictionary.clone());

    let result = pipeline.extract_and_translate("John Smith", SourceLanguage::En).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
    assert_eq!(dictionary.call_count(), 0);
}

#[tokio::test]
async fn test_extract_and_translate_withFailingDictionary_shouldPropagateError() {
    let pipeline = TranslationPipeline::new(common::john_smith_recognizer(), MockDictionary::failing());

    let result = pipeline.extract_and_translate("John Smith is from Paris.", SourceLanguage::En).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_translate_entities_shouldKeepDiscoveryOrder() {
    let dictionary = MockDictionary::new()
        .with_entry("B", databases::PERSON, "贝贝")
        .with_entry("D", databases::PERSON, "迪迪");
    let pipeline = TranslationPipeline::new(MockRecognizer::default(), dictionary);

    let result = pipeline
        .translate_entities(["A", "B", "C", "D"].iter().map(|n| Entity::new(*n, "PERSON")).collect())
        .await
        .unwrap();

    let found: Vec<&str> = result.found.iter().map(|e| e.text.as_str()).collect();
    let not_found: Vec<&str> = result.not_found.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(found, vec!["B", "D"]);
    assert_eq!(not_found, vec!["A", "C"]);
}

#[test]
fn test_summary_shouldCountBothLists() {
    let mut result = nametrans::TranslationResult::default();
    result.not_found.push(UnresolvedEntity { text: "Quux".to_string(), kind: EntityKind::Location });

    let summary = serde_json::to_value(result.summary()).unwrap();

    assert_eq!(summary["total"], 1);
    assert_eq!(summary["found_count"], 0);
    assert_eq!(summary["not_found_count"], 1);
    assert_eq!(summary["not_found"][0]["type"], "LOCATION");
}

#[test]
fn test_absorb_fallback_shouldMoveIntoFoundAndClearNotFound() {
    let mut result = nametrans::TranslationResult::default();
    result.not_found.push(UnresolvedEntity { text: "Quux".to_string(), kind: EntityKind::Location });

    result.absorb_fallback(vec![ResolvedEntity {
        text: "Quux".to_string(),
        kind: EntityKind::Location,
        translation: "夸克斯".to_string(),
        source: "generative-fallback".to_string(),
    }]);

    assert_eq!(result.found.len(), 1);
    assert!(result.not_found.is_empty());
}

#[test]
fn test_absorb_fallback_withBlankTranslation_shouldKeepEntityUnresolved() {
    let mut result = nametrans::TranslationResult::default();
    result.not_found.push(UnresolvedEntity { text: "Zorblax".to_string(), kind: EntityKind::Person });
    result.not_found.push(UnresolvedEntity { text: "Quux".to_string(), kind: EntityKind::Location });

    result.absorb_fallback(vec![
        ResolvedEntity {
            text: "Zorblax".to_string(),
            kind: EntityKind::Person,
            translation: "佐布拉克斯".to_string(),
            source: "generative-fallback".to_string(),
        },
        ResolvedEntity {
            text: "Quux".to_string(),
            kind: EntityKind::Location,
            translation: String::new(),
            source: "generative-fallback".to_string(),
        },
    ]);

    assert_eq!(result.total(), 2);
    assert_eq!(result.found.len(), 1);
    assert_eq!(result.not_found, vec![UnresolvedEntity { text: "Quux".to_string(), kind: EntityKind::Location }]);
}
