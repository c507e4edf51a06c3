/*!
 * Tests for the application controller
 */

use nametrans::app_config::Config;
use nametrans::app_controller::{Controller, translate_with_fallback};
use nametrans::entities::Entity;
use nametrans::language_utils::SourceLanguage;
use nametrans::providers::databases;
use nametrans::providers::mock::{MockDictionary, MockGenerator, MockRecognizer};
use nametrans::tools::{GEMINI_CALLER, NAME_EXTRACTOR};
use nametrans::translation::{FALLBACK_SOURCE, FallbackTranslator, TranslationPipeline};

fn pipeline() -> TranslationPipeline<MockRecognizer, MockDictionary> {
    let recognizer = MockRecognizer::with_entities(vec![
        Entity::new("Paris", "LOCATION"),
        Entity::new("Zorblax", "PERSON"),
        Entity::new("Quux", "LOCATION"),
    ]);
    let dictionary = MockDictionary::new().with_entry("Paris", databases::PLACE, "【译名】巴黎");
    TranslationPipeline::new(recognizer, dictionary)
}

#[tokio::test]
async fn test_translate_with_fallback_withoutFallback_shouldKeepNotFound() {
    let result = translate_with_fallback::<_, _, MockGenerator>(&pipeline(), None, "text", SourceLanguage::En)
        .await
        .unwrap();

    assert_eq!(result.found.len(), 1);
    assert_eq!(result.not_found.len(), 2);
}

#[tokio::test]
async fn test_translate_with_fallback_shouldTranslateMissesInOneCall() {
    let model = MockGenerator::replying("佐布拉克斯\n夸克斯");
    let fallback = FallbackTranslator::new(model.clone());

    let result = translate_with_fallback(&pipeline(), Some(&fallback), "text", SourceLanguage::En)
        .await
        .unwrap();

    assert_eq!(model.call_count(), 1);
    assert!(result.not_found.is_empty());
    let found: Vec<(&str, &str, &str)> = result.found
        .iter()
        .map(|e| (e.text.as_str(), e.translation.as_str(), e.source.as_str()))
        .collect();
    assert_eq!(found, vec![
        ("Paris", "巴黎", databases::PLACE),
        ("Zorblax", "佐布拉克斯", FALLBACK_SOURCE),
        ("Quux", "夸克斯", FALLBACK_SOURCE),
    ]);
}

#[tokio::test]
async fn test_translate_with_fallback_withShortReply_shouldLeaveRemainderNotFound() {
    let model = MockGenerator::replying("佐布拉克斯");
    let fallback = FallbackTranslator::new(model.clone());

    let result = translate_with_fallback(&pipeline(), Some(&fallback), "text", SourceLanguage::En)
        .await
        .unwrap();

    assert_eq!(model.call_count(), 1);
    let found: Vec<(&str, &str)> = result.found.iter().map(|e| (e.text.as_str(), e.translation.as_str())).collect();
    assert_eq!(found, vec![("Paris", "巴黎"), ("Zorblax", "佐布拉克斯")]);
    let not_found: Vec<&str> = result.not_found.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(not_found, vec!["Quux"]);
}

#[tokio::test]
async fn test_translate_with_fallback_withFailingModel_shouldKeepDictionaryResult() {
    let fallback = FallbackTranslator::new(MockGenerator::failing());

    let result = translate_with_fallback(&pipeline(), Some(&fallback), "text", SourceLanguage::En)
        .await
        .unwrap();

    assert_eq!(result.found.len(), 1);
    assert_eq!(result.not_found.len(), 2);
}

#[tokio::test]
async fn test_translate_with_fallback_withNothingMissing_shouldNotCallModel() {
    let recognizer = MockRecognizer::with_entities(vec![Entity::new("Paris", "LOCATION")]);
    let dictionary = MockDictionary::new().with_entry("Paris", databases::PLACE, "【译名】巴黎");
    let model = MockGenerator::replying("unused");
    let fallback = FallbackTranslator::new(model.clone());

    translate_with_fallback(&TranslationPipeline::new(recognizer, dictionary), Some(&fallback), "Paris", SourceLanguage::En)
        .await
        .unwrap();

    assert_eq!(model.call_count(), 0);
}

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.ner.timeout_secs = 0;

    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_build_fallback_withoutApiKey_shouldFail() {
    let controller = Controller::with_config(Config::default()).unwrap();

    assert!(controller.build_fallback().is_err());
}

#[test]
fn test_build_registry_shouldRegisterGeminiOnlyWithKey() {
    let controller = Controller::with_config(Config::default()).unwrap();
    assert_eq!(controller.build_registry().unwrap().list_tools(), vec![NAME_EXTRACTOR.to_string()]);

    let mut config = Config::default();
    config.generative.api_key = "test-key".to_string();
    let controller = Controller::with_config(config).unwrap();
    assert_eq!(
        controller.build_registry().unwrap().list_tools(),
        vec![GEMINI_CALLER.to_string(), NAME_EXTRACTOR.to_string()]
    );
}
