/*!
 * Integration tests for the Dict Reader client against a mock server
 */

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nametrans::entities::EntityKind;
use nametrans::errors::ProviderError;
use nametrans::providers::dict_reader::{DictReader, MatchStrategy, database_for_kind};
use nametrans::providers::{DictionaryLookup, databases};

#[tokio::test]
async fn test_lookup_withFoundWord_shouldReturnFirstDefinition() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/define"))
        .and(body_json(json!({ "word": "Paris", "database": "place" })))
        .and(header("X-API-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "found": true,
            "definitions": [
                { "definition": "Paris 【国家】法 【译名】巴黎", "database": "place", "database_name": "世界地名翻译大辞典" },
                { "definition": "second", "database": "place", "database_name": "other" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DictReader::new(server.uri(), "secret", 5).unwrap();
    let outcome = client.lookup_place("Paris").await.unwrap().unwrap();

    assert_eq!(outcome.translation, "Paris 【国家】法 【译名】巴黎");
    assert_eq!(outcome.source, "世界地名翻译大辞典");
    assert_eq!(outcome.database_id, "place");
}

#[tokio::test]
async fn test_lookup_withNotFound_shouldReturnNone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/define"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "found": false, "definitions": [] })))
        .mount(&server)
        .await;

    let client = DictReader::new(server.uri(), "", 5).unwrap();

    assert_eq!(client.lookup("Zorblax", databases::PERSON).await.unwrap(), None);
}

#[tokio::test]
async fn test_lookup_withoutDatabaseName_shouldFallBackToRequestedDatabase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/define"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "found": true,
            "definitions": [{ "definition": "史密斯" }]
        })))
        .mount(&server)
        .await;

    let client = DictReader::new(server.uri(), "", 5).unwrap();
    let outcome = client.lookup_general("Smith").await.unwrap().unwrap();

    assert_eq!(outcome.source, databases::GENERAL);
    assert_eq!(outcome.database_id, databases::GENERAL);
}

#[tokio::test]
async fn test_lookup_withUnauthorized_shouldReturnAuthenticationError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = DictReader::new(server.uri(), "wrong", 5).unwrap();
    let result = client.lookup_person("Smith").await;

    assert!(matches!(result, Err(ProviderError::AuthenticationError(_))));
}

#[tokio::test]
async fn test_lookup_withServerError_shouldReturnApiError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = DictReader::new(server.uri(), "", 5).unwrap();
    let result = client.lookup_by_entity_kind("Lyon", &EntityKind::City).await;

    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 502, .. })));
}

#[tokio::test]
async fn test_match_pattern_shouldPostStrategy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/match"))
        .and(body_json(json!({ "pattern": "Smi", "database": "person", "strategy": "prefix" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matches": ["Smith", "Smithson"] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DictReader::new(server.uri(), "", 5).unwrap();
    let matches = client.match_pattern("Smi", databases::PERSON, MatchStrategy::Prefix).await.unwrap();

    assert_eq!(matches, vec![json!("Smith"), json!("Smithson")]);
}

#[tokio::test]
async fn test_health_check_shouldReflectServerStatus() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let healthy = DictReader::new(server.uri(), "", 5).unwrap();
    assert!(healthy.health_check().await);

    let unreachable = DictReader::new("http://127.0.0.1:1", "", 2).unwrap();
    assert!(!unreachable.health_check().await);
}

#[test]
fn test_database_for_kind_shouldMapKinds() {
    assert_eq!(database_for_kind(&EntityKind::Person), databases::PERSON);
    assert_eq!(database_for_kind(&EntityKind::Country), databases::PLACE);
    assert_eq!(database_for_kind(&EntityKind::Organization), databases::ALL);
}
