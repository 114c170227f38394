//! HTTP-level tests for both providers and the failover path, against a
//! local mock server.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parla_core::config::TranslationConfig;
use parla_core::language::resolve;
use parla_core::types::ProviderKind;
use parla_translate::{
    build_http_client, GoogleTranslateProvider, MyMemoryProvider, ProviderFailure,
    TranslateError, TranslationOrchestrator, TranslationProvider,
};

// =============================================================================
// Helpers
// =============================================================================

fn config_for(server: &MockServer) -> TranslationConfig {
    TranslationConfig {
        primary_url: format!("{}/translate_a/single", server.uri()),
        primary_client: "gtx".to_string(),
        fallback_url: format!("{}/get", server.uri()),
        request_timeout_secs: Some(5),
    }
}

fn primary(server: &MockServer) -> GoogleTranslateProvider {
    let config = config_for(server);
    GoogleTranslateProvider::from_config(build_http_client(&config).unwrap(), &config)
}

fn fallback(server: &MockServer) -> MyMemoryProvider {
    let config = config_for(server);
    MyMemoryProvider::from_config(build_http_client(&config).unwrap(), &config)
}

// =============================================================================
// Primary
// =============================================================================

#[tokio::test]
async fn primary_sends_expected_query_and_joins_fragments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "gtx"))
        .and(query_param("sl", "en"))
        .and(query_param("tl", "es"))
        .and(query_param("dt", "t"))
        .and(query_param("q", "Hello world & friends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [["Hola mundo ", "Hello world "], ["y amigos", "& friends"]],
            null,
            "en"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let pair = resolve("en|es").unwrap();
    let text = primary(&server)
        .translate("Hello world & friends", &pair)
        .await
        .unwrap();
    assert_eq!(text, "Hola mundo y amigos");
}

#[tokio::test]
async fn primary_non_2xx_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let pair = resolve("pt|en").unwrap();
    let err = primary(&server).translate("Olá", &pair).await.unwrap_err();
    assert_eq!(err, ProviderFailure::Http { status: 429 });
}

#[tokio::test]
async fn primary_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let pair = resolve("pt|en").unwrap();
    let err = primary(&server).translate("Olá", &pair).await.unwrap_err();
    assert!(matches!(err, ProviderFailure::MalformedResponse(_)));
}

#[tokio::test]
async fn primary_empty_fragments_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[], null, "en"])))
        .mount(&server)
        .await;

    let pair = resolve("en|de").unwrap();
    let err = primary(&server).translate("Hi", &pair).await.unwrap_err();
    assert_eq!(err, ProviderFailure::EmptyResult);
}

#[tokio::test]
async fn primary_unreachable_is_transport_error() {
    let config = TranslationConfig {
        primary_url: "http://127.0.0.1:9/translate_a/single".to_string(),
        ..TranslationConfig::default()
    };
    let provider =
        GoogleTranslateProvider::from_config(build_http_client(&config).unwrap(), &config);

    let pair = resolve("en|es").unwrap();
    let err = provider.translate("Hello", &pair).await.unwrap_err();
    assert!(matches!(err, ProviderFailure::Transport(_)));
}

// =============================================================================
// Fallback
// =============================================================================

#[tokio::test]
async fn fallback_sends_combined_langpair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("q", "Good morning"))
        .and(query_param("langpair", "en|fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseData": {"translatedText": "Bonjour", "match": 0.98},
            "responseStatus": 200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pair = resolve("en|fr").unwrap();
    let text = fallback(&server).translate("Good morning", &pair).await.unwrap();
    assert_eq!(text, "Bonjour");
}

#[tokio::test]
async fn fallback_missing_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responseStatus": 403})))
        .mount(&server)
        .await;

    let pair = resolve("en|fr").unwrap();
    let err = fallback(&server).translate("Hi", &pair).await.unwrap_err();
    assert!(matches!(err, ProviderFailure::MalformedResponse(_)));
}

#[tokio::test]
async fn fallback_server_error_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let pair = resolve("es|pt").unwrap();
    let err = fallback(&server).translate("Hola", &pair).await.unwrap_err();
    assert_eq!(err, ProviderFailure::Http { status: 502 });
}

// =============================================================================
// Failover end to end
// =============================================================================

#[tokio::test]
async fn orchestrator_falls_back_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("langpair", "pt|en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseData": {"translatedText": "Good afternoon"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = TranslationOrchestrator::from_config(&config_for(&server)).unwrap();
    let result = orchestrator.translate("Boa tarde", "pt|en").await.unwrap();
    assert_eq!(result.text, "Good afternoon");
    assert_eq!(result.provider_used, ProviderKind::Fallback);
}

#[tokio::test]
async fn orchestrator_reports_unavailable_when_both_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = TranslationOrchestrator::from_config(&config_for(&server)).unwrap();
    let err = orchestrator.translate("Hallo", "de|en").await.unwrap_err();
    assert_eq!(err, TranslateError::Unavailable);
}

#[tokio::test]
async fn orchestrator_blank_input_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = TranslationOrchestrator::from_config(&config_for(&server)).unwrap();
    let err = orchestrator.translate("   ", "pt|en").await.unwrap_err();
    assert_eq!(err, TranslateError::EmptyInput);
}

#[tokio::test]
async fn orchestrator_accepts_custom_providers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["Hola", "Hello"]]])))
        .mount(&server)
        .await;

    let orchestrator =
        TranslationOrchestrator::new(Arc::new(primary(&server)), Arc::new(fallback(&server)));
    let result = orchestrator.translate("Hello", "en|es").await.unwrap();
    assert_eq!(result.text, "Hola");
    assert_eq!(result.provider_used, ProviderKind::Primary);
}
