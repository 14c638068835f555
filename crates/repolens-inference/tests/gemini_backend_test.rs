//! Integration tests for the Generative Language API backend.
//!
//! Runs the real HTTP client against a wiremock server to verify URLs,
//! query-string credentials, body shape per protocol version and error
//! classification.

use std::time::Duration;

use repolens_inference::{
    CandidateBackend, Error, FinishReason, GeminiBackend, GenerationParams, GenerationRequest,
    ModelLister, ReportBackend, ReportConfig, ReportLanguage, UpstreamKind,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ReportConfig {
    ReportConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    }
}

fn request() -> GenerationRequest {
    GenerationRequest {
        prompt: "Analyze this repository".to_string(),
        system_instruction: Some("Start with ## ARCHITECTURAL_SUMMARY".to_string()),
        language: ReportLanguage::English,
        params: GenerationParams::default(),
    }
}

fn generation_response(text: &str, finish_reason: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": finish_reason
        }]
    })
}

#[tokio::test]
async fn test_list_models_filters_and_strips_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/gemini-2.0-flash",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/text-embedding-004",
                    "supportedGenerationMethods": ["embedContent"]
                },
                {
                    "name": "models/gemini-1.5-pro",
                    "supportedGenerationMethods": ["generateContent"]
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&config(&server)).unwrap();
    let models = backend.list_models("v1beta").await.unwrap();

    assert_eq!(models, vec!["gemini-2.0-flash", "gemini-1.5-pro"]);
}

#[tokio::test]
async fn test_list_models_error_is_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "denied", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&config(&server)).unwrap();
    let err = backend.list_models("v1").await.unwrap_err();

    match err {
        Error::Upstream { kind, status, .. } => {
            assert_eq!(kind, UpstreamKind::Unauthorized);
            assert_eq!(status, Some(403));
        }
        other => panic!("Expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_sends_key_and_system_instruction_on_v1beta() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(generation_response("## STACK\n- Rust", "STOP")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&config(&server)).unwrap();
    let candidate = CandidateBackend::new("gemini-2.0-flash", "v1beta");
    let doc = backend.generate(&candidate, &request()).await.unwrap();

    assert_eq!(doc.text, "## STACK\n- Rust");
    assert_eq!(doc.finish_reason, FinishReason::Stop);

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Analyze this repository");
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("ARCHITECTURAL_SUMMARY"));
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
}

#[tokio::test]
async fn test_generate_omits_system_instruction_on_v1() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.0-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(generation_response("text", "MAX_TOKENS")),
        )
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&config(&server)).unwrap();
    let candidate = CandidateBackend::new("gemini-2.0-flash", "v1");
    let doc = backend.generate(&candidate, &request()).await.unwrap();
    assert!(doc.finish_reason.is_truncated());

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(body.get("systemInstruction").is_none());
}

#[tokio::test]
async fn test_generate_404_is_model_unusable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-9:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "models/gemini-9 is not found for API version v1beta",
                "status": "NOT_FOUND"
            }
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&config(&server)).unwrap();
    let candidate = CandidateBackend::new("gemini-9", "v1beta");
    let err = backend.generate(&candidate, &request()).await.unwrap_err();

    assert!(err.is_model_unusable(), "got {:?}", err);
}

#[tokio::test]
async fn test_generate_quota_is_blocking() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&server)
        .await;

    let backend = GeminiBackend::new(&config(&server)).unwrap();
    let candidate = CandidateBackend::new("gemini-2.0-flash", "v1beta");
    let err = backend.generate(&candidate, &request()).await.unwrap_err();

    assert!(!err.is_model_unusable());
    assert_eq!(err.status(), Some(429));
    assert_eq!(err.reason_code(), "RESOURCE_EXHAUSTED");
}

#[tokio::test]
async fn test_generate_timeout_is_model_unusable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/slow-model:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(generation_response("late", "STOP"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ReportConfig {
        timeout_secs: 1,
        ..config(&server)
    };
    let backend = GeminiBackend::new(&config).unwrap();
    let candidate = CandidateBackend::new("slow-model", "v1beta");
    let err = backend.generate(&candidate, &request()).await.unwrap_err();

    assert!(err.is_model_unusable(), "got {:?}", err);
}

#[tokio::test]
async fn test_missing_api_key_is_config_error() {
    let server = MockServer::start().await;
    let config = ReportConfig {
        api_key: None,
        ..config(&server)
    };
    let backend = GeminiBackend::new(&config).unwrap();

    let err = backend.list_models("v1beta").await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let candidate = CandidateBackend::new("gemini-2.0-flash", "v1beta");
    let err = backend.generate(&candidate, &request()).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}
