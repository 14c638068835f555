//! HTTP tests for the analysis endpoints.
//!
//! Serves the real router on an ephemeral port with a static metadata
//! provider and the scripted generation backend.

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use repolens_api::{router, AnalysisService, AppState};
use repolens_core::{Error, MetadataProvider, RepositorySnapshot, Result, UpstreamKind};
use repolens_inference::mock::{MockBackend, Scripted};
use repolens_inference::{AcceptancePolicy, CandidateResolver, ReportGenerator};

struct StaticMetadata;

#[async_trait]
impl MetadataProvider for StaticMetadata {
    async fn fetch(&self, reference: &str) -> Result<RepositorySnapshot> {
        if reference.ends_with("/missing") {
            return Err(Error::NotFound(reference.to_string()));
        }
        if reference.ends_with("/limited") {
            return Err(Error::RateLimited("GitHub returned 403".to_string()));
        }
        Ok(RepositorySnapshot {
            name: "widget".to_string(),
            topics: vec!["cli".to_string()],
            ..Default::default()
        })
    }
}

async fn spawn_server(backend: MockBackend) -> String {
    let backend = Arc::new(backend);
    let generator = ReportGenerator::new(
        backend.clone(),
        backend,
        CandidateResolver::new(None, vec!["v1beta".to_string()], vec!["m".to_string()]),
        AcceptancePolicy::default(),
    );
    let state = AppState::new(AnalysisService::new(Arc::new(StaticMetadata), generator));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn post_analyze(base_url: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_health() {
    let base_url = spawn_server(MockBackend::new()).await;
    let body: Value = reqwest::get(format!("{}/health", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_analyze_returns_generated_report() {
    let backend = MockBackend::new().script(
        "m",
        "v1beta",
        Scripted::text(
            "Intro\n### 1. Resumo Arquitetural\nA CLI.\n**Stack:**\n- Rust\n## Pontos Fortes\n- Fast",
        ),
    );
    let base_url = spawn_server(backend).await;

    let (status, body) = post_analyze(
        &base_url,
        json!({ "repoUrl": "https://github.com/acme/widget", "lang": "en" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "model");
    assert_eq!(body["model"], "m");
    assert_eq!(body["apiVersion"], "v1beta");
    assert_eq!(body["score"], 3);
    assert!(body["analysis"]
        .as_str()
        .unwrap()
        .starts_with("## ARCHITECTURAL_SUMMARY"));
    let keys: Vec<&str> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["ARCHITECTURAL_SUMMARY", "STACK", "STRENGTHS"]);
}

#[tokio::test]
async fn test_analyze_falls_back_on_quota() {
    let backend = MockBackend::new().script(
        "m",
        "v1beta",
        Scripted::error(Error::Upstream {
            kind: UpstreamKind::QuotaExceeded,
            status: Some(429),
            provider_status: Some("RESOURCE_EXHAUSTED".to_string()),
            message: "quota".to_string(),
        }),
    );
    let base_url = spawn_server(backend).await;

    let (status, body) = post_analyze(
        &base_url,
        json!({ "repoUrl": "https://github.com/acme/widget", "lang": "pt-BR" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["fallbackReason"], "RESOURCE_EXHAUSTED");
    assert_eq!(body["score"], 6);
    assert!(body.get("model").is_none());
    assert!(body["analysis"]
        .as_str()
        .unwrap()
        .contains("> **Nota:** Análise gerada em modo fallback (RESOURCE_EXHAUSTED)."));
    assert_eq!(body["sections"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_missing_repo_url_is_bad_request() {
    let base_url = spawn_server(MockBackend::new()).await;

    let (status, body) = post_analyze(&base_url, json!({ "lang": "en" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "repoUrl is required.");

    let (status, _) = post_analyze(&base_url, json!({ "repoUrl": "   " })).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_metadata_errors_carry_status_and_hint() {
    let base_url = spawn_server(MockBackend::new()).await;

    let (status, body) = post_analyze(
        &base_url,
        json!({ "repoUrl": "https://github.com/acme/missing" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Failed to analyze repository");
    assert!(body["details"].as_str().unwrap().contains("acme/missing"));
    assert!(body["hint"].is_string());

    let (status, body) = post_analyze(
        &base_url,
        json!({ "repoUrl": "https://github.com/acme/limited", "lang": "pt" }),
    )
    .await;
    assert_eq!(status, 429);
    assert_eq!(body["error"], "Erro ao analisar repositório");
    assert_eq!(
        body["hint"],
        "Limite de requisições atingido. Aguarde e tente novamente."
    );
}
