//! Gemini service for single-shot text generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! The credential travels in the `x-goog-api-key` header so request URLs can
//! be logged and put into errors as-is.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    config::gateway_config::GatewayConfig,
    error_handler::{ConfigError, GatewayError, Result, make_snippet},
    extract::extract_answer,
    gateway::PromptGateway,
    prompt::build_prompt,
};

/// Thin client for the Gemini `generateContent` endpoint.
///
/// Keeps a preconfigured `reqwest::Client` with the configured timeout.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: GatewayConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// A missing API key is *not* an error here; it is reported by every
    /// [`GeminiService::generate`] call instead.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] / [`ConfigError::EmptyModel`] for an invalid config
    /// - [`ConfigError::HttpClient`] if the HTTP client cannot be built
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let base = cfg.endpoint.trim().trim_end_matches('/');
        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model.trim());

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs,
            has_api_key = cfg.has_api_key(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Wraps `question` in the prompt template, calls the provider and
    /// extracts the answer text.
    ///
    /// # Errors
    /// - [`ConfigError::MissingApiKey`] if no credential is configured (no request is sent)
    /// - [`GatewayError::Unavailable`] for connection errors and timeouts
    /// - [`GatewayError::HttpStatus`] for non-2xx responses
    /// - [`GatewayError::Decode`] if a 2xx body is not JSON
    #[instrument(skip_all, fields(model = %self.cfg.model, question_len = question.len()))]
    pub async fn generate(&self, question: &str) -> Result<String> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let started = Instant::now();
        let prompt = build_prompt(&self.cfg.prompt_context, question);
        let body = GenerateContentRequest::single(&prompt);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);

        let resp = self
            .client
            .post(&self.url_generate)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| {
                error!(
                    error = %e,
                    timeout = e.is_timeout(),
                    latency_ms = started.elapsed().as_millis(),
                    "generateContent request failed"
                );
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "generateContent returned non-success status"
            );

            return Err(GatewayError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let bytes = resp.bytes().await?;
        let raw: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = %e, "failed to decode generateContent response");
            GatewayError::Decode(format!(
                "serde error: {e}; body: {}",
                make_snippet(&String::from_utf8_lossy(&bytes))
            ))
        })?;
        debug!(raw = %raw, "provider raw response");

        let answer = extract_answer(&raw);

        info!(
            latency_ms = started.elapsed().as_millis(),
            answer_preview = %answer.chars().take(100).collect::<String>(),
            "answer extracted"
        );

        Ok(answer)
    }
}

#[async_trait]
impl PromptGateway for GeminiService {
    async fn ask(&self, question: &str) -> Result<String> {
        self.generate(question).await
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `:generateContent` with a single user turn.
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn single(text: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::json;

    use super::*;
    use crate::extract::UNPARSEABLE_ANSWER;

    /// Serves `app` on an ephemeral port and returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn cfg(endpoint: String, api_key: Option<&str>) -> GatewayConfig {
        GatewayConfig {
            api_key: api_key.map(str::to_owned),
            endpoint,
            model: "gemini-test".into(),
            timeout_secs: 5,
            ..GatewayConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        // Nothing listens on port 9; a request would fail with Unavailable.
        let svc = GeminiService::new(cfg("http://127.0.0.1:9".into(), None)).unwrap();
        let err = svc.generate("What is JSX?").await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Config(ConfigError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn sends_prompt_and_extracts_answer() {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("k-1") {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default();
                if !prompt.ends_with("What is a React hook?") {
                    return (StatusCode::BAD_REQUEST, Json(json!({})));
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "candidates": [ { "content": { "parts": [ { "text": "A hook is..." } ] } } ]
                    })),
                )
            }),
        );
        let base = serve(app).await;

        let svc = GeminiService::new(cfg(base, Some("k-1"))).unwrap();
        let answer = svc.ask("What is a React hook?").await.unwrap();
        assert_eq!(answer, "A hook is...");
    }

    #[tokio::test]
    async fn response_without_candidates_falls_back() {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { Json(json!({ "promptFeedback": {} })) }),
        );
        let base = serve(app).await;

        let svc = GeminiService::new(cfg(base, Some("k"))).unwrap();
        assert_eq!(svc.ask("q").await.unwrap(), UNPARSEABLE_ANSWER);
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        );
        let base = serve(app).await;

        let svc = GeminiService::new(cfg(base, Some("k"))).unwrap();
        let err = svc.ask("q").await.unwrap_err();
        assert!(err.is_unavailable());
        match err {
            GatewayError::HttpStatus { status, snippet, .. } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(snippet, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async { "<html>not json</html>" }),
        );
        let base = serve(app).await;

        let svc = GeminiService::new(cfg(base, Some("k"))).unwrap();
        let err = svc.ask("q").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn refused_connection_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let svc = GeminiService::new(cfg(format!("http://{addr}"), Some("k"))).unwrap();
        let err = svc.ask("q").await.unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out_as_unavailable() {
        let app = Router::new().route(
            "/v1beta/models/{model}",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "candidates": [] }))
            }),
        );
        let base = serve(app).await;

        let mut cfg = cfg(base, Some("k"));
        cfg.timeout_secs = 1;
        let svc = GeminiService::new(cfg).unwrap();

        let err = svc.ask("q").await.unwrap_err();
        assert!(err.is_unavailable());
        match err {
            GatewayError::Unavailable(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn url_is_built_from_endpoint_and_model() {
        let svc = GeminiService::new(cfg("http://localhost:1234/".into(), None)).unwrap();
        assert_eq!(
            svc.url_generate,
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }
}
