//! HTTP interface for the feedback pipeline.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::analyzer::{split_feedback_lines, Analyzer, SAMPLE_FEEDBACK};
use crate::config::AppConfig;
use crate::lexicon::{Lexicon, Topic};
use crate::models::{AnalysisResult, SentimentDistribution, SentimentLabel, ThemeCluster};

pub struct AppState {
    pub analyzer: Analyzer,
    pub lexicon: Arc<Lexicon>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(lexicon: Arc<Lexicon>, config: AppConfig) -> Self {
        Self {
            analyzer: Analyzer::new(lexicon.clone(), config.thresholds),
            lexicon,
            config,
        }
    }
}

/// Either a list of feedback lines or one pasted block (one item per line).
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub texts: Option<Vec<String>>,
    pub raw: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SampleResponse {
    pub lines: Vec<String>,
    pub report: AnalysisResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze_feedback, sample_report, list_topics, health),
    components(
        schemas(
            AnalyzeRequest,
            SampleResponse,
            HealthResponse,
            ErrorResponse,
            AnalysisResult,
            ThemeCluster,
            SentimentDistribution,
            SentimentLabel,
            Topic
        )
    ),
    tags(
        (name = "analysis", description = "Feedback analysis API"),
        (name = "lexicon", description = "Taxonomy inspection")
    )
)]
pub struct ApiDoc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/analyze", post(analyze_feedback))
        .route("/sample", get(sample_report))
        .route("/lexicon/topics", get(list_topics))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Analyze a batch of feedback
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Aggregate report", body = AnalysisResult),
        (status = 400, description = "Neither or both of texts/raw given", body = ErrorResponse),
        (status = 413, description = "Too many feedback items", body = ErrorResponse),
        (status = 422, description = "Body is not a valid AnalyzeRequest", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("⚠️ Rejected analyze body: {}", rejection.body_text());
        api_error(rejection.status(), rejection.body_text())
    })?;

    let texts = match (req.texts, req.raw) {
        (Some(texts), None) => texts
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>(),
        (None, Some(raw)) => split_feedback_lines(&raw),
        (Some(_), Some(_)) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Provide either 'texts' or 'raw', not both",
            ))
        }
        (None, None) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Missing 'texts' or 'raw' in request body",
            ))
        }
    };

    if texts.len() > state.config.max_items {
        return Err(api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "Too many feedback items: {} (limit {})",
                texts.len(),
                state.config.max_items
            ),
        ));
    }

    info!("📥 Analyzing {} feedback items", texts.len());
    let report = run_analysis(state, texts).await?;

    info!(
        "✅ Report ready: {} items, {} themes, avg sentiment {:.2}",
        report.total_count,
        report.top_themes.len(),
        report.average_sentiment
    );
    Ok(Json(report))
}

/// Run the CPU-bound pipeline off the async workers.
async fn run_analysis(state: Arc<AppState>, texts: Vec<String>) -> Result<AnalysisResult, ApiError> {
    tokio::task::spawn_blocking(move || state.analyzer.analyze(&texts))
        .await
        .map_err(|e| {
            error!("❌ Analysis task failed: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
        })
}

/// Report for the built-in demo feedback
#[utoipa::path(
    get,
    path = "/sample",
    responses(
        (status = 200, description = "Demo lines and their report", body = SampleResponse),
        (status = 500, description = "Analysis task failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn sample_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SampleResponse>, ApiError> {
    let lines: Vec<String> = SAMPLE_FEEDBACK.iter().map(|s| s.to_string()).collect();
    let report = run_analysis(state, lines.clone()).await?;
    Ok(Json(SampleResponse { lines, report }))
}

/// Taxonomy topics in match-priority order
#[utoipa::path(
    get,
    path = "/lexicon/topics",
    responses((status = 200, description = "Topics and their keywords", body = [Topic])),
    tag = "lexicon"
)]
pub async fn list_topics(State(state): State<Arc<AppState>>) -> Json<Vec<Topic>> {
    Json(state.lexicon.topic_keywords().to_vec())
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "analysis"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app_with(config: AppConfig) -> Router {
        let state = Arc::new(AppState::new(Arc::new(Lexicon::builtin()), config));
        router(state)
    }

    fn app() -> Router {
        app_with(AppConfig::default())
    }

    async fn post_json(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_analyze_texts() {
        let (status, json) = post_json(
            app(),
            serde_json::json!({ "texts": ["I love the new dark mode, it looks amazing!", "   "] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["sentimentDistribution"]["positive"], 1);
        assert_eq!(json["topThemes"][0]["name"], "User Experience (UX)");
        assert_eq!(json["actionableInsights"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_raw_block() {
        let raw = "Billing is a nightmare, I got charged twice.\n\nGreat performance!\n";
        let (status, json) = post_json(app(), serde_json::json!({ "raw": raw })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalCount"], 2);
    }

    #[tokio::test]
    async fn test_analyze_empty_list() {
        let (status, json) = post_json(app(), serde_json::json!({ "texts": [] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalCount"], 0);
        assert_eq!(json["averageSentiment"], 0.0);
        assert!(json["topThemes"].as_array().unwrap().is_empty());
        assert_eq!(json["actionableInsights"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_requires_exactly_one_input() {
        let (status, json) = post_json(app(), serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("Missing"));

        let (status, _) =
            post_json(app(), serde_json::json!({ "texts": ["a"], "raw": "b" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_malformed_body_is_json_error() {
        let (status, json) = post_json(app(), serde_json::json!({ "texts": 5 })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("invalid type"));

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_batch() {
        let config = AppConfig {
            max_items: 2,
            ..AppConfig::default()
        };
        let (status, _) = post_json(
            app_with(config),
            serde_json::json!({ "texts": ["one", "two", "three"] }),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_sample_endpoint() {
        let (status, json) = get_json(app(), "/sample").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["lines"].as_array().unwrap().len(), SAMPLE_FEEDBACK.len());
        assert_eq!(json["report"]["totalCount"], SAMPLE_FEEDBACK.len());
        assert_eq!(json["report"]["topThemes"][0]["name"], "User Experience (UX)");
        assert_eq!(json["report"]["actionableInsights"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_topics_in_order() {
        let (status, json) = get_json(app(), "/lexicon/topics").await;
        assert_eq!(status, StatusCode::OK);
        let topics = json.as_array().unwrap();
        assert_eq!(topics.len(), 6);
        assert_eq!(topics[0]["name"], "Pricing & Value");
        assert_eq!(topics[5]["name"], "Features");
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let (status, json) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");

        let (status, json) = get_json(app(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"].get("/analyze").is_some());
    }
}
