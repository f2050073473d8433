//! HTTP API routes

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use stock_report::{MarketDataAggregator, StockReport, is_valid_ticker};
use text_analysis::{AnalysisReport, TextAnalyzer};
use tracing::info;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<TextAnalyzer>,
    pub aggregator: Arc<MarketDataAggregator>,
}

impl AppState {
    pub fn new(analyzer: Arc<TextAnalyzer>, aggregator: Arc<MarketDataAggregator>) -> Self {
        Self { analyzer, aggregator }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze-text", post(analyze_text))
        .route("/analyze-stock/:ticker", get(analyze_stock))
        .with_state(state)
}

/// Check a ticker and return it uppercased
pub fn validate_ticker(ticker: &str) -> Result<String, ApiError> {
    if is_valid_ticker(ticker) {
        Ok(ticker.to_ascii_uppercase())
    } else {
        Err(ApiError::BadRequest(format!("Invalid ticker: {ticker:?}")))
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "insight-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeTextRequest {
    text: String,
}

async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    info!(chars = request.text.len(), "analyzing text");
    let analyzer = state.analyzer.clone();
    let report = tokio::task::spawn_blocking(move || analyzer.analyze(&request.text))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(report))
}

async fn analyze_stock(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<StockReport>, ApiError> {
    let ticker = validate_ticker(&ticker)?;
    let report = state.aggregator.fetch(&ticker).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use stock_report::api::{NewsProvider, PriceHistoryProvider, ProfileProvider};
    use stock_report::profile::RawProfile;
    use stock_report::{NewsItem, PriceHistory, StockConfig};
    use text_analysis::{CloudRenderer, WordCloudImage};
    use tower::ServiceExt;

    struct NoCloud;

    impl CloudRenderer for NoCloud {
        fn render(&self, _words: &[String]) -> Option<WordCloudImage> {
            None
        }
    }

    /// Serves a fixed profile, no prices and one article
    struct StubProvider {
        profile: Value,
    }

    #[async_trait]
    impl ProfileProvider for StubProvider {
        fn ensure_configured(&self) -> stock_report::Result<()> {
            Ok(())
        }

        async fn company_profile(&self, _ticker: &str) -> stock_report::Result<RawProfile> {
            Ok(RawProfile {
                profile: self.profile.clone(),
                metric: json!({}),
            })
        }
    }

    #[async_trait]
    impl PriceHistoryProvider for StubProvider {
        fn ensure_configured(&self) -> stock_report::Result<()> {
            Ok(())
        }

        async fn price_history(&self, _ticker: &str, _since: NaiveDate) -> stock_report::Result<PriceHistory> {
            Ok(PriceHistory::default())
        }
    }

    #[async_trait]
    impl NewsProvider for StubProvider {
        fn ensure_configured(&self) -> stock_report::Result<()> {
            Ok(())
        }

        async fn company_news(&self, _ticker: &str, _from: NaiveDate, _to: NaiveDate) -> stock_report::Result<Vec<NewsItem>> {
            Ok(vec![NewsItem {
                title: "Acme wins contract".to_string(),
                link: "https://example.com/acme".to_string(),
                summary: "Orders rose 12%.".to_string(),
                source: "Wire".to_string(),
                published_at: String::new(),
            }])
        }
    }

    fn analyzer() -> Arc<TextAnalyzer> {
        Arc::new(TextAnalyzer::english().unwrap().with_renderer(Arc::new(NoCloud)))
    }

    fn app_with_profile(profile: Value) -> Router {
        let stub = Arc::new(StubProvider { profile });
        let aggregator = MarketDataAggregator::with_providers(
            StockConfig::default(),
            stub.clone(),
            stub.clone(),
            stub,
            analyzer(),
        );
        build_router(AppState::new(analyzer(), Arc::new(aggregator)))
    }

    fn app_without_key() -> Router {
        let aggregator = MarketDataAggregator::new(StockConfig::default(), analyzer()).unwrap();
        build_router(AppState::new(analyzer(), Arc::new(aggregator)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_text(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze-text")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_ticker_validation() {
        for ok in ["AAPL", "BRK1", "f", "msft"] {
            assert!(validate_ticker(ok).is_ok(), "{ok} rejected");
        }
        for bad in ["1AB", "TOOLONG", "A-B", "", "AB C"] {
            assert!(validate_ticker(bad).is_err(), "{bad} accepted");
        }
        assert_eq!(validate_ticker("msft").unwrap(), "MSFT");
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app_without_key().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "insight-server");
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let response = app_without_key()
            .oneshot(post_text(r#"{"text": "Revenue grew 5%. Outlook is strong."}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["keySentences"], json!(["Revenue grew 5%."]));
        assert_eq!(body["sentencesAnalyzed"], 2);
        assert!(body["wordCloudImage"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_text_bad_requests() {
        for body in [r#"{"text": "   "}"#, r#"{"content": "hello"}"#, "not json", r#"{"text": 5}"#] {
            let response = app_without_key().oneshot(post_text(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert!(body_json(response).await["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_analyze_stock_invalid_ticker() {
        let response = app_without_key().oneshot(get("/analyze-stock/1ABC")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_stock_missing_key() {
        let response = app_without_key().oneshot(get("/analyze-stock/AAPL")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("FINNHUB_API_KEY"));
    }

    #[tokio::test]
    async fn test_analyze_stock_not_found() {
        let response = app_with_profile(json!({}))
            .oneshot(get("/analyze-stock/ZZZZ"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_stock_report() {
        let response = app_with_profile(json!({"name": "Acme Corp", "finnhubIndustry": "Industrials"}))
            .oneshot(get("/analyze-stock/acme"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["basicInfo"]["name"], "Acme Corp");
        assert_eq!(body["basicInfo"]["website"], "");
        assert_eq!(body["newsArticles"].as_array().unwrap().len(), 1);
        assert_eq!(body["newsTextAnalysis"]["keySentences"], json!(["Orders rose 12%."]));
        assert_eq!(body["priceHistory"]["dates"], json!([]));
    }
}
