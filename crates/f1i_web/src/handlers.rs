use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use f1i_core::{
    AnalysisResult, Article, Driver, DriverResult, Error, InferenceModel, PerformancePoint,
    RaceEvent,
};
use f1i_openf1::report;

use crate::AppState;

/// Error wrapper turning pipeline failures into a status plus a
/// `{"error": "..."}` body. Failures never take the process down.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let status = match &error {
            Error::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidUrl(_) | Error::Scraping(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Api(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("request failed: {}", self.message);
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

fn inference(state: &AppState) -> Result<&Arc<dyn InferenceModel>, ApiError> {
    state.inference.as_ref().ok_or_else(|| {
        ApiError::from(Error::Config(
            "GOOGLE_API_KEY is not set; the analysis feature is unavailable".to_string(),
        ))
    })
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Deserialize)]
pub struct DriversQuery {
    pub name: Option<String>,
}

pub async fn list_drivers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DriversQuery>,
) -> Result<Json<Vec<Driver>>, ApiError> {
    let drivers = state.openf1.get_drivers(query.name.as_deref()).await?;
    Ok(Json(drivers))
}

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

pub async fn driver_results(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u32>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<DriverResult>>, ApiError> {
    let results = state.openf1.get_driver_results(number, query.year).await?;
    Ok(Json(results))
}

pub async fn driver_performance(
    State(state): State<Arc<AppState>>,
    Path(number): Path<u32>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<PerformancePoint>>, ApiError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let series = report::performance_series(&state.openf1, number, year).await?;
    Ok(Json(series))
}

pub async fn race_calendar(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<RaceEvent>>, ApiError> {
    let races = state.openf1.get_race_calendar(year).await?;
    Ok(Json(report::calendar_events(&races, Utc::now())))
}

#[derive(Deserialize)]
pub struct CompareRequest {
    pub driver1: String,
    pub driver2: String,
    pub year: Option<i32>,
}

#[derive(Serialize)]
pub struct CompareResponse {
    pub driver1: Driver,
    pub driver2: Driver,
    pub analysis: String,
}

pub async fn compare_drivers(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    let model = inference(&state)?;
    if request.driver1.trim().eq_ignore_ascii_case(request.driver2.trim()) {
        return Err(ApiError::bad_request("select two different drivers"));
    }

    let driver1 = state
        .openf1
        .find_driver(&request.driver1)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("driver not found: {}", request.driver1)))?;
    let driver2 = state
        .openf1
        .find_driver(&request.driver2)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("driver not found: {}", request.driver2)))?;

    let year = request.year.unwrap_or_else(|| Utc::now().year());
    let (results1, results2) = tokio::try_join!(
        state
            .openf1
            .get_driver_results(driver1.driver_number, Some(year)),
        state
            .openf1
            .get_driver_results(driver2.driver_number, Some(year)),
    )?;

    let report1 = report::driver_report(&state.openf1, &driver1.full_name, &results1).await;
    let report2 = report::driver_report(&state.openf1, &driver2.full_name, &results2).await;

    let analysis = model.compare_drivers(&report1, &report2).await?;
    Ok(Json(CompareResponse {
        driver1,
        driver2,
        analysis,
    }))
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub article: Article,
    pub analysis: AnalysisResult,
}

pub async fn analyze_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let model = inference(&state)?;

    let article = match (request.url, request.text) {
        (Some(url), _) if !url.trim().is_empty() => state.news.scrape_url(url.trim()).await?,
        (_, Some(text)) if !text.trim().is_empty() => Article::from_text(&text),
        _ => return Err(ApiError::bad_request("provide either a url or article text")),
    };

    let analysis = model.analyze_article(&article).await?;
    Ok(Json(AnalyzeResponse { article, analysis }))
}
