// HTTP request handlers
use crate::application::error::AugmentError;
use crate::domain::chart::{ChartError, ChartSnapshot};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current chart contents
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<ChartSnapshot<String>> {
    Json(state.chart.lock().await.snapshot())
}

/// Extend the chart with a forecast of the base series
pub async fn make_forecast(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSnapshot<String>>, ApiError> {
    // The chart is only locked for the merge, never across the remote call.
    let fragment = state.augment_service.fetch_forecast(&state.base).await?;

    let mut chart = state.chart.lock().await;
    state.augment_service.apply_forecast(&mut *chart, &state.base, fragment)?;
    Ok(Json(chart.snapshot()))
}

/// Highlight the points the service flags as anomalous
pub async fn detect_anomalies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartSnapshot<String>>, ApiError> {
    let flagged = state.augment_service.fetch_anomalies(&state.base).await?;

    let mut chart = state.chart.lock().await;
    state.augment_service.apply_anomalies(&mut *chart, &flagged)?;
    Ok(Json(chart.snapshot()))
}

pub struct ApiError(AugmentError);

impl From<AugmentError> for ApiError {
    fn from(error: AugmentError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AugmentError::Transport(_)
            | AugmentError::MalformedResponse(_)
            | AugmentError::EmptySeries => StatusCode::BAD_GATEWAY,
            AugmentError::EmptyBase => StatusCode::UNPROCESSABLE_ENTITY,
            AugmentError::Chart(ChartError::StaleBase | ChartError::OutOfOrder) => {
                StatusCode::CONFLICT
            }
            AugmentError::Chart(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self.0, %status, "augmentation failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
