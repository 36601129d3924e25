use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{detect_anomalies, get_chart, health_check, make_forecast};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/chart", get(get_chart))
        .route("/forecast", post(make_forecast))
        .route("/anomalies", post(detect_anomalies))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
