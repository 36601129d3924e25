// Forecast client - requests a forward extension of a series
use crate::application::error::AugmentError;
use crate::application::response_parser::parse_response;
use crate::application::stats_gateway::{FORECAST_ENDPOINT, StatsGateway};
use crate::domain::series::Series;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future periods to forecast.
    pub horizon: u32,
    pub seasonality: u32,
    pub cross_validate: bool,
    pub model: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 12,
            seasonality: 12,
            cross_validate: false,
            model: "arima".to_string(),
        }
    }
}

#[derive(Serialize)]
struct ForecastRequest<'a, T> {
    fh: u32,
    seasonality: u32,
    cv: bool,
    timestamp: &'a [T],
    value: &'a [f64],
    model: &'a str,
}

#[derive(Clone)]
pub struct ForecastClient {
    gateway: Arc<dyn StatsGateway>,
    config: ForecastConfig,
}

impl ForecastClient {
    pub fn new(gateway: Arc<dyn StatsGateway>, config: ForecastConfig) -> Self {
        Self { gateway, config }
    }

    /// Request the extension that follows `base`. The service promises the
    /// fragment starts right after the last base point and spans `horizon`
    /// points; neither is re-checked here.
    pub async fn forecast<T>(&self, base: &Series<T>) -> Result<Series<T>, AugmentError>
    where
        T: Serialize + DeserializeOwned,
    {
        if base.is_empty() {
            return Err(AugmentError::EmptyBase);
        }

        let body = serde_json::to_value(ForecastRequest {
            fh: self.config.horizon,
            seasonality: self.config.seasonality,
            cv: self.config.cross_validate,
            timestamp: base.timestamps(),
            value: base.values(),
            model: &self.config.model,
        })
        .map_err(|e| AugmentError::Transport(format!("failed to encode forecast request: {e}")))?;

        tracing::debug!(
            points = base.len(),
            horizon = self.config.horizon,
            model = %self.config.model,
            "requesting forecast"
        );
        let response = self.gateway.post(FORECAST_ENDPOINT, body).await?;
        let fragment = parse_response(&response)?;

        if fragment.len() != self.config.horizon as usize {
            tracing::warn!(
                expected = self.config.horizon,
                received = fragment.len(),
                "forecast length differs from requested horizon"
            );
        }
        Ok(fragment)
    }
}
