// Anomaly client - requests anomaly flags for a series
use crate::application::error::AugmentError;
use crate::application::response_parser::parse_response;
use crate::application::stats_gateway::{ANOMALY_ENDPOINT, StatsGateway};
use crate::domain::series::Series;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How flagged points are located on the displayed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyMatch {
    /// First displayed point with an equal value.
    #[default]
    Value,
    /// Displayed point with an equal timestamp.
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub confidence_level: u32,
    pub seasonality: u32,
    pub horizon: u32,
    pub match_by: AnomalyMatch,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            confidence_level: 90,
            seasonality: 1,
            horizon: 7,
            match_by: AnomalyMatch::Value,
        }
    }
}

#[derive(Serialize)]
struct AnomalyRequest<'a, T> {
    level: u32,
    seasonality: u32,
    timestamp: &'a [T],
    value: &'a [f64],
    fh: u32,
}

#[derive(Clone)]
pub struct AnomalyClient {
    gateway: Arc<dyn StatsGateway>,
    config: AnomalyConfig,
}

impl AnomalyClient {
    pub fn new(gateway: Arc<dyn StatsGateway>, config: AnomalyConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Request the subset of `base` the service considers anomalous.
    pub async fn detect<T>(&self, base: &Series<T>) -> Result<Series<T>, AugmentError>
    where
        T: Serialize + DeserializeOwned,
    {
        if base.is_empty() {
            return Err(AugmentError::EmptyBase);
        }

        let body = serde_json::to_value(AnomalyRequest {
            level: self.config.confidence_level,
            seasonality: self.config.seasonality,
            timestamp: base.timestamps(),
            value: base.values(),
            fh: self.config.horizon,
        })
        .map_err(|e| AugmentError::Transport(format!("failed to encode anomaly request: {e}")))?;

        tracing::debug!(
            points = base.len(),
            level = self.config.confidence_level,
            "requesting anomaly detection"
        );
        let response = self.gateway.post(ANOMALY_ENDPOINT, body).await?;
        parse_response(&response)
    }
}
