// Augment service - Use cases behind the forecast and anomaly actions
use crate::application::anomaly_client::{AnomalyClient, AnomalyMatch};
use crate::application::error::AugmentError;
use crate::application::forecast_client::ForecastClient;
use crate::application::series_merger::{
    append_forecast, mark_anomalies, mark_anomalies_by_timestamp,
};
use crate::domain::chart::ChartSurface;
use crate::domain::series::Series;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct AugmentService {
    forecast_client: ForecastClient,
    anomaly_client: AnomalyClient,
}

impl AugmentService {
    pub fn new(forecast_client: ForecastClient, anomaly_client: AnomalyClient) -> Self {
        Self {
            forecast_client,
            anomaly_client,
        }
    }

    /// Request a forecast for `base`. Holds no reference to the chart, so
    /// callers can keep the chart available while the request is in flight.
    pub async fn fetch_forecast<T>(&self, base: &Series<T>) -> Result<Series<T>, AugmentError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.forecast_client.forecast(base).await
    }

    /// Request anomaly flags for `base`.
    pub async fn fetch_anomalies<T>(&self, base: &Series<T>) -> Result<Series<T>, AugmentError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.anomaly_client.detect(base).await
    }

    /// Append a fetched forecast. Refused with `StaleBase` if the chart has
    /// moved past `base` while the request was in flight. Only call this with
    /// a fragment that parsed cleanly; on error the chart is unchanged.
    pub fn apply_forecast<T, S>(
        &self,
        chart: &mut S,
        base: &Series<T>,
        fragment: Series<T>,
    ) -> Result<usize, AugmentError>
    where
        T: PartialEq,
        S: ChartSurface<T> + ?Sized,
    {
        let appended = append_forecast(chart, base.timestamps(), fragment)?;

        tracing::info!(appended, "forecast merged into chart");
        Ok(appended)
    }

    /// Emphasize fetched anomaly flags using the configured match strategy.
    pub fn apply_anomalies<T, S>(
        &self,
        chart: &mut S,
        fragment: &Series<T>,
    ) -> Result<usize, AugmentError>
    where
        T: PartialEq,
        S: ChartSurface<T> + ?Sized,
    {
        let marked = match self.anomaly_client.config().match_by {
            AnomalyMatch::Value => mark_anomalies(chart, fragment)?,
            AnomalyMatch::Timestamp => mark_anomalies_by_timestamp(chart, fragment)?,
        };

        if marked < fragment.len() {
            tracing::warn!(
                flagged = fragment.len(),
                marked,
                "some flagged points are not on the chart"
            );
        }
        tracing::info!(flagged = fragment.len(), marked, "anomalies marked on chart");
        Ok(marked)
    }
}
