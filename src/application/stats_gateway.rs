// Gateway trait for the remote statistics service
use crate::application::error::AugmentError;
use async_trait::async_trait;
use serde_json::Value;

pub const FORECAST_ENDPOINT: &str = "forecast";
pub const ANOMALY_ENDPOINT: &str = "anomaly_detector";

#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// POST a JSON body to `endpoint` and return the decoded JSON reply.
    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, AugmentError>;
}
