use crate::application::anomaly_client::AnomalyConfig;
use crate::application::forecast_client::ForecastConfig;
use serde::Deserialize;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub service: ServiceSettings,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub anomaly: AnomalyConfig,
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    /// Bearer credential; usually supplied through `AUGMENT__SERVICE__TOKEN`.
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedSettings {
    pub path: String,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/augment"))
        .add_source(env_overlay())
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// `AUGMENT__SECTION__KEY` variables override the file, e.g. `AUGMENT__SERVICE__TOKEN`.
fn env_overlay() -> config::Environment {
    config::Environment::with_prefix("AUGMENT").separator("__")
}
