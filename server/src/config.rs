use anyhow::Context;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "WEATHER_PROVIDER_";

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

impl ProviderConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<ProviderConfig>()
            .context("Missing provider config. Required env vars: WEATHER_PROVIDER_API_KEY (optional: WEATHER_PROVIDER_URL)")
    }
}
