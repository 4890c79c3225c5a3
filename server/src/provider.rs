use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::models::{today, Temperature, WeatherRecord};

/// Source of truth consulted on a cache miss.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            url: config.url,
            api_key: config.api_key,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_record(self, city: &str) -> Result<WeatherRecord> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                Error::UpstreamMalformedResponse("no weather conditions in response".to_string())
            })?;

        Ok(WeatherRecord {
            city: city.to_string(),
            date: today(),
            temperature: Temperature {
                min: self.main.temp_min,
                max: self.main.temp_max,
            },
            humidity: self.main.humidity,
            description,
            wind_speed: self.wind.speed,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(Error::upstream_unavailable)?;

        let status = res.status();
        let body = res.text().await.map_err(Error::upstream_unavailable)?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| Error::UpstreamMalformedResponse(e.to_string()))?;

        parsed.into_record(city)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
