use chrono::{Days, NaiveDate};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{today, WeatherRecord};
use crate::provider::WeatherProvider;
use crate::store::WeatherStore;

/// Days on each side of today covered by the history query.
pub const HISTORY_WINDOW_DAYS: u64 = 5;

/// Cache-aside access to weather records.
///
/// The store always wins: a stored record is returned whatever its date, and
/// the provider is only consulted when nothing is stored for the city.
/// Concurrent misses for the same city may each fetch and insert.
pub struct WeatherService {
    store: Arc<dyn WeatherStore>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(store: Arc<dyn WeatherStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { store, provider }
    }

    /// Latest stored record for the city, fetched and stored first on a miss.
    ///
    /// `None` only if the freshly stored record cannot be read back.
    pub async fn current(&self, city: Option<&str>) -> Result<Option<WeatherRecord>> {
        let city = require_city(city)?;

        if let Some(record) = self.store.find_latest(city).await? {
            return Ok(Some(record));
        }

        let fetched = self.provider.fetch_current(city).await?;
        self.store.insert(&fetched).await?;
        log::info!(
            "Stored weather for {} on {}: {}",
            fetched.city,
            fetched.date,
            fetched.description
        );

        self.store.find_latest(city).await
    }

    /// Stored records within the window around today, ascending by date.
    pub async fn history(&self, city: Option<&str>) -> Result<Vec<WeatherRecord>> {
        let city = require_city(city)?;
        let (from, to) = history_window(today());
        self.store.find_range(city, from, to).await
    }

    pub async fn health(&self) -> Result<()> {
        self.store.ping().await
    }
}

fn require_city(city: Option<&str>) -> Result<&str> {
    match city {
        Some(city) if !city.is_empty() => Ok(city),
        _ => Err(Error::BadRequest("City is required".to_string())),
    }
}

pub fn history_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days = Days::new(HISTORY_WINDOW_DAYS);
    (
        today.checked_sub_days(days).unwrap_or(NaiveDate::MIN),
        today.checked_add_days(days).unwrap_or(NaiveDate::MAX),
    )
}
