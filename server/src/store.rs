use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db;
use crate::error::{Error, Result};
use crate::models::WeatherRecord;
use crate::repos;

/// Append-only persistence for weather records.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Record for `city` with the greatest date, if any.
    async fn find_latest(&self, city: &str) -> Result<Option<WeatherRecord>>;

    /// Records for `city` dated within `from..=to`, ascending by date.
    async fn find_range(
        &self,
        city: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WeatherRecord>>;

    async fn insert(&self, record: &WeatherRecord) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}

pub struct PgWeatherStore {
    pool: db::Pool,
}

impl PgWeatherStore {
    pub fn new(pool: db::Pool) -> Self {
        Self { pool }
    }

    async fn client(&self) -> Result<db::Client<'_>> {
        self.pool.get().await.map_err(Error::store)
    }
}

#[async_trait]
impl WeatherStore for PgWeatherStore {
    async fn find_latest(&self, city: &str) -> Result<Option<WeatherRecord>> {
        let client = self.client().await?;
        repos::weather_records::latest(&client, city)
            .await
            .map_err(Error::store)
    }

    async fn find_range(
        &self,
        city: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WeatherRecord>> {
        let client = self.client().await?;
        repos::weather_records::list_between(&client, city, from, to)
            .await
            .map_err(Error::store)
    }

    async fn insert(&self, record: &WeatherRecord) -> Result<()> {
        let client = self.client().await?;
        repos::weather_records::create(&client, record)
            .await
            .map_err(Error::store)
    }

    async fn ping(&self) -> Result<()> {
        db::health(&self.pool).await.map_err(Error::store)
    }
}
