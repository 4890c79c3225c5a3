use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Temperature {
    pub min: f64,
    pub max: f64,
}

/// One city's weather observation for one date.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub date: NaiveDate,
    pub temperature: Temperature,
    pub humidity: f64,
    pub description: String,
    pub wind_speed: f64,
}

// SQL derivation
impl TryFrom<&Row> for WeatherRecord {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(WeatherRecord {
            city: row.try_get("city")?,
            date: row.try_get("date")?,
            temperature: Temperature {
                min: row.try_get("temperature_min")?,
                max: row.try_get("temperature_max")?,
            },
            humidity: row.try_get("humidity")?,
            description: row.try_get("description")?,
            wind_speed: row.try_get("wind_speed")?,
        })
    }
}

/// Current date on the host's local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
