use chrono::NaiveDate;

use crate::db;
use crate::models::WeatherRecord;

const LATEST_STMT: &str = r#"
    SELECT city, date, temperature_min, temperature_max, humidity, description, wind_speed
    FROM weather_records
    WHERE city = $1
    ORDER BY date DESC, id DESC
    LIMIT 1"#;

const BETWEEN_STMT: &str = r#"
    SELECT city, date, temperature_min, temperature_max, humidity, description, wind_speed
    FROM weather_records
    WHERE city = $1 AND date >= $2 AND date <= $3
    ORDER BY date ASC, id ASC"#;

pub async fn create(client: &db::Client<'_>, record: &WeatherRecord) -> Result<(), tokio_postgres::Error> {
    client
        .execute(
            "INSERT INTO weather_records \
            (city, date, temperature_min, temperature_max, humidity, description, wind_speed) \
            VALUES ($1, $2, $3, $4, $5, $6, $7)",
            &[
                &record.city,
                &record.date,
                &record.temperature.min,
                &record.temperature.max,
                &record.humidity,
                &record.description,
                &record.wind_speed,
            ],
        )
        .await?;
    Ok(())
}

/// Latest record by date; among same-day duplicates the last inserted wins.
pub async fn latest(
    client: &db::Client<'_>,
    city: &str,
) -> Result<Option<WeatherRecord>, tokio_postgres::Error> {
    match client.query_opt(LATEST_STMT, &[&city]).await? {
        Some(row) => Ok(Some(WeatherRecord::try_from(&row)?)),
        None => Ok(None),
    }
}

pub async fn list_between(
    client: &db::Client<'_>,
    city: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<WeatherRecord>, tokio_postgres::Error> {
    let rows = client.query(BETWEEN_STMT, &[&city, &from, &to]).await?;
    super::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Same-day duplicates: BIGSERIAL id carries insertion order.

    #[test]
    fn test_latest_prefers_last_inserted_on_same_day() {
        assert!(LATEST_STMT.contains("ORDER BY date DESC, id DESC"));
        assert!(LATEST_STMT.trim_end().ends_with("LIMIT 1"));
    }

    #[test]
    fn test_between_keeps_insertion_order_within_a_day() {
        assert!(BETWEEN_STMT.contains("date >= $2 AND date <= $3"));
        assert!(BETWEEN_STMT.contains("ORDER BY date ASC, id ASC"));
    }
}
