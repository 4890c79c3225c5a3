use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::ProviderConfig;
use crate::db;
use crate::error::Error;
use crate::provider::OpenWeatherClient;
use crate::store::PgWeatherStore;
use crate::weather::WeatherService;

const INTERNAL_ERROR_MESSAGE: &str = "Error fetching weather data";

pub async fn run(
    address: SocketAddr,
    database_url: &str,
    provider: ProviderConfig,
) -> anyhow::Result<()> {
    let pool = db::pool(database_url)
        .await
        .with_context(|| format!("Failed to connect to DB: {}", database_url))?;

    let service = Arc::new(WeatherService::new(
        Arc::new(PgWeatherStore::new(pool)),
        Arc::new(OpenWeatherClient::new(provider)),
    ));

    log::info!("Server running on http://{}", address);
    warp::serve(routes(service)).run(address).await;
    Ok(())
}

pub fn routes(
    service: Arc<WeatherService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_route = warp::path!("health")
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(health);

    let weather_route = warp::path!("api" / "weather")
        .and(warp::get())
        .and(warp::query::<CityQuery>())
        .and(with_service(service.clone()))
        .and_then(current_weather);

    let history_route = warp::path!("api" / "weather" / "history")
        .and(warp::get())
        .and(warp::query::<CityQuery>())
        .and(with_service(service))
        .and_then(weather_history);

    let cors = warp::cors().allow_any_origin().allow_method("GET");

    health_route
        .or(weather_route)
        .or(history_route)
        .recover(rejection)
        .with(cors)
        .with(warp::log("weather_cache::http"))
}

fn with_service(
    service: Arc<WeatherService>,
) -> impl Filter<Extract = (Arc<WeatherService>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || service.clone())
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    city: Option<String>,
}

pub async fn health(service: Arc<WeatherService>) -> Result<impl Reply, Rejection> {
    service
        .health()
        .await
        .map_err(reject)
        .map(|_| StatusCode::OK)
}

pub async fn current_weather(
    query: CityQuery,
    service: Arc<WeatherService>,
) -> Result<impl Reply, Rejection> {
    let record = service
        .current(query.city.as_deref())
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&record))
}

pub async fn weather_history(
    query: CityQuery,
    service: Arc<WeatherService>,
) -> Result<impl Reply, Rejection> {
    let records = service
        .history(query.city.as_deref())
        .await
        .map_err(reject)?;
    Ok(warp::reply::json(&records))
}

#[derive(Debug)]
struct ApiError(Error);
impl warp::reject::Reject for ApiError {}

fn reject(err: Error) -> Rejection {
    warp::reject::custom(ApiError(err))
}

#[derive(Serialize)]
struct ErrorMessage {
    error: String,
}

/// Maps our own failures and bad query strings; anything else is left to
/// warp's defaults.
pub async fn rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if err.find::<warp::reject::InvalidQuery>().is_some() {
        return Ok(error_reply(
            StatusCode::BAD_REQUEST,
            "Invalid query string".to_string(),
        ));
    }

    let Some(ApiError(error)) = err.find::<ApiError>() else {
        return Err(err);
    };

    if error.is_internal() {
        log::error!("Error fetching weather data: {:?}", error);
        Ok(error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE.to_string(),
        ))
    } else {
        Ok(error_reply(StatusCode::BAD_REQUEST, error.to_string()))
    }
}

fn error_reply(code: StatusCode, message: String) -> warp::reply::WithStatus<warp::reply::Json> {
    let json = warp::reply::json(&ErrorMessage { error: message });
    warp::reply::with_status(json, code)
}
