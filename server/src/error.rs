use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),

    #[error("weather provider unreachable")]
    UpstreamUnavailable(#[source] BoxError),

    #[error("weather provider answered with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed weather provider response: {0}")]
    UpstreamMalformedResponse(String),

    #[error("weather store unavailable")]
    StoreUnavailable(#[source] BoxError),
}

impl Error {
    pub fn store<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::StoreUnavailable(err.into())
    }

    pub fn upstream_unavailable<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::UpstreamUnavailable(err.into())
    }

    /// Anything but a bad request is reported to clients as an internal error.
    pub fn is_internal(&self) -> bool {
        !matches!(self, Error::BadRequest(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
