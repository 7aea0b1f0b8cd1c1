//! Conversions from external infrastructure errors into domain errors.

use praxis_domain::PraxisError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PraxisError);

impl From<InfraError> for PraxisError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PraxisError> for InfraError {
    fn from(value: PraxisError) -> Self {
        Self(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        let mapped = match value {
            SqlError::QueryReturnedNoRows => {
                PraxisError::NotFound("no rows returned by query".into())
            }
            SqlError::SqliteFailure(err, maybe_message) => PraxisError::Database(format!(
                "sqlite failure {:?} (code {}): {}",
                err.code,
                err.extended_code,
                maybe_message.unwrap_or_default()
            )),
            other => PraxisError::Database(format!("sqlite error: {other}")),
        };
        Self(mapped)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        Self(PraxisError::Database(format!("connection pool error: {value}")))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let mapped = if value.is_timeout() {
            PraxisError::Network(format!("request timed out: {value}"))
        } else {
            PraxisError::Network(format!("http error: {value}"))
        };
        Self(mapped)
    }
}

/// Map any infrastructure error straight to the domain error, for use in
/// `map_err` chains.
pub(crate) fn into_domain<E: Into<InfraError>>(error: E) -> PraxisError {
    error.into().0
}
