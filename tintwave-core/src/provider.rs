use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::{CurrentConditions, ForecastSet, Language, LocationQuery};

pub mod openweather;

pub use openweather::OpenWeatherSource;

/// Failure of a single request to a weather source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source answered with a non-success status (unknown city, bad key, ...).
    #[error("weather source responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to reach weather source: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode weather source response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { .. })
    }
}

/// Remote source of current conditions and 3-hour forecasts.
///
/// Units are always metric; `lang` selects the language of the
/// human-readable descriptions embedded in the payload.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
        lang: Language,
    ) -> Result<CurrentConditions, FetchError>;

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        lang: Language,
    ) -> Result<ForecastSet, FetchError>;
}

/// A non-success response is a `Status` error even when its body can't be read.
pub(crate) fn status_error<E>(status: StatusCode, body: Result<String, E>) -> FetchError {
    FetchError::Status {
        status,
        body: truncate_body(&body.unwrap_or_default()),
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("city not found"), "city not found");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let long = "ї".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn unreadable_error_body_still_reports_status() {
        let err = status_error(StatusCode::NOT_FOUND, Err::<String, _>("connection reset"));

        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.is_empty());
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_truncates_body() {
        let err = status_error::<()>(StatusCode::UNAUTHORIZED, Ok("x".repeat(500)));
        match err {
            FetchError::Status { body, .. } => assert_eq!(body.len(), 203),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn only_status_errors_count_as_not_found() {
        let status = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(status.is_not_found());

        let decode = FetchError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(!decode.is_not_found());
    }
}
