use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{CurrentConditions, ForecastSet, Language, LocationQuery};

use super::{FetchError, WeatherSource, status_error};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point at a different endpoint root, e.g. a proxy or a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
        lang: Language,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, query = %query, lang = %lang, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", lang.code()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(status_error(status, res.text().await));
        }

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
        lang: Language,
    ) -> Result<CurrentConditions, FetchError> {
        self.get("weather", query, lang).await
    }

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        lang: Language,
    ) -> Result<ForecastSet, FetchError> {
        self.get("forecast", query, lang).await
    }
}
