use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::forecast::ForecastError;

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// A place name as typed by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Primary condition descriptor, e.g. `{ id: 800, main: "Clear", ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("{ICON_URL_BASE}/{}@2x.png", self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunInfo {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current-conditions document for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub weather: Vec<Condition>,
    pub main: Measurements,
    pub wind: Wind,
    pub sys: SunInfo,
    /// Shift from UTC in seconds for the resolved location.
    #[serde(default)]
    pub timezone: i32,
}

impl CurrentConditions {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds.
    pub dt: i64,
    /// `YYYY-MM-DD HH:MM:SS` as delivered by the provider.
    pub dt_txt: String,
    pub main: Measurements,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

impl ForecastEntry {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Parse `dt_txt` into its calendar date and (if present) time of day.
    pub fn stamp(&self) -> Result<ForecastStamp, ForecastError> {
        ForecastStamp::parse(&self.dt_txt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// Forecast document: ordered entries plus the resolved city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    pub list: Vec<ForecastEntry>,
    pub city: City,
}

impl ForecastSet {
    /// One representative entry per calendar day, at most five.
    /// Recomputed on every call.
    pub fn daily_summary(&self) -> Result<Vec<ForecastEntry>, ForecastError> {
        crate::forecast::daily_summary(&self.list)
    }
}

/// Structured form of a `dt_txt` value.
///
/// The date portion is mandatory. A missing or unreadable time portion leaves
/// `time` empty rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastStamp {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl ForecastStamp {
    pub fn parse(value: &str) -> Result<Self, ForecastError> {
        let value = value.trim();
        let (date_part, time_part) = match value.split_once(' ') {
            Some((date, time)) => (date, Some(time.trim())),
            None => (value, None),
        };

        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|source| {
            ForecastError::InvalidDateTime {
                value: value.to_string(),
                source,
            }
        })?;

        let time = time_part.and_then(|t| {
            NaiveTime::parse_from_str(t, "%H:%M:%S")
                .ok()
                .or_else(|| leading_hour(t))
        });

        Ok(Self { date, time })
    }

    pub fn hour(&self) -> Option<u32> {
        self.time.map(|t| t.hour())
    }
}

/// Hour from the digits before the first `:` ("12", "15:30", "09:00:00.000").
fn leading_hour(time: &str) -> Option<NaiveTime> {
    let hour = time.split(':').next()?.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_JSON: &str = r#"{
        "coord": {"lon": 30.52, "lat": 50.45},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 12.4, "feels_like": 11.2, "temp_min": 10.0, "temp_max": 13.9,
                 "pressure": 1016, "humidity": 71},
        "wind": {"speed": 4.1, "deg": 250},
        "sys": {"country": "UA", "sunrise": 1760501000, "sunset": 1760540000},
        "timezone": 10800,
        "name": "Kyiv",
        "cod": 200
    }"#;

    #[test]
    fn location_query_trims_and_rejects_blank() {
        assert_eq!(LocationQuery::parse("  Kyiv ").unwrap().as_str(), "Kyiv");
        assert!(LocationQuery::parse("").is_none());
        assert!(LocationQuery::parse(" \t\n").is_none());
    }

    #[test]
    fn current_conditions_decode_ignores_extra_fields() {
        let current: CurrentConditions = serde_json::from_str(CURRENT_JSON).unwrap();

        assert_eq!(current.name, "Kyiv");
        assert_eq!(current.sys.country, "UA");
        assert_eq!(current.main.humidity, 71);
        assert_eq!(current.main.pressure, 1016.0);
        assert_eq!(current.timezone, 10800);
        assert_eq!(current.condition().unwrap().description, "broken clouds");
    }

    #[test]
    fn current_conditions_decode_fails_without_main() {
        let err = serde_json::from_str::<CurrentConditions>(r#"{"name": "Kyiv"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn icon_url_substitutes_code() {
        let current: CurrentConditions = serde_json::from_str(CURRENT_JSON).unwrap();
        assert_eq!(
            current.condition().unwrap().icon_url(),
            "https://openweathermap.org/img/wn/04d@2x.png"
        );
    }

    #[test]
    fn stamp_parses_date_and_hour() {
        let stamp = ForecastStamp::parse("2026-01-01 15:00:00").unwrap();
        assert_eq!(stamp.date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(stamp.hour(), Some(15));
    }

    #[test]
    fn stamp_without_time_has_no_hour() {
        let stamp = ForecastStamp::parse("2026-01-01").unwrap();
        assert_eq!(stamp.hour(), None);

        let stamp = ForecastStamp::parse("2026-01-01 noon").unwrap();
        assert_eq!(stamp.hour(), None);
    }

    #[test]
    fn stamp_accepts_bare_and_partial_hours() {
        assert_eq!(ForecastStamp::parse("2026-01-01 12").unwrap().hour(), Some(12));
        assert_eq!(ForecastStamp::parse("2026-01-01 15:30").unwrap().hour(), Some(15));
        assert_eq!(ForecastStamp::parse("2026-01-01 25").unwrap().hour(), None);
    }

    #[test]
    fn stamp_rejects_malformed_date() {
        let err = ForecastStamp::parse("01/01/2026 12:00:00").unwrap_err();
        assert!(err.to_string().contains("01/01/2026"));
    }
}
