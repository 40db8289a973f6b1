//! Display languages and the static label table.
//!
//! The remote source localizes condition descriptions itself (via the `lang`
//! query parameter); everything the client prints on its own comes from here.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "uk")]
    Ukrainian,
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// Code understood by the provider's `lang` parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Ukrainian => "uk",
            Language::German => "de",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::English, Language::Ukrainian, Language::German]
    }

    /// Name of the language in itself, for pickers.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Ukrainian => "Українська",
            Language::German => "Deutsch",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "uk" | "ua" | "ukrainian" => Ok(Language::Ukrainian),
            "de" | "german" => Ok(Language::German),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: en, uk, de."
            )),
        }
    }
}

/// Presentation labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AppTitle,
    Prompt,
    Loading,
    CurrentWeather,
    DailyForecast,
    Temperature,
    FeelsLike,
    MinMax,
    Humidity,
    Pressure,
    WindSpeed,
    Weather,
    Sunrise,
    Sunset,
}

impl Label {
    pub fn text(self, lang: Language) -> &'static str {
        use Label::*;
        use Language::*;

        match (self, lang) {
            (AppTitle, English) => "Weather App",
            (AppTitle, Ukrainian) => "Погода",
            (AppTitle, German) => "Wetter-App",

            (Prompt, English) => "Enter city name",
            (Prompt, Ukrainian) => "Введіть назву міста",
            (Prompt, German) => "Stadtname eingeben",

            (Loading, English) => "Loading...",
            (Loading, Ukrainian) => "Завантаження...",
            (Loading, German) => "Wird geladen...",

            (CurrentWeather, English) => "Current Weather",
            (CurrentWeather, Ukrainian) => "Поточна погода",
            (CurrentWeather, German) => "Aktuelles Wetter",

            (DailyForecast, English) => "5-day Forecast",
            (DailyForecast, Ukrainian) => "Прогноз на 5 днів",
            (DailyForecast, German) => "5-Tage-Vorhersage",

            (Temperature, English) => "Temperature",
            (Temperature, Ukrainian) => "Температура",
            (Temperature, German) => "Temperatur",

            (FeelsLike, English) => "Feels like",
            (FeelsLike, Ukrainian) => "Відчувається як",
            (FeelsLike, German) => "Gefühlt",

            (MinMax, English) => "Min / Max",
            (MinMax, Ukrainian) => "Мін / Макс",
            (MinMax, German) => "Min / Max",

            (Humidity, English) => "Humidity",
            (Humidity, Ukrainian) => "Вологість",
            (Humidity, German) => "Luftfeuchtigkeit",

            (Pressure, English) => "Pressure",
            (Pressure, Ukrainian) => "Тиск",
            (Pressure, German) => "Luftdruck",

            (WindSpeed, English) => "Wind Speed",
            (WindSpeed, Ukrainian) => "Швидкість вітру",
            (WindSpeed, German) => "Windgeschwindigkeit",

            (Weather, English) => "Weather",
            (Weather, Ukrainian) => "Погода",
            (Weather, German) => "Wetter",

            (Sunrise, English) => "Sunrise",
            (Sunrise, Ukrainian) => "Схід сонця",
            (Sunrise, German) => "Sonnenaufgang",

            (Sunset, English) => "Sunset",
            (Sunset, Ukrainian) => "Захід сонця",
            (Sunset, German) => "Sonnenuntergang",
        }
    }
}
