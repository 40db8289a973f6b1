//! Core library for the `tintwave` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the remote weather source (OpenWeather)
//! - Shared domain models (current conditions, forecasts)
//! - Reduction of 3-hour forecasts to a daily summary
//! - The acquisition state machine and its async controller
//!
//! It is used by `tintwave-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod forecast;
pub mod i18n;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use controller::Controller;
pub use forecast::{ForecastError, daily_summary};
pub use i18n::{Label, Language};
pub use model::{
    City, Condition, CurrentConditions, ForecastEntry, ForecastSet, ForecastStamp,
    LocationQuery, Measurements, SunInfo, Wind,
};
pub use provider::{FetchError, OpenWeatherSource, WeatherSource};
pub use state::{AcquisitionError, AcquisitionState, Event, FetchPlan, Slot, SlotKind, SlotState};
