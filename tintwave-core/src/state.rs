//! Acquisition state machine.
//!
//! Two independent slots (current conditions and forecast) each move through
//! `Idle -> Loading -> Loaded | Failed`. Every fetch carries the slot's
//! sequence number at dispatch; a result is applied only if that number is
//! still the slot's latest, so a superseded request can never overwrite a
//! newer one.

use thiserror::Error;

use crate::{
    CurrentConditions, ForecastEntry, ForecastSet, Language, LocationQuery,
    forecast::ForecastError, provider::FetchError,
};

/// User-visible acquisition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    #[error("no location entered")]
    MissingLocation,
    #[error("current conditions not found")]
    CurrentNotFound,
    #[error("forecast not found")]
    ForecastNotFound,
    #[error("unknown error")]
    Unknown,
}

impl AcquisitionError {
    /// Classify a failed fetch for the given slot.
    pub fn from_fetch(slot: SlotKind, err: &FetchError) -> Self {
        match (slot, err.is_not_found()) {
            (SlotKind::Current, true) => AcquisitionError::CurrentNotFound,
            (SlotKind::Forecast, true) => AcquisitionError::ForecastNotFound,
            (_, false) => AcquisitionError::Unknown,
        }
    }

    pub fn message(&self, lang: Language) -> &'static str {
        use AcquisitionError::*;
        use Language::*;

        match (self, lang) {
            (MissingLocation, English) => "Please enter a city name",
            (MissingLocation, Ukrainian) => "Будь ласка, введіть назву міста",
            (MissingLocation, German) => "Bitte geben Sie einen Stadtnamen ein",

            (CurrentNotFound, English) => "City not found",
            (CurrentNotFound, Ukrainian) => "Місто не знайдено",
            (CurrentNotFound, German) => "Stadt nicht gefunden",

            (ForecastNotFound, English) => "Forecast not found",
            (ForecastNotFound, Ukrainian) => "Прогноз не знайдено",
            (ForecastNotFound, German) => "Vorhersage nicht gefunden",

            (Unknown, English) => "An unknown error occurred",
            (Unknown, Ukrainian) => "Сталася невідома помилка",
            (Unknown, German) => "Ein unbekannter Fehler ist aufgetreten",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Current,
    Forecast,
}

/// Exactly one of: nothing yet, in flight, data, error.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(AcquisitionError),
}

impl<T> Default for SlotState<T> {
    fn default() -> Self {
        SlotState::Idle
    }
}

impl<T> SlotState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SlotState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            SlotState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<AcquisitionError> {
        match self {
            SlotState::Failed(err) => Some(*err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    state: SlotState<T>,
    latest: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            state: SlotState::Idle,
            latest: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    /// Sequence number of the most recently dispatched request.
    pub fn latest(&self) -> u64 {
        self.latest
    }

    fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.state = SlotState::Loading;
        self.latest
    }

    /// Returns `false` if `seq` is stale and the result was dropped.
    fn settle(&mut self, seq: u64, next: SlotState<T>) -> bool {
        if seq != self.latest {
            return false;
        }
        self.state = next;
        true
    }
}

/// Inputs to [`AcquisitionState::handle`].
#[derive(Debug)]
pub enum Event {
    Submit(String),
    SetLanguage(Language),
    CurrentSettled {
        seq: u64,
        result: Result<CurrentConditions, FetchError>,
    },
    ForecastSettled {
        seq: u64,
        result: Result<ForecastSet, FetchError>,
    },
}

/// Both fetches to dispatch after a submit or language change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub query: LocationQuery,
    pub language: Language,
    pub current_seq: u64,
    pub forecast_seq: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcquisitionState {
    query_text: String,
    active_query: Option<LocationQuery>,
    language: Language,
    input_error: Option<AcquisitionError>,
    current: Slot<CurrentConditions>,
    forecast: Slot<ForecastSet>,
}

impl AcquisitionState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// The last query that passed validation and was dispatched.
    pub fn active_query(&self) -> Option<&LocationQuery> {
        self.active_query.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn current(&self) -> &Slot<CurrentConditions> {
        &self.current
    }

    pub fn forecast(&self) -> &Slot<ForecastSet> {
        &self.forecast
    }

    pub fn is_loading(&self) -> bool {
        self.current.state.is_loading() || self.forecast.state.is_loading()
    }

    pub fn input_error(&self) -> Option<AcquisitionError> {
        self.input_error
    }

    /// The error to show, if any: input first, then current, then forecast.
    pub fn error(&self) -> Option<AcquisitionError> {
        self.input_error
            .or_else(|| self.current.state.error())
            .or_else(|| self.forecast.state.error())
    }

    /// Derived on demand from the loaded forecast; never stored.
    pub fn daily_summary(&self) -> Option<Result<Vec<ForecastEntry>, ForecastError>> {
        self.forecast.state.data().map(ForecastSet::daily_summary)
    }

    /// Apply one event. Returns the fetches to start, if any.
    pub fn handle(&mut self, event: Event) -> Option<FetchPlan> {
        match event {
            Event::Submit(text) => {
                let parsed = LocationQuery::parse(&text);
                self.query_text = text;

                match parsed {
                    Some(query) => {
                        self.input_error = None;
                        self.active_query = Some(query);
                        self.begin_fetch()
                    }
                    None => {
                        self.input_error = Some(AcquisitionError::MissingLocation);
                        None
                    }
                }
            }
            Event::SetLanguage(lang) => {
                let changed = self.language != lang;
                self.language = lang;

                if changed && self.current.state.data().is_some() {
                    self.begin_fetch()
                } else {
                    None
                }
            }
            Event::CurrentSettled { seq, result } => {
                let next = match result {
                    Ok(data) => SlotState::Loaded(data),
                    Err(err) => {
                        tracing::warn!(error = %err, "current conditions fetch failed");
                        SlotState::Failed(AcquisitionError::from_fetch(SlotKind::Current, &err))
                    }
                };
                if !self.current.settle(seq, next) {
                    tracing::debug!(
                        seq,
                        latest = self.current.latest,
                        "dropping stale current result"
                    );
                }
                None
            }
            Event::ForecastSettled { seq, result } => {
                let next = match result {
                    Ok(data) => SlotState::Loaded(data),
                    Err(err) => {
                        tracing::warn!(error = %err, "forecast fetch failed");
                        SlotState::Failed(AcquisitionError::from_fetch(SlotKind::Forecast, &err))
                    }
                };
                if !self.forecast.settle(seq, next) {
                    tracing::debug!(
                        seq,
                        latest = self.forecast.latest,
                        "dropping stale forecast result"
                    );
                }
                None
            }
        }
    }

    fn begin_fetch(&mut self) -> Option<FetchPlan> {
        let query = self.active_query.clone()?;
        let current_seq = self.current.begin();
        let forecast_seq = self.forecast.begin();

        Some(FetchPlan {
            query,
            language: self.language,
            current_seq,
            forecast_seq,
        })
    }
}
