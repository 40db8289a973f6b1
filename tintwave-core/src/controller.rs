//! Async driver around [`AcquisitionState`].
//!
//! Each dispatched fetch runs as its own tokio task and reports back through a
//! channel. Only the controller mutates the state, and each task's result
//! touches only its own slot, so the two fetches never contend.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::{
    Language,
    provider::WeatherSource,
    state::{AcquisitionState, Event, FetchPlan},
};

#[derive(Debug)]
pub struct Controller {
    state: AcquisitionState,
    source: Arc<dyn WeatherSource>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl Controller {
    pub fn new(source: Arc<dyn WeatherSource>, language: Language) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AcquisitionState::new(language),
            source,
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> &AcquisitionState {
        &self.state
    }

    /// Validate `query_text` and, if usable, start both fetches.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, query_text: impl Into<String>) {
        let plan = self.state.handle(Event::Submit(query_text.into()));
        if let Some(plan) = plan {
            self.dispatch(plan);
        }
    }

    /// Switch display language, re-fetching if current conditions are shown.
    pub fn set_language(&mut self, language: Language) {
        let plan = self.state.handle(Event::SetLanguage(language));
        if let Some(plan) = plan {
            self.dispatch(plan);
        }
    }

    /// Wait for one fetch to settle and apply it.
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn next_event(&mut self) -> bool {
        if !self.state.is_loading() {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.state.handle(event);
                true
            }
            None => false,
        }
    }

    /// Apply results until neither slot is loading.
    pub async fn settle(&mut self) -> &AcquisitionState {
        while self.next_event().await {}
        &self.state
    }

    fn dispatch(&self, plan: FetchPlan) {
        let FetchPlan {
            query,
            language,
            current_seq,
            forecast_seq,
        } = plan;

        tracing::debug!(
            query = %query,
            lang = %language,
            current_seq,
            forecast_seq,
            "dispatching fetches"
        );

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        let current_query = query.clone();
        tokio::spawn(async move {
            let result = source.fetch_current(&current_query, language).await;
            // The receiver lives as long as the controller.
            let _ = tx.send(Event::CurrentSettled {
                seq: current_seq,
                result,
            });
        });

        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_forecast(&query, language).await;
            let _ = tx.send(Event::ForecastSettled {
                seq: forecast_seq,
                result,
            });
        });
    }
}
