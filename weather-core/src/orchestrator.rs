use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{
    Failure, ValidationError, WeatherClient, WeatherSnapshot,
    display::InputForm,
    model::{RequestState, TemperatureUnit},
    render::ViewRenderer,
    validate::validate_city,
};

/// Keyboard shortcuts understood by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Hide the card and return focus to the city input.
    Escape,
    /// Ctrl/Cmd+K: focus the city input and select its text.
    FocusSearch,
}

/// What a call to [`RequestOrchestrator::submit`] ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A request was already in flight.
    Ignored,
    Invalid(ValidationError),
    Displayed(WeatherSnapshot),
    Failed(Failure),
}

#[derive(Debug, Default)]
struct Inner {
    state: RequestState,
    live: Option<WeatherSnapshot>,
}

/// Top-level controller: validates input, guards against overlapping
/// requests and routes results to the renderer.
#[derive(Debug)]
pub struct RequestOrchestrator {
    client: Arc<dyn WeatherClient>,
    renderer: ViewRenderer,
    form: Arc<dyn InputForm>,
    inner: Mutex<Inner>,
}

impl RequestOrchestrator {
    pub fn new(
        client: Arc<dyn WeatherClient>,
        renderer: ViewRenderer,
        form: Arc<dyn InputForm>,
    ) -> Self {
        Self {
            client,
            renderer,
            form,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Starts in `unit` instead of Fahrenheit.
    pub fn with_unit(self, unit: TemperatureUnit) -> Self {
        self.lock().state.current_unit = unit;
        self
    }

    pub fn state(&self) -> RequestState {
        self.lock().state
    }

    pub fn live_snapshot(&self) -> Option<WeatherSnapshot> {
        self.lock().live.clone()
    }

    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if self.lock().state.is_loading {
            debug!("request already in flight; ignoring submit");
            return SubmitOutcome::Ignored;
        }

        let city = match validate_city(input) {
            Ok(city) => city,
            Err(err) => {
                debug!(%err, "rejected city input");
                self.lock().live = None;
                self.renderer.render_error(&err.to_string());
                return SubmitOutcome::Invalid(err);
            }
        };

        let Some(_loading) = LoadingGuard::enter(self) else {
            return SubmitOutcome::Ignored;
        };

        match self.client.fetch_weather(city).await {
            Ok(snapshot) => {
                let unit = {
                    let mut inner = self.lock();
                    inner.live = Some(snapshot.clone());
                    inner.state.current_unit
                };
                self.renderer.render_snapshot(&snapshot, unit);
                SubmitOutcome::Displayed(snapshot)
            }
            Err(failure) => {
                warn!(%failure, city, "weather fetch failed");
                self.lock().live = None;
                self.renderer.render_error(failure.user_message());
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// Flips the temperature unit and redraws the live snapshot, if any.
    /// Does nothing while a request is in flight.
    pub fn toggle_unit(&self) -> Option<TemperatureUnit> {
        let (snapshot, unit) = {
            let mut inner = self.lock();
            if inner.state.is_loading {
                return None;
            }
            let snapshot = inner.live.clone()?;
            inner.state.current_unit = inner.state.current_unit.toggled();
            (snapshot, inner.state.current_unit)
        };

        self.renderer.render_snapshot(&snapshot, unit);
        Some(unit)
    }

    /// The error card's retry action.
    pub fn retry(&self) {
        self.dismiss();
    }

    pub fn handle_shortcut(&self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Escape => self.dismiss(),
            Shortcut::FocusSearch => self.form.focus(true),
        }
    }

    fn dismiss(&self) {
        self.lock().live = None;
        self.renderer.hide();
        self.form.focus(false);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the loading state; dropping it always returns the form to idle.
struct LoadingGuard<'a> {
    orchestrator: &'a RequestOrchestrator,
}

impl<'a> LoadingGuard<'a> {
    fn enter(orchestrator: &'a RequestOrchestrator) -> Option<Self> {
        {
            let mut inner = orchestrator.lock();
            if inner.state.is_loading {
                return None;
            }
            inner.state.is_loading = true;
            inner.live = None;
        }

        orchestrator.form.set_busy(true);
        orchestrator.renderer.render_loading();
        Some(Self { orchestrator })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.orchestrator.lock().state.is_loading = false;
        self.orchestrator.form.set_busy(false);
    }
}
