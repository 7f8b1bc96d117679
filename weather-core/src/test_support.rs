//! Recording doubles shared by the unit tests.

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    Failure, WeatherClient, WeatherSnapshot,
    display::{Card, DisplaySurface, InputForm},
};

pub(crate) fn paris() -> WeatherSnapshot {
    WeatherSnapshot {
        city: "Paris".into(),
        country: Some("FR".into()),
        temperature_c: 20.0,
        feels_like_c: 19.0,
        humidity_pct: 60,
        description: "clear sky".into(),
        condition_code: 800,
        wind_speed_mps: Some(3.6),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceEvent {
    Clear,
    Show(Card),
    Visible(bool),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub(crate) fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Card currently on the surface, if any.
    pub(crate) fn current(&self) -> Option<Card> {
        let mut current = None;
        for event in self.events() {
            match event {
                SurfaceEvent::Clear => current = None,
                SurfaceEvent::Show(card) => current = Some(card),
                SurfaceEvent::Visible(_) => {}
            }
        }
        current
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.events()
            .iter()
            .rev()
            .find_map(|event| match event {
                SurfaceEvent::Visible(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl DisplaySurface for RecordingSurface {
    fn clear(&self) {
        self.events.lock().unwrap().push(SurfaceEvent::Clear);
    }

    fn show(&self, card: Card) {
        self.events.lock().unwrap().push(SurfaceEvent::Show(card));
    }

    fn set_visible(&self, visible: bool) {
        self.events.lock().unwrap().push(SurfaceEvent::Visible(visible));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormEvent {
    Busy(bool),
    Focus { select_all: bool },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingForm {
    events: Mutex<Vec<FormEvent>>,
}

impl RecordingForm {
    pub(crate) fn events(&self) -> Vec<FormEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.events()
            .iter()
            .rev()
            .find_map(|event| match event {
                FormEvent::Busy(busy) => Some(*busy),
                FormEvent::Focus { .. } => None,
            })
            .unwrap_or(false)
    }
}

impl InputForm for RecordingForm {
    fn set_busy(&self, busy: bool) {
        self.events.lock().unwrap().push(FormEvent::Busy(busy));
    }

    fn focus(&self, select_all: bool) {
        self.events.lock().unwrap().push(FormEvent::Focus { select_all });
    }
}

/// Replays queued results, optionally after a delay, and counts calls.
#[derive(Debug, Default)]
pub(crate) struct ScriptedClient {
    results: Mutex<VecDeque<Result<WeatherSnapshot, Failure>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    cities: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub(crate) fn new(results: impl IntoIterator<Item = Result<WeatherSnapshot, Failure>>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            ..Self::default()
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn cities(&self) -> Vec<String> {
        self.cities.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherClient for ScriptedClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, Failure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cities.lock().unwrap().push(city.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(Failure::Unknown))
    }
}
