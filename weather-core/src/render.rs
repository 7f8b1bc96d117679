use chrono::{DateTime, Local};
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tracing::debug;

use crate::{
    display::{Card, DisplaySurface, ErrorCard, LOADING_MESSAGE, WeatherCard},
    format::{WeatherIcon, capitalize_words, format_temperature},
    model::{TemperatureUnit, WeatherSnapshot},
};

pub const DEFAULT_ERROR_AUTO_HIDE: Duration = Duration::from_secs(10);

/// Builds cards and pushes them to the display surface.
///
/// Every render bumps a generation counter; a pending error auto-hide only
/// fires if nothing has been rendered since it was scheduled.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    surface: Arc<dyn DisplaySurface>,
    generation: Arc<AtomicU64>,
    error_auto_hide: Duration,
}

impl ViewRenderer {
    pub fn new(surface: Arc<dyn DisplaySurface>) -> Self {
        Self::with_auto_hide(surface, DEFAULT_ERROR_AUTO_HIDE)
    }

    pub fn with_auto_hide(surface: Arc<dyn DisplaySurface>, error_auto_hide: Duration) -> Self {
        Self {
            surface,
            generation: Arc::new(AtomicU64::new(0)),
            error_auto_hide,
        }
    }

    pub fn render_loading(&self) {
        self.replace(Card::Loading(LOADING_MESSAGE.to_string()));
    }

    pub fn render_snapshot(&self, snapshot: &WeatherSnapshot, unit: TemperatureUnit) {
        self.render_snapshot_at(snapshot, unit, Local::now());
    }

    pub fn render_snapshot_at(
        &self,
        snapshot: &WeatherSnapshot,
        unit: TemperatureUnit,
        now: DateTime<Local>,
    ) {
        self.replace(Card::Weather(weather_card(snapshot, unit, now)));
    }

    /// Shows an error card and schedules it to hide itself.
    pub fn render_error(&self, message: &str) {
        let scheduled_for = self.replace(Card::Error(ErrorCard::new(message)));

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime; error card will not auto-hide");
            return;
        };

        let surface = Arc::clone(&self.surface);
        let generation = Arc::clone(&self.generation);
        let delay = self.error_auto_hide;

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) == scheduled_for {
                debug!("auto-hiding error card");
                surface.set_visible(false);
            }
        });
    }

    pub fn hide(&self) {
        self.surface.set_visible(false);
    }

    fn replace(&self, card: Card) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.surface.clear();
        self.surface.set_visible(true);
        self.surface.show(card);
        generation
    }
}

fn weather_card(snapshot: &WeatherSnapshot, unit: TemperatureUnit, now: DateTime<Local>) -> WeatherCard {
    let (temperature, feels_like) =
        format_temperature(snapshot.temperature_c, snapshot.feels_like_c, unit);

    WeatherCard {
        title: snapshot.title(),
        temperature,
        feels_like: format!("Feels like {feels_like}"),
        humidity: format!("Humidity: {}%", snapshot.humidity_pct),
        description: capitalize_words(&snapshot.description),
        icon: WeatherIcon::for_code(snapshot.condition_code),
        unit_toggle: format!("Switch to {}", unit.toggled().symbol()),
        updated: format!("Updated: {}", now.format("%H:%M:%S")),
    }
}
