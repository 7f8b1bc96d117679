use std::sync::{Mutex, MutexGuard};

use tracing::debug;
use unicode_width::UnicodeWidthStr;
use weather_card_core::{Card, DisplaySurface, ErrorCard, InputForm, WeatherCard};

/// What the user can do with the card that is currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardActions {
    Weather { toggle_label: String },
    Error { retry_label: String },
}

#[derive(Debug, Default)]
struct ScreenState {
    card: Option<Card>,
    visible: bool,
}

/// Card surface and input form backed by stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    state: Mutex<ScreenState>,
}

pub const DISMISSED_NOTICE: &str = "  (card dismissed)";

impl ScreenState {
    /// Applies a visibility change. Returns true when a card that was on
    /// screen has just been hidden.
    fn set_visible(&mut self, visible: bool) -> bool {
        let dismissed = self.visible && !visible && self.card.is_some();
        self.visible = visible;
        dismissed
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions offered by the visible card, if any.
    pub fn pending_actions(&self) -> Option<CardActions> {
        let state = self.lock();
        if !state.visible {
            return None;
        }

        match state.card.as_ref()? {
            Card::Weather(card) => Some(CardActions::Weather {
                toggle_label: card.unit_toggle.clone(),
            }),
            Card::Error(card) => Some(CardActions::Error {
                retry_label: card.retry_label.to_string(),
            }),
            Card::Loading(_) => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScreenState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplaySurface for TerminalSurface {
    fn clear(&self) {
        self.lock().card = None;
    }

    fn show(&self, card: Card) {
        let text = render_card(&card);
        let visible = {
            let mut state = self.lock();
            state.card = Some(card);
            state.visible
        };

        if visible {
            println!("{text}");
        }
    }

    fn set_visible(&self, visible: bool) {
        if self.lock().set_visible(visible) {
            println!("{DISMISSED_NOTICE}");
        }
    }
}

// The prompt is only open between requests and always owns focus, so the
// form side has nothing to draw.
impl InputForm for TerminalSurface {
    fn set_busy(&self, busy: bool) {
        debug!(busy, "city input");
    }

    fn focus(&self, select_all: bool) {
        debug!(select_all, "focus city input");
    }
}

pub fn render_card(card: &Card) -> String {
    match card {
        Card::Loading(message) => format!("\n  {message}\n"),
        Card::Weather(card) => render_weather(card),
        Card::Error(card) => render_error(card),
    }
}

fn render_weather(card: &WeatherCard) -> String {
    let lines = [
        card.title.clone(),
        String::new(),
        card.temperature.clone(),
        card.feels_like.clone(),
        format!("💧 {}", card.humidity),
        card.description.clone(),
        card.icon.glyph().to_string(),
        String::new(),
        card.updated.clone(),
    ];
    boxed(&lines)
}

fn render_error(card: &ErrorCard) -> String {
    boxed(&[format!("{} {}", card.icon, card.message)])
}

/// Draws `lines` inside a border, padding by terminal column width so that
/// emoji rows line up with plain ones.
fn boxed(lines: &[String]) -> String {
    let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let rule = "─".repeat(inner + 2);

    let mut out = format!("\n┌{rule}┐\n");
    for line in lines {
        let pad = " ".repeat(inner - line.width());
        out.push_str(&format!("│ {line}{pad} │\n"));
    }
    out.push_str(&format!("└{rule}┘"));
    out
}
