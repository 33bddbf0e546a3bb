//! Control surface types: user navigation intents and the widget state
//! mirrored back to the host after every event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::sequencer::Sequencer;

/// A keyboard key name as reported by the host (e.g. `"ArrowLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// A navigation intent dispatched by the host's controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The previous-step trigger fired.
    Prev,
    /// The next-step trigger fired.
    Next,
    /// The range slider reported a value. Raw: may be fractional or out of
    /// range; the engine truncates and clamps.
    Seek(f64),
    /// A document-scoped key press.
    Key(Key),
}

impl ControlEvent {
    /// Map a key press onto a navigation intent, if the key is bound.
    /// `p` and `ArrowLeft` step backward; `n` and `ArrowRight` step forward.
    #[must_use]
    pub fn from_key(key: &Key) -> Option<ControlEvent> {
        match key.0.as_str() {
            "p" | "ArrowLeft" => Some(ControlEvent::Prev),
            "n" | "ArrowRight" => Some(ControlEvent::Next),
            _ => None,
        }
    }
}

/// Widget state the host mirrors onto its controls after every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    /// Whether the previous-step trigger is enabled.
    pub prev_enabled: bool,
    /// Whether the next-step trigger is enabled.
    pub next_enabled: bool,
    /// Upper slider bound; the lower bound is always 0.
    pub slider_max: usize,
    /// Slider position, mirroring the cursor.
    pub slider_value: usize,
}

impl ControlState {
    /// Derive widget state from the sequencer's cursor and bounds. An empty
    /// sequence renders fully disabled.
    #[must_use]
    pub fn of(sequencer: &Sequencer) -> Self {
        Self {
            prev_enabled: !sequencer.at_start(),
            next_enabled: !sequencer.at_end(),
            slider_max: sequencer.len().saturating_sub(1),
            slider_value: sequencer.cursor(),
        }
    }
}
