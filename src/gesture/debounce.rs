//! Edge triggering, global cooldown and hysteresis for gesture events.
//!
//! Each frame the controller compares the classifier's level-triggered
//! predicates against the previous frame's snapshot held in `ToggleState`,
//! emits events for inactive→active transitions that clear the cooldown, and
//! finally overwrites the snapshot. MoveCursor is continuous: it is sampled on
//! its own interval and never touches the global cooldown.

use std::time::Duration;

use serde::Serialize;

use crate::gesture::classifier::HandReading;
use crate::gesture::config::DebounceConfig;
use crate::gesture::types::{GestureEvent, GestureKind, MouseButton, ScrollDirection};

/// Session-scoped mode flags and the previous-frame snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleState {
    pub scroll_enabled: bool,
    pub all_gestures_enabled: bool,
    pub previous_scroll_direction: ScrollDirection,
    pub previous_click_left: bool,
    pub previous_click_right: bool,
    pub previous_fist: bool,
    pub last_event_time: Option<Duration>,
    pub last_move_sample_time: Option<Duration>,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            scroll_enabled: true,
            all_gestures_enabled: true,
            previous_scroll_direction: ScrollDirection::None,
            previous_click_left: false,
            previous_click_right: false,
            previous_fist: false,
            last_event_time: None,
            last_move_sample_time: None,
        }
    }
}

impl ToggleState {
    pub fn toggle_scroll(&mut self) -> bool {
        self.scroll_enabled = !self.scroll_enabled;
        self.scroll_enabled
    }

    pub fn toggle_all_gestures(&mut self) -> bool {
        self.all_gestures_enabled = !self.all_gestures_enabled;
        self.all_gestures_enabled
    }
}

/// Events and pointer side effects produced by one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameActions {
    pub events: Vec<GestureEvent>,
    /// Vertical wheel delta to apply this frame, if any.
    pub scroll_delta: Option<i32>,
    pub clicks: Vec<MouseButton>,
}

#[derive(Debug, Clone)]
pub struct DebounceController {
    cooldown: Duration,
    move_sample_interval: Duration,
}

impl DebounceController {
    pub fn new(config: &DebounceConfig) -> Self {
        Self {
            cooldown: config.cooldown(),
            move_sample_interval: config.move_sample_interval(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    fn cooldown_elapsed(&self, state: &ToggleState, now: Duration) -> bool {
        state
            .last_event_time
            .map_or(true, |last| now.saturating_sub(last) >= self.cooldown)
    }

    fn emit(&self, state: &mut ToggleState, actions: &mut FrameActions, kind: GestureKind, now: Duration) {
        state.last_event_time = Some(now);
        actions.events.push(GestureEvent::new(kind, now));
    }

    /// Throttled MoveCursor sample. Returns an event at most once per interval.
    pub fn sample_move(&self, state: &mut ToggleState, now: Duration) -> Option<GestureEvent> {
        let due = state
            .last_move_sample_time
            .map_or(true, |last| now.saturating_sub(last) >= self.move_sample_interval);
        if !due {
            return None;
        }
        state.last_move_sample_time = Some(now);
        Some(GestureEvent::new(GestureKind::MoveCursor, now))
    }

    /// Applies one frame of predicates for the controlling hand.
    pub fn apply(&self, state: &mut ToggleState, reading: &HandReading, now: Duration) -> FrameActions {
        let mut actions = FrameActions::default();

        let prev_fist = state.previous_fist;
        let prev_scroll = state.previous_scroll_direction;
        let prev_left = state.previous_click_left;
        let prev_right = state.previous_click_right;

        // Fist toggle is deliberately not gated by all_gestures_enabled.
        if reading.is_fist && !prev_fist && self.cooldown_elapsed(state, now) {
            let enabled = state.toggle_scroll();
            tracing::debug!(scroll_enabled = enabled, "Scroll mode toggled by fist");
            self.emit(state, &mut actions, GestureKind::ToggleScrollMode, now);
        }

        let scroll_allowed = state.scroll_enabled && state.all_gestures_enabled;
        let current_scroll = if scroll_allowed {
            reading.scroll
        } else {
            ScrollDirection::None
        };
        let scroll_kind = match current_scroll {
            ScrollDirection::Up => {
                actions.scroll_delta = Some(1);
                Some(GestureKind::ScrollUp)
            }
            ScrollDirection::Down => {
                actions.scroll_delta = Some(-1);
                Some(GestureKind::ScrollDown)
            }
            ScrollDirection::None => None,
        };
        if let Some(kind) = scroll_kind {
            if current_scroll != prev_scroll && self.cooldown_elapsed(state, now) {
                self.emit(state, &mut actions, kind, now);
            }
        }

        if state.all_gestures_enabled {
            if reading.click_left && !prev_left && self.cooldown_elapsed(state, now) {
                actions.clicks.push(MouseButton::Left);
                self.emit(state, &mut actions, GestureKind::ClickLeft, now);
            }
            if reading.click_right && !prev_right && self.cooldown_elapsed(state, now) {
                actions.clicks.push(MouseButton::Right);
                self.emit(state, &mut actions, GestureKind::ClickRight, now);
            }
        }

        state.previous_fist = reading.is_fist;
        state.previous_scroll_direction = current_scroll;
        state.previous_click_left = reading.click_left;
        state.previous_click_right = reading.click_right;

        actions
    }
}

impl Default for DebounceController {
    fn default() -> Self {
        Self::new(&DebounceConfig::default())
    }
}
