//! Per-frame gesture pipeline: exit check, classification, debouncing and
//! cursor mapping for one batch of detected hands.

use std::time::Duration;

use crate::gesture::classifier::{GestureClassifier, HandReading};
use crate::gesture::config::GestureConfig;
use crate::gesture::cursor::{map_to_screen, ScreenPosition};
use crate::gesture::debounce::{DebounceController, ToggleState};
use crate::gesture::exit::{ExitDetector, ExitProgress, ExitState};
use crate::gesture::types::{FrameSize, GestureEvent, GestureKind, HandPose, MouseButton, ScreenSize};

/// Mutable per-session state threaded through every `process_frame` call.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub toggles: ToggleState,
    pub exit: ExitDetector,
}

impl SessionContext {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            toggles: ToggleState::default(),
            exit: ExitDetector::new(config.exit.hold()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Emitted events in emission order. MoveCursor samples come first.
    pub events: Vec<GestureEvent>,
    pub cursor: Option<ScreenPosition>,
    pub scroll_delta: Option<i32>,
    pub clicks: Vec<MouseButton>,
    pub exit: ExitProgress,
    pub reading: Option<HandReading>,
}

impl FrameOutcome {
    pub fn exit_confirmed(&self) -> bool {
        self.exit.state == ExitState::Confirmed
    }
}

#[derive(Debug, Clone)]
pub struct GestureEngine {
    classifier: GestureClassifier,
    debounce: DebounceController,
}

impl GestureEngine {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(config.classifier.clone()),
            debounce: DebounceController::new(&config.debounce),
        }
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn process_frame(
        &self,
        ctx: &mut SessionContext,
        hands: &[HandPose],
        frame: FrameSize,
        screen: ScreenSize,
        now: Duration,
    ) -> FrameOutcome {
        let was_confirmed = ctx.exit.is_confirmed();
        let exit = ctx.exit.update(hands, now);

        let mut outcome = FrameOutcome {
            events: Vec::new(),
            cursor: None,
            scroll_delta: None,
            clicks: Vec::new(),
            exit,
            reading: None,
        };

        if hands.len() == 1 {
            let reading = self.classifier.classify(&hands[0]);
            outcome.cursor = map_to_screen(reading.cursor_anchor, frame, screen);
            if outcome.cursor.is_some() {
                outcome
                    .events
                    .extend(self.debounce.sample_move(&mut ctx.toggles, now));
            } else {
                tracing::debug!(?frame, "Degenerate frame size, cursor not moved");
            }

            let actions = self.debounce.apply(&mut ctx.toggles, &reading, now);
            outcome.events.extend(actions.events);
            outcome.scroll_delta = actions.scroll_delta;
            outcome.clicks = actions.clicks;
            outcome.reading = Some(reading);
        } else {
            tracing::trace!(hands = hands.len(), "Fine control skipped for frame");
        }

        if !was_confirmed && outcome.exit_confirmed() {
            outcome
                .events
                .push(GestureEvent::new(GestureKind::ExitRequest, now));
        }

        outcome
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::geometry::fixtures::*;
    use crate::gesture::types::ScrollDirection;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };
    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn kinds(outcome: &FrameOutcome) -> Vec<GestureKind> {
        outcome.events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn single_hand_moves_cursor_and_samples_move() {
        let engine = GestureEngine::default();
        let config = GestureConfig::default();
        let mut ctx = SessionContext::new(&config);

        let out = engine.process_frame(&mut ctx, &[open_hand()], FRAME, SCREEN, ms(0));
        // middle tip (350, 200) -> (1050, 450)
        assert_eq!(out.cursor, Some(ScreenPosition { x: 1050, y: 450 }));
        assert_eq!(kinds(&out), vec![GestureKind::MoveCursor]);
        assert_eq!(out.reading.map(|r| r.scroll), Some(ScrollDirection::None));

        let out = engine.process_frame(&mut ctx, &[open_hand()], FRAME, SCREEN, ms(500));
        assert!(out.cursor.is_some());
        assert!(out.events.is_empty());
    }

    #[test]
    fn zero_or_two_hands_skip_fine_control() {
        let engine = GestureEngine::default();
        let mut ctx = SessionContext::new(&GestureConfig::default());

        let none = engine.process_frame(&mut ctx, &[], FRAME, SCREEN, ms(0));
        assert!(none.cursor.is_none() && none.events.is_empty() && none.reading.is_none());

        let pair = [thumb_touching(20, 5.0), thumb_touching(20, 5.0)];
        let two = engine.process_frame(&mut ctx, &pair, FRAME, SCREEN, ms(10));
        assert!(two.clicks.is_empty());
        assert!(two.cursor.is_none());
        assert!(!ctx.toggles.previous_click_left);
    }

    #[test]
    fn held_exit_emits_single_exit_request() {
        let engine = GestureEngine::default();
        let mut ctx = SessionContext::new(&GestureConfig::default());
        let pair = [open_hand(), open_hand()];

        let mut exits = 0;
        for t in (0..=4_000).step_by(100) {
            let out = engine.process_frame(&mut ctx, &pair, FRAME, SCREEN, ms(t));
            exits += out
                .events
                .iter()
                .filter(|e| e.kind == GestureKind::ExitRequest)
                .count();
            if t < 3_000 {
                assert!(!out.exit_confirmed());
            } else {
                assert!(out.exit_confirmed());
            }
        }
        assert_eq!(exits, 1);
    }

    #[test]
    fn scroll_and_click_side_effects_are_reported() {
        let engine = GestureEngine::default();
        let mut ctx = SessionContext::new(&GestureConfig::default());

        let out = engine.process_frame(&mut ctx, &[thumb_index_apart(20.0)], FRAME, SCREEN, ms(0));
        assert_eq!(out.scroll_delta, Some(1));
        assert_eq!(kinds(&out), vec![GestureKind::MoveCursor, GestureKind::ScrollUp]);

        let out = engine.process_frame(&mut ctx, &[thumb_touching(20, 5.0)], FRAME, SCREEN, ms(600));
        assert_eq!(out.clicks, vec![MouseButton::Left]);
        assert_eq!(kinds(&out), vec![GestureKind::ClickLeft]);
    }

    #[test]
    fn degenerate_frame_skips_cursor_but_not_gestures() {
        let engine = GestureEngine::default();
        let mut ctx = SessionContext::new(&GestureConfig::default());
        let empty = FrameSize { width: 0, height: 0 };

        let out = engine.process_frame(&mut ctx, &[thumb_touching(20, 5.0)], empty, SCREEN, ms(0));
        assert!(out.cursor.is_none());
        assert_eq!(kinds(&out), vec![GestureKind::ClickLeft]);
    }
}
