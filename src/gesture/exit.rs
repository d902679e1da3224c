//! Exit gesture: both hands raised, held continuously.
//!
//! Idle → Arming when exactly two raised hands appear, Arming → Idle on any
//! frame without them (progress is discarded), Arming → Confirmed once the
//! hold duration has elapsed. Confirmed is terminal.

use std::time::Duration;

use crate::gesture::geometry::both_hands_raised;
use crate::gesture::types::HandPose;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExitState {
    Idle,
    Arming { since: Duration },
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitProgress {
    pub state: ExitState,
    /// Time left before confirmation while arming.
    pub remaining: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ExitDetector {
    hold: Duration,
    state: ExitState,
}

impl ExitDetector {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            state: ExitState::Idle,
        }
    }

    pub fn state(&self) -> ExitState {
        self.state
    }

    pub fn is_confirmed(&self) -> bool {
        self.state == ExitState::Confirmed
    }

    /// Timestamp at which the current continuous hold started.
    pub fn raised_since(&self) -> Option<Duration> {
        match self.state {
            ExitState::Arming { since } => Some(since),
            _ => None,
        }
    }

    pub fn update(&mut self, hands: &[HandPose], now: Duration) -> ExitProgress {
        if self.state == ExitState::Confirmed {
            return ExitProgress {
                state: self.state,
                remaining: None,
            };
        }

        if !both_hands_raised(hands) {
            if let ExitState::Arming { since } = self.state {
                tracing::debug!(
                    held_ms = now.saturating_sub(since).as_millis() as u64,
                    "Exit hold released"
                );
            }
            self.state = ExitState::Idle;
            return ExitProgress {
                state: self.state,
                remaining: None,
            };
        }

        let since = match self.state {
            ExitState::Arming { since } => since,
            _ => {
                tracing::info!(hold_ms = self.hold.as_millis() as u64, "Both hands raised, hold to exit");
                now
            }
        };

        let held = now.saturating_sub(since);
        if held >= self.hold {
            tracing::info!("Exit gesture confirmed");
            self.state = ExitState::Confirmed;
            ExitProgress {
                state: self.state,
                remaining: None,
            }
        } else {
            self.state = ExitState::Arming { since };
            ExitProgress {
                state: self.state,
                remaining: Some(self.hold - held),
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = ExitState::Idle;
    }
}
