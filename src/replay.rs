//! Deterministic session replay from a JSON-lines trace of detected hands
//! and operator commands.
//!
//! One line per frame:
//!
//! ```json
//! {"t_ms": 0, "width": 640, "height": 480, "detect_ms": 12.5, "hands": [[[x, y], ...]], "commands": ["y"]}
//! ```
//!
//! `detect_ms` advances the clock between frame acquisition and gesture
//! evaluation and therefore shows up as the processing latency of every
//! event emitted by that frame. Commands are delivered after the frame.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::NANOS_PER_MILLI;
use crate::gesture::config::GestureConfig;
use crate::gesture::cursor::ScreenPosition;
use crate::gesture::types::{FrameSize, HandPose, MouseButton};
use crate::session::{
    Command, CommandParseError, CommandSource, FrameSource, HandDetector, ManualClock, PointingDevice,
    Session, SessionOptions, SessionSummary,
};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("trace line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("trace line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: CommandParseError,
    },
    #[error("trace line {line}: timestamp {t_ms} ms goes backwards")]
    NonMonotonic { line: usize, t_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub t_ms: u64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub detect_ms: f64,
    #[serde(default)]
    pub hands: Vec<HandPose>,
    #[serde(default)]
    pub commands: Vec<String>,
}

/// A trace frame with its commands already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub at: Duration,
    pub size: FrameSize,
    pub detect: Duration,
    pub hands: Vec<HandPose>,
    pub commands: Vec<Command>,
}

pub fn parse_trace(raw: &str) -> Result<Vec<ReplayFrame>, TraceError> {
    let mut frames = Vec::new();
    let mut last_t = 0u64;
    for (idx, text) in raw.lines().enumerate() {
        let line = idx + 1;
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let frame: TraceFrame =
            serde_json::from_str(text).map_err(|source| TraceError::Parse { line, source })?;
        if frame.t_ms < last_t {
            return Err(TraceError::NonMonotonic {
                line,
                t_ms: frame.t_ms,
            });
        }
        last_t = frame.t_ms;

        let commands = frame
            .commands
            .iter()
            .map(|c| Command::parse(c))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| TraceError::Command { line, source })?;

        frames.push(ReplayFrame {
            at: Duration::from_millis(frame.t_ms),
            size: FrameSize {
                width: frame.width,
                height: frame.height,
            },
            detect: Duration::from_nanos((frame.detect_ms.max(0.0) * NANOS_PER_MILLI).round() as u64),
            hands: frame.hands,
            commands,
        });
    }
    Ok(frames)
}

pub fn load_trace(path: &Path) -> Result<Vec<ReplayFrame>, TraceError> {
    let raw = fs::read_to_string(path)?;
    let frames = parse_trace(&raw)?;
    tracing::info!(path = %path.display(), frames = frames.len(), "Trace loaded");
    Ok(frames)
}

type CommandQueue = Rc<RefCell<VecDeque<Command>>>;

pub struct TraceFrameSource {
    frames: VecDeque<ReplayFrame>,
    clock: ManualClock,
    commands: CommandQueue,
}

impl FrameSource for TraceFrameSource {
    type Frame = ReplayFrame;

    fn next_frame(&mut self) -> Option<ReplayFrame> {
        let mut frame = self.frames.pop_front()?;
        self.clock.set(frame.at);
        self.commands
            .borrow_mut()
            .extend(std::mem::take(&mut frame.commands));
        Some(frame)
    }

    fn frame_size(&self, frame: &ReplayFrame) -> FrameSize {
        frame.size
    }
}

pub struct TraceDetector {
    clock: ManualClock,
}

impl HandDetector<ReplayFrame> for TraceDetector {
    fn detect(&mut self, frame: &ReplayFrame) -> Vec<HandPose> {
        self.clock.advance(frame.detect);
        frame.hands.clone()
    }
}

pub struct QueuedCommands {
    queue: CommandQueue,
}

impl CommandSource for QueuedCommands {
    fn poll(&mut self) -> Option<Command> {
        self.queue.borrow_mut().pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Move(ScreenPosition),
    Click(MouseButton),
    Scroll { dx: i32, dy: i32 },
}

/// Pointing device that records instead of injecting OS input.
#[derive(Debug, Clone, Default)]
pub struct RecordingPointer {
    pub actions: Vec<PointerAction>,
}

impl RecordingPointer {
    pub fn clicks(&self) -> impl Iterator<Item = MouseButton> + '_ {
        self.actions.iter().filter_map(|a| match a {
            PointerAction::Click(b) => Some(*b),
            _ => None,
        })
    }

    pub fn scroll_total(&self) -> i32 {
        self.actions
            .iter()
            .map(|a| match a {
                PointerAction::Scroll { dy, .. } => *dy,
                _ => 0,
            })
            .sum()
    }

    pub fn last_position(&self) -> Option<ScreenPosition> {
        self.actions.iter().rev().find_map(|a| match a {
            PointerAction::Move(p) => Some(*p),
            _ => None,
        })
    }
}

impl PointingDevice for RecordingPointer {
    fn set_position(&mut self, position: ScreenPosition) {
        self.actions.push(PointerAction::Move(position));
    }

    fn click(&mut self, button: MouseButton) {
        self.actions.push(PointerAction::Click(button));
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        self.actions.push(PointerAction::Scroll { dx, dy });
    }
}

pub struct ReplayOutcome {
    pub summary: SessionSummary,
    pub pointer: RecordingPointer,
}

/// Runs a full session over `frames` with recording collaborators.
pub fn replay(frames: Vec<ReplayFrame>, config: GestureConfig, options: SessionOptions) -> ReplayOutcome {
    let clock = ManualClock::new();
    let queue: CommandQueue = Rc::default();
    let source = TraceFrameSource {
        frames: frames.into(),
        clock: clock.clone(),
        commands: Rc::clone(&queue),
    };
    let detector = TraceDetector {
        clock: clock.clone(),
    };
    let commands = QueuedCommands { queue };
    let mut pointer = RecordingPointer::default();

    let summary = Session::new(source, detector, &mut pointer, clock, commands, config, options).run();
    ReplayOutcome { summary, pointer }
}
