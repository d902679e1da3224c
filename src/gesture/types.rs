use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::LANDMARK_COUNT;

/// 2-D point in frame-pixel (or screen-pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// The 21 landmarks of one detected hand, indexed as the detector emits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct HandPose {
    landmarks: [Point; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(landmarks: [Point; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn landmark(&self, index: usize) -> Point {
        self.landmarks[index]
    }

    pub fn landmarks(&self) -> &[Point; LANDMARK_COUNT] {
        &self.landmarks
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("hand pose needs 21 landmarks, got {0}")]
pub struct LandmarkCountError(pub usize);

impl TryFrom<Vec<Point>> for HandPose {
    type Error = LandmarkCountError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let len = points.len();
        let landmarks: [Point; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkCountError(len))?;
        Ok(Self { landmarks })
    }
}

impl From<HandPose> for Vec<Point> {
    fn from(pose: HandPose) -> Self {
        pose.landmarks.to_vec()
    }
}

/// Pixel dimensions of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Pixel dimensions of the target display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    MoveCursor,
    ScrollUp,
    ScrollDown,
    ToggleScrollMode,
    ClickLeft,
    ClickRight,
    ExitRequest,
}

impl GestureKind {
    /// Kinds that are recorded and human-labeled by the metrics engine.
    pub const TRACKED: [GestureKind; 6] = [
        GestureKind::ScrollUp,
        GestureKind::ScrollDown,
        GestureKind::ClickLeft,
        GestureKind::ClickRight,
        GestureKind::ToggleScrollMode,
        GestureKind::MoveCursor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::MoveCursor => "move_cursor",
            GestureKind::ScrollUp => "scroll_up",
            GestureKind::ScrollDown => "scroll_down",
            GestureKind::ToggleScrollMode => "toggle_scroll_mode",
            GestureKind::ClickLeft => "click_left",
            GestureKind::ClickRight => "click_right",
            GestureKind::ExitRequest => "exit_request",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GestureKind::MoveCursor => "Move Cursor",
            GestureKind::ScrollUp => "Scroll Up",
            GestureKind::ScrollDown => "Scroll Down",
            GestureKind::ToggleScrollMode => "Toggle Scroll",
            GestureKind::ClickLeft => "Click Left",
            GestureKind::ClickRight => "Click Right",
            GestureKind::ExitRequest => "Exit Request",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "move_cursor" => Some(GestureKind::MoveCursor),
            "scroll_up" => Some(GestureKind::ScrollUp),
            "scroll_down" => Some(GestureKind::ScrollDown),
            "toggle_scroll_mode" => Some(GestureKind::ToggleScrollMode),
            "click_left" => Some(GestureKind::ClickLeft),
            "click_right" => Some(GestureKind::ClickRight),
            "exit_request" => Some(GestureKind::ExitRequest),
            _ => None,
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
}

/// A debounced, edge-triggered gesture emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Session-relative monotonic time of the frame that produced the event.
    pub timestamp: Duration,
    /// Time from frame start to emission. Filled in by the session loop.
    pub processing_latency: Duration,
}

impl GestureEvent {
    pub fn new(kind: GestureKind, timestamp: Duration) -> Self {
        Self {
            kind,
            timestamp,
            processing_latency: Duration::ZERO,
        }
    }
}
